//! Far-field intensity formulas on the observation screen.
//!
//! In the Fraunhofer regime the screen intensity at a position $y$ is a
//! closed-form function of the diffraction angle $\theta = \arctan(y / L)$:
//!
//! $$
//! I_{\text{single}}(y) \propto \mathrm{sinc}^2\beta, \qquad
//! I_{\text{double}}(y) \propto \mathrm{sinc}^2\beta \, \cos^2\delta,
//! $$
//!
//! with $\beta = \pi a \sin\theta / \lambda$ and
//! $\delta = \pi d \sin\theta / \lambda$. The functions here return the
//! unnormalised factors; [`crate::experiment::SlitExperiment`] composes and
//! peak-normalises them.

use ndarray::Array1;

/// Floor substituted for |β| at the removable sinc singularity on the axis.
///
/// At this magnitude $\sin\beta / \beta$ evaluates to exactly 1.0 in f64, so
/// clamping agrees bit-for-bit with the analytic limit at θ = 0.
pub const BETA_FLOOR: f64 = 1e-12;

/// Uniformly spaced screen positions spanning `[-width/2, +width/2]` (m).
pub fn screen_positions(width: f64, point_count: usize) -> Array1<f64> {
    Array1::linspace(-width / 2.0, width / 2.0, point_count)
}

/// Unnormalised single-slit diffraction envelope, $\mathrm{sinc}^2\beta$.
///
/// Values lie in (0, 1]; the guard on |β| keeps the evaluation free of
/// divide-by-zero at the optical axis.
pub fn diffraction_envelope(
    positions: &Array1<f64>,
    slit_width: f64,
    wavelength: f64,
    screen_distance: f64,
) -> Array1<f64> {
    positions.mapv(|y| {
        let theta = (y / screen_distance).atan();
        let mut beta = std::f64::consts::PI * slit_width * theta.sin() / wavelength;
        if beta.abs() < BETA_FLOOR {
            beta = BETA_FLOOR;
        }
        let sinc = beta.sin() / beta;
        sinc * sinc
    })
}

/// Two-slit interference factor, $\cos^2\delta$.
///
/// No singularity guard is needed: the cosine never divides by δ.
pub fn interference_factor(
    positions: &Array1<f64>,
    slit_separation: f64,
    wavelength: f64,
    screen_distance: f64,
) -> Array1<f64> {
    positions.mapv(|y| {
        let theta = (y / screen_distance).atan();
        let delta = std::f64::consts::PI * slit_separation * theta.sin() / wavelength;
        let c = delta.cos();
        c * c
    })
}

/// Normalise a sequence by its own maximum so the peak sample is exactly 1.
///
/// A sequence whose maximum is not positive is returned unchanged: there is
/// nothing meaningful to scale by.
pub fn normalise_peak(intensity: Array1<f64>) -> Array1<f64> {
    let max = intensity.iter().fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    if max > 0.0 {
        intensity / max
    } else {
        intensity
    }
}
