//! Integration test: sampled intensity fields vs analytic fringe theory.
//!
//! These tests validate that the sampled double-slit pattern reproduces the
//! textbook fringe geometry (spacing, dark minima, missing orders) for
//! tabletop laser configurations.

use fringe_core::experiment::SlitExperiment;
use fringe_core::pattern::{diffraction_envelope, interference_factor, screen_positions};
use fringe_core::types::SlitMode;
use ndarray::Array1;

/// Default red-laser configuration: λ = 632 nm, a = 50 µm, d = 200 µm, L = 1 m.
#[test]
fn test_textbook_constants_for_default_setup() {
    let experiment = SlitExperiment::default();
    let constants = experiment.constants();

    let rel_err = (constants.linear_fringe_spacing - 3.16e-3).abs() / 3.16e-3;
    eprintln!(
        "fringe spacing = {:.6e} m (rel_err = {:.1e})",
        constants.linear_fringe_spacing, rel_err
    );
    assert!(rel_err < 1e-9);
    assert!((constants.central_max_width - 2.528e-2).abs() / 2.528e-2 < 1e-9);
    assert_eq!(constants.visible_fringe_count, 8);
}

/// End-to-end configuration from a wider bench: λ = 632 nm, a = 100 µm,
/// d = 400 µm, L = 1.5 m.
#[test]
fn test_constants_for_wide_bench_setup() {
    let experiment = SlitExperiment::new(632e-9, 100e-6, 400e-6, 1.5).unwrap();
    let constants = experiment.constants();

    assert!((constants.linear_fringe_spacing - 2.37e-3).abs() / 2.37e-3 < 1e-9);
    assert!((constants.central_max_width - 1.896e-2).abs() / 1.896e-2 < 1e-9);
    assert_eq!(constants.visible_fringe_count, 8);
    assert!(experiment.warnings().is_empty());
}

/// The double-slit field must be dark at the predicted low-order minima.
///
/// The prediction uses the small-angle positions y = (m + ½)·λL/d while the
/// field uses the exact θ = arctan(y/L), so the residual grows with order;
/// the first two orders stay far below any visible level.
#[test]
fn test_predicted_minima_are_dark() {
    let experiment = SlitExperiment::default();
    let prediction = experiment.fringe_positions(2).unwrap();

    // Append the axis so normalisation is anchored at the central peak.
    let mut samples = prediction.minima.clone();
    samples.push(0.0);
    let positions = Array1::from(samples);
    let intensity = experiment.double_slit_intensity(&positions).unwrap();

    let centre = intensity[intensity.len() - 1];
    assert_eq!(centre, 1.0);

    for (i, &value) in intensity.iter().take(prediction.minima.len()).enumerate() {
        eprintln!(
            "minimum at y = {:+.4e} m: I = {:.3e}",
            prediction.minima[i], value
        );
        assert!(
            value < 1e-6,
            "minimum {} not dark: I = {:.3e}",
            i,
            value
        );
    }
}

/// With d/a = 4, interference order ±4 lands on the first diffraction zero
/// and is suppressed (a "missing order"), while order ±1 stays bright.
#[test]
fn test_missing_order_is_suppressed() {
    let experiment = SlitExperiment::default();
    let spacing = experiment.constants().linear_fringe_spacing;

    let positions = Array1::from(vec![0.0, spacing, 4.0 * spacing]);
    let intensity = experiment.double_slit_intensity(&positions).unwrap();

    eprintln!(
        "I(0) = {:.3e}, I(order 1) = {:.3e}, I(order 4) = {:.3e}",
        intensity[0], intensity[1], intensity[2]
    );

    assert_eq!(intensity[0], 1.0);
    assert!(intensity[1] > 0.5, "order 1 should remain bright");
    assert!(
        intensity[2] < 1e-7,
        "order 4 coincides with the envelope zero and must vanish"
    );
}

/// Unnormalised identity: the combined field never exceeds its envelope.
#[test]
fn test_unnormalised_product_bounded_by_envelope() {
    let positions = screen_positions(0.04, 4001);
    let envelope = diffraction_envelope(&positions, 50e-6, 632e-9, 1.0);
    let fringes = interference_factor(&positions, 200e-6, 632e-9, 1.0);

    for ((&e, &f), &y) in envelope.iter().zip(fringes.iter()).zip(positions.iter()) {
        let combined = e * f;
        assert!(
            combined <= e + 1e-15,
            "combined field exceeds envelope at y = {:.4e}: {} > {}",
            y,
            combined,
            e
        );
        assert!((0.0..=1.0).contains(&f));
    }
}

/// Both sampled fields are symmetric about the optical axis.
#[test]
fn test_pattern_symmetry_about_axis() {
    let experiment = SlitExperiment::default();

    // Exactly mirrored positions so the symmetry is not blurred by grid
    // rounding.
    let half: Vec<f64> = (1..400).map(|i| i as f64 * 2.5e-5).collect();
    let mut values: Vec<f64> = half.iter().map(|&y| -y).rev().collect();
    values.push(0.0);
    values.extend(half.iter().copied());
    let positions = Array1::from(values);

    for mode in [SlitMode::Single, SlitMode::Double] {
        let intensity = experiment.intensity_at(&positions, mode).unwrap();
        let n = intensity.len();
        for i in 0..n / 2 {
            let left = intensity[i];
            let right = intensity[n - 1 - i];
            assert!(
                (left - right).abs() < 1e-12,
                "{} field asymmetric at pair {}: {} vs {}",
                mode,
                i,
                left,
                right
            );
        }
    }
}

/// The sampled pattern peaks at exactly 1.0 and never leaves [0, 1].
#[test]
fn test_sampled_pattern_is_normalised() {
    let experiment = SlitExperiment::new(532e-9, 80e-6, 250e-6, 1.2).unwrap();

    for mode in [SlitMode::Single, SlitMode::Double] {
        let pattern = experiment.simulate(0.02, 1501, mode).unwrap();
        let max = pattern
            .intensity
            .iter()
            .fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        assert_eq!(max, 1.0);
        for &value in pattern.intensity.iter() {
            assert!(value.is_finite());
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
