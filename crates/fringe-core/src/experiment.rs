//! The slit experiment model: geometry, validation, derived constants, and
//! the intensity-field and fringe-position entry points.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::ExperimentError;
use crate::pattern;
use crate::types::{
    ExperimentParams, FringePrediction, PlausibilityWarning, ScreenPattern, SlitMode,
};
use crate::wave::WaveSource;

pub use crate::wave::DEFAULT_WAVELENGTH;

/// Default slit width (m).
pub const DEFAULT_SLIT_WIDTH: f64 = 50e-6;
/// Default centre-to-centre slit separation (m).
pub const DEFAULT_SLIT_SEPARATION: f64 = 200e-6;
/// Default slit-to-screen distance (m).
pub const DEFAULT_SCREEN_DISTANCE: f64 = 1.0;

/// Minimum sample count accepted by [`SlitExperiment::simulate`], chosen so
/// the sinc² main lobe and several side lobes are always resolvable.
pub const MIN_SCREEN_POINTS: usize = 100;

/// Default highest interference order for [`SlitExperiment::fringe_positions`].
pub const DEFAULT_MAX_ORDER: usize = 10;

/// Theoretical constants derived once at construction and frozen.
///
/// With λ the wavelength, a the slit width, d the slit separation and L the
/// screen distance (small-angle solutions of $d \sin\theta = n\lambda$).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TheoryConstants {
    /// Angular fringe spacing λ/d (rad).
    pub angular_fringe_spacing: f64,
    /// Linear fringe spacing λL/d on the screen (m).
    pub linear_fringe_spacing: f64,
    /// Full width 2λL/a of the central diffraction maximum (m).
    pub central_max_width: f64,
    /// Interference fringes that fit inside the central maximum.
    pub visible_fringe_count: usize,
}

/// A single- or double-slit experiment in the far-field approximation.
///
/// Owns its [`WaveSource`] and the slit geometry. Construction validates all
/// physical parameters and freezes the derived [`TheoryConstants`]; every
/// later query is a pure function of this immutable state, so repeated
/// evaluations of the same experiment are bit-identical and independent
/// instances can be evaluated in parallel without synchronisation.
#[derive(Debug, Clone)]
pub struct SlitExperiment {
    wave: WaveSource,
    slit_width: f64,
    slit_separation: f64,
    screen_distance: f64,
    constants: TheoryConstants,
    warnings: Vec<PlausibilityWarning>,
}

impl SlitExperiment {
    /// Build an experiment from wavelength λ, slit width a, slit separation d
    /// and screen distance L (all metres, all strictly positive).
    ///
    /// Fails with [`ExperimentError::InvalidParameter`] on any non-positive
    /// input. Physically implausible but valid inputs (wavelength outside
    /// 100–1000 nm, separation not exceeding width) are collected as
    /// [`PlausibilityWarning`]s, each mirrored once to the log.
    pub fn new(
        wavelength: f64,
        slit_width: f64,
        slit_separation: f64,
        screen_distance: f64,
    ) -> Result<Self, ExperimentError> {
        // The wave source validates the wavelength itself.
        let wave = WaveSource::new(wavelength)?;
        validate_positive("slit_width", slit_width)?;
        validate_positive("slit_separation", slit_separation)?;
        validate_positive("screen_distance", screen_distance)?;

        let mut warnings = Vec::new();
        if let Some(warning) = wave.plausibility_warning() {
            warnings.push(warning);
        }
        if slit_separation <= slit_width {
            let warning = PlausibilityWarning::SeparationNotAboveWidth {
                slit_separation,
                slit_width,
            };
            log::warn!("{}", warning);
            warnings.push(warning);
        }

        Ok(Self {
            wave,
            slit_width,
            slit_separation,
            screen_distance,
            constants: derive_constants(wavelength, slit_width, slit_separation, screen_distance),
            warnings,
        })
    }

    /// The wave source owned by this experiment.
    pub fn wave(&self) -> &WaveSource {
        &self.wave
    }

    /// Slit width a (m).
    pub fn slit_width(&self) -> f64 {
        self.slit_width
    }

    /// Centre-to-centre slit separation d (m).
    pub fn slit_separation(&self) -> f64 {
        self.slit_separation
    }

    /// Slit-to-screen distance L (m).
    pub fn screen_distance(&self) -> f64 {
        self.screen_distance
    }

    /// The derived constants frozen at construction.
    pub fn constants(&self) -> TheoryConstants {
        self.constants
    }

    /// Plausibility warnings raised at construction (empty when none).
    pub fn warnings(&self) -> &[PlausibilityWarning] {
        &self.warnings
    }

    /// Snapshot of the four defining inputs.
    pub fn params(&self) -> ExperimentParams {
        ExperimentParams {
            wavelength: self.wave.wavelength(),
            slit_width: self.slit_width,
            slit_separation: self.slit_separation,
            screen_distance: self.screen_distance,
        }
    }

    /// Single-slit (diffraction only) intensity at the given screen positions,
    /// peak-normalised to [0, 1].
    ///
    /// Fails on an empty position sequence.
    pub fn single_slit_intensity(
        &self,
        positions: &Array1<f64>,
    ) -> Result<Array1<f64>, ExperimentError> {
        check_positions(positions)?;
        let envelope = pattern::diffraction_envelope(
            positions,
            self.slit_width,
            self.wave.wavelength(),
            self.screen_distance,
        );
        Ok(pattern::normalise_peak(envelope))
    }

    /// Double-slit (diffraction × interference) intensity at the given screen
    /// positions, normalised by the combined field's own maximum.
    ///
    /// Normalising the product rather than the envelope matters: the
    /// interference term can suppress the nominal envelope peak, so the true
    /// maximum may sit at an order other than the centre.
    pub fn double_slit_intensity(
        &self,
        positions: &Array1<f64>,
    ) -> Result<Array1<f64>, ExperimentError> {
        check_positions(positions)?;
        let envelope = pattern::diffraction_envelope(
            positions,
            self.slit_width,
            self.wave.wavelength(),
            self.screen_distance,
        );
        let fringes = pattern::interference_factor(
            positions,
            self.slit_separation,
            self.wave.wavelength(),
            self.screen_distance,
        );
        Ok(pattern::normalise_peak(envelope * fringes))
    }

    /// Evaluate the selected field at caller-supplied positions.
    ///
    /// Comparison against measured data must go through this (or the two
    /// field methods directly) with the caller's own position sequence, so
    /// residuals line up sample for sample.
    pub fn intensity_at(
        &self,
        positions: &Array1<f64>,
        mode: SlitMode,
    ) -> Result<Array1<f64>, ExperimentError> {
        match mode {
            SlitMode::Single => self.single_slit_intensity(positions),
            SlitMode::Double => self.double_slit_intensity(positions),
        }
    }

    /// Sample the selected field over a uniform window of `point_count`
    /// positions spanning `[-width/2, +width/2]` metres.
    ///
    /// Fails if `width` is not positive or `point_count` is below
    /// [`MIN_SCREEN_POINTS`].
    pub fn simulate(
        &self,
        width: f64,
        point_count: usize,
        mode: SlitMode,
    ) -> Result<ScreenPattern, ExperimentError> {
        if !(width > 0.0) {
            return Err(ExperimentError::InvalidParameter {
                parameter: "width",
                value: width,
                constraint: "must be positive",
            });
        }
        if point_count < MIN_SCREEN_POINTS {
            return Err(ExperimentError::InvalidParameter {
                parameter: "point_count",
                value: point_count as f64,
                constraint: "at least 100 points are needed to resolve the pattern",
            });
        }

        let positions = pattern::screen_positions(width, point_count);
        let intensity = self.intensity_at(&positions, mode)?;
        Ok(ScreenPattern {
            positions,
            intensity,
            mode,
        })
    }

    /// Analytic fringe positions up to interference order `max_order`.
    ///
    /// Maxima sit at $y = n \lambda L / d$ for n ∈ −max_order..=+max_order
    /// (2·max_order + 1 values); minima at the half-integer orders in
    /// between (2·max_order values). Both sequences ascend with the order
    /// index. Fails if `max_order` is zero.
    pub fn fringe_positions(&self, max_order: usize) -> Result<FringePrediction, ExperimentError> {
        if max_order < 1 {
            return Err(ExperimentError::InvalidParameter {
                parameter: "max_order",
                value: max_order as f64,
                constraint: "must be at least 1",
            });
        }

        let spacing = self.constants.linear_fringe_spacing;
        let n = max_order as i64;
        let maxima: Vec<f64> = (-n..=n).map(|m| m as f64 * spacing).collect();
        let minima: Vec<f64> = (-n..n).map(|m| (m as f64 + 0.5) * spacing).collect();

        Ok(FringePrediction {
            maxima,
            minima,
            fringe_spacing: spacing,
            central_max_width: self.constants.central_max_width,
            params: self.params(),
        })
    }
}

impl Default for SlitExperiment {
    /// The standard red-laser tabletop configuration.
    fn default() -> Self {
        // The bench defaults pass every validation rule and raise no warnings.
        Self {
            wave: WaveSource::default(),
            slit_width: DEFAULT_SLIT_WIDTH,
            slit_separation: DEFAULT_SLIT_SEPARATION,
            screen_distance: DEFAULT_SCREEN_DISTANCE,
            constants: derive_constants(
                DEFAULT_WAVELENGTH,
                DEFAULT_SLIT_WIDTH,
                DEFAULT_SLIT_SEPARATION,
                DEFAULT_SCREEN_DISTANCE,
            ),
            warnings: Vec::new(),
        }
    }
}

fn derive_constants(
    wavelength: f64,
    slit_width: f64,
    slit_separation: f64,
    screen_distance: f64,
) -> TheoryConstants {
    let linear_fringe_spacing = wavelength * screen_distance / slit_separation;
    let central_max_width = 2.0 * wavelength * screen_distance / slit_width;
    TheoryConstants {
        angular_fringe_spacing: wavelength / slit_separation,
        linear_fringe_spacing,
        central_max_width,
        visible_fringe_count: (central_max_width / linear_fringe_spacing) as usize,
    }
}

fn validate_positive(parameter: &'static str, value: f64) -> Result<(), ExperimentError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ExperimentError::InvalidParameter {
            parameter,
            value,
            constraint: "must be positive",
        })
    }
}

fn check_positions(positions: &Array1<f64>) -> Result<(), ExperimentError> {
    if positions.is_empty() {
        return Err(ExperimentError::InvalidParameter {
            parameter: "positions",
            value: 0.0,
            constraint: "must contain at least one sample",
        });
    }
    Ok(())
}
