//! Core types shared across the Fringe toolkit.
//!
//! This module defines the data structures passed between the experiment
//! model and its consumers: sampling modes, parameter snapshots, fringe
//! predictions, sampled patterns, and plausibility warnings.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which intensity field to evaluate on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlitMode {
    /// Diffraction envelope of a single slit.
    Single,
    /// Diffraction × interference of a double slit.
    Double,
}

impl fmt::Display for SlitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlitMode::Single => write!(f, "single"),
            SlitMode::Double => write!(f, "double"),
        }
    }
}

/// The four defining inputs of a slit experiment, kept for traceability.
///
/// All lengths are in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperimentParams {
    /// Wavelength λ of the source.
    pub wavelength: f64,
    /// Slit width a.
    pub slit_width: f64,
    /// Centre-to-centre slit separation d.
    pub slit_separation: f64,
    /// Distance L from the slit plane to the screen.
    pub screen_distance: f64,
}

/// Analytic fringe positions together with the constants they derive from.
///
/// Produced fresh on each request by
/// [`crate::experiment::SlitExperiment::fringe_positions`]; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FringePrediction {
    /// Maxima positions (m), ascending. For `max_order` n this holds the
    /// orders −n..=+n, so the central maximum sits at index n.
    pub maxima: Vec<f64>,
    /// Minima positions (m), ascending, at half-integer orders
    /// −n+0.5, …, n−0.5.
    pub minima: Vec<f64>,
    /// Linear fringe spacing λL/d (m).
    pub fringe_spacing: f64,
    /// Full width 2λL/a of the central diffraction maximum (m).
    pub central_max_width: f64,
    /// The inputs the prediction was derived from.
    pub params: ExperimentParams,
}

/// A sampled, peak-normalised intensity pattern on the observation screen.
#[derive(Debug, Clone)]
pub struct ScreenPattern {
    /// Screen positions (m), ascending, centred on the optical axis.
    pub positions: Array1<f64>,
    /// Intensity in [0, 1], one value per position.
    pub intensity: Array1<f64>,
    /// Which field produced the pattern.
    pub mode: SlitMode,
}

/// Non-fatal advisory raised at construction when parameters are valid but
/// physically implausible. Construction proceeds; the warning is stored on
/// the experiment and mirrored once to the log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlausibilityWarning {
    /// Wavelength outside the 100–1000 nm band a tabletop optics bench uses.
    WavelengthOutsideVisibleRange { wavelength: f64 },
    /// Slit separation does not exceed slit width: the slits overlap or touch.
    SeparationNotAboveWidth {
        slit_separation: f64,
        slit_width: f64,
    },
}

impl fmt::Display for PlausibilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlausibilityWarning::WavelengthOutsideVisibleRange { wavelength } => write!(
                f,
                "wavelength {:.1} nm is outside the typical visible range (100–1000 nm)",
                wavelength * 1e9
            ),
            PlausibilityWarning::SeparationNotAboveWidth {
                slit_separation,
                slit_width,
            } => write!(
                f,
                "slit separation {:.2} µm does not exceed slit width {:.2} µm",
                slit_separation * 1e6,
                slit_width * 1e6
            ),
        }
    }
}
