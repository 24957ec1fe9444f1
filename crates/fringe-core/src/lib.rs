//! # Fringe Core
//!
//! The numerical backbone of the Fringe toolkit. This crate models the
//! far-field (Fraunhofer) intensity pattern produced by single- and
//! double-slit illumination with coherent monochromatic light, and derives
//! the analytic predictions (fringe spacing, central-maximum width, fringe
//! positions) a user would compare against a real tabletop experiment.
//!
//! ## Architecture
//!
//! An [`experiment::SlitExperiment`] owns one [`wave::WaveSource`] plus the
//! slit geometry. Construction validates every physical parameter and
//! freezes the derived [`experiment::TheoryConstants`]; all later queries
//! (intensity fields, sampling, fringe prediction) are pure functions of
//! that immutable state. The crate performs no I/O: plotting, reporting and
//! measured-data comparison consume its outputs elsewhere.
//!
//! ## Modules
//!
//! - [`types`] — Shared data structures (modes, snapshots, predictions, warnings).
//! - [`wave`] — Monochromatic source and wavelength-derived quantities.
//! - [`experiment`] — Experiment model, validation, and entry points.
//! - [`pattern`] — Closed-form screen-intensity formulas.
//! - [`error`] — The fatal error type.

pub mod error;
pub mod experiment;
pub mod pattern;
pub mod types;
pub mod wave;
