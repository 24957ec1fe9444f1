//! Error type shared by construction and evaluation entry points.

use thiserror::Error;

/// Errors raised when a physical or sampling parameter violates its contract.
///
/// Every failure is fatal to the call that raised it; nothing is retried or
/// silently corrected. Physically implausible but valid inputs are reported
/// through [`crate::types::PlausibilityWarning`] instead.
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("Invalid parameter {parameter} = {value}: {constraint}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        constraint: &'static str,
    },
}
