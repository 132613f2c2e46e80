//! Error types shared across the Flowlines workspace.
//!
//! Field evaluation errors live here because every consumer of a
//! [`VelocityField`](crate::VelocityField) can encounter them; run
//! configuration errors live here because the tracer, diagnostic and
//! facade crates all validate against the same rules.

use std::error::Error;
use std::fmt;

/// Errors from evaluating a velocity field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// The grid form was given coordinate arrays of different shapes.
    ShapeMismatch {
        /// Shape of the x-coordinate array.
        x: Vec<usize>,
        /// Shape of the y-coordinate array.
        y: Vec<usize>,
    },
    /// The grid form returned an array whose shape differs from its input.
    OutputShape {
        /// Shape of the input coordinates.
        expected: Vec<usize>,
        /// Shape actually returned.
        found: Vec<usize>,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { x, y } => {
                write!(f, "coordinate shapes differ: x {x:?} vs y {y:?}")
            }
            Self::OutputShape { expected, found } => {
                write!(f, "grid output has shape {found:?}, expected {expected:?}")
            }
        }
    }
}

impl Error for FieldError {}

/// Errors detected while validating run configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Time step is zero, negative, NaN or infinite.
    InvalidTimeStep {
        /// The invalid value.
        value: f64,
    },
    /// A tick period (emission or sampling) is zero.
    ZeroPeriod {
        /// Which period was zero.
        which: &'static str,
    },
    /// A point parameter (seed, release or reference point) is not finite.
    NonFinitePoint {
        /// Which point was invalid.
        which: &'static str,
    },
    /// Finite-difference perturbation is zero, negative or not finite.
    InvalidPerturbation {
        /// The invalid value.
        value: f64,
    },
    /// Classification threshold is negative or not finite.
    InvalidThreshold {
        /// The invalid value.
        value: f64,
    },
    /// Grid resolution is below the minimum of 2 points per axis.
    GridResolutionTooSmall {
        /// The configured resolution.
        configured: usize,
    },
    /// Grid bounds are not finite or `min >= max`.
    InvalidGridBounds {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimeStep { value } => {
                write!(f, "time step must be positive and finite, got {value}")
            }
            Self::ZeroPeriod { which } => write!(f, "{which} period must be at least 1"),
            Self::NonFinitePoint { which } => write!(f, "{which} must be finite"),
            Self::InvalidPerturbation { value } => {
                write!(f, "perturbation must be positive and finite, got {value}")
            }
            Self::InvalidThreshold { value } => {
                write!(f, "threshold must be non-negative and finite, got {value}")
            }
            Self::GridResolutionTooSmall { configured } => {
                write!(f, "grid resolution must be at least 2, got {configured}")
            }
            Self::InvalidGridBounds { min, max } => {
                write!(f, "grid bounds must be finite with min < max, got [{min}, {max}]")
            }
        }
    }
}

impl Error for ConfigError {}

/// Validate a time step: positive and finite.
pub fn validate_dt(dt: f64) -> Result<(), ConfigError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTimeStep { value: dt })
    }
}
