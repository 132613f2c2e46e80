//! Errors from diagnostic estimates.

use std::error::Error;
use std::fmt;

use flowlines_core::Vec2;

/// Errors from evaluating a diagnostic.
#[derive(Clone, Debug, PartialEq)]
pub enum DiagnosticError {
    /// The estimate came out NaN or infinite, typically because the point
    /// lies on or next to a singularity of the field.
    NonFinite {
        /// Where the estimate was taken.
        point: Vec2,
    },
}

impl fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { point } => {
                write!(f, "vorticity estimate at {point} is not finite")
            }
        }
    }
}

impl Error for DiagnosticError {}
