//! Errors from tracing runs.

use std::error::Error;
use std::fmt;

use flowlines_core::{FieldError, Vec2};

/// Errors that abort a pathline or streakline run.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceError {
    /// The field returned a NaN or infinite velocity for a particle.
    ///
    /// The step is abandoned before any particle moves, so the run's
    /// positions are those at the start of `step`.
    NonFiniteVelocity {
        /// Index of the offending particle (seed index for pathlines,
        /// release order for streak tracers).
        particle: usize,
        /// The step (tick) during which the velocity was sampled.
        step: usize,
        /// The particle's position when sampled.
        position: Vec2,
    },
    /// The field rejected an evaluation.
    Field(FieldError),
}

impl TraceError {
    pub(crate) fn at_step(self, step: usize) -> Self {
        match self {
            Self::NonFiniteVelocity {
                particle, position, ..
            } => Self::NonFiniteVelocity {
                particle,
                step,
                position,
            },
            other => other,
        }
    }
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteVelocity {
                particle,
                step,
                position,
            } => write!(
                f,
                "non-finite velocity for particle {particle} at step {step} (position {position})"
            ),
            Self::Field(e) => write!(f, "field evaluation failed: {e}"),
        }
    }
}

impl Error for TraceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            Self::NonFiniteVelocity { .. } => None,
        }
    }
}

impl From<FieldError> for TraceError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}
