//! The aggregate error for a full visualization run.

use std::error::Error;
use std::fmt;

use flowlines_core::{ConfigError, FieldError};
use flowlines_diag::DiagnosticError;
use flowlines_tracer::TraceError;

/// Any failure from [`visualize`](crate::visualize) or its stages.
#[derive(Clone, Debug, PartialEq)]
pub enum VisualizeError {
    /// Invalid run configuration.
    Config(ConfigError),
    /// Grid sampling failed.
    Field(FieldError),
    /// Pathline or streakline tracing aborted.
    Trace(TraceError),
    /// The vorticity diagnostic failed.
    Diagnostic(DiagnosticError),
}

impl fmt::Display for VisualizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Field(e) => write!(f, "grid sampling failed: {e}"),
            Self::Trace(e) => write!(f, "tracing failed: {e}"),
            Self::Diagnostic(e) => write!(f, "diagnostic failed: {e}"),
        }
    }
}

impl Error for VisualizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Field(e) => Some(e),
            Self::Trace(e) => Some(e),
            Self::Diagnostic(e) => Some(e),
        }
    }
}

impl From<ConfigError> for VisualizeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<FieldError> for VisualizeError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

impl From<TraceError> for VisualizeError {
    fn from(e: TraceError) -> Self {
        Self::Trace(e)
    }
}

impl From<DiagnosticError> for VisualizeError {
    fn from(e: DiagnosticError) -> Self {
        Self::Diagnostic(e)
    }
}
