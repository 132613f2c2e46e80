//! Per-run metrics for tracing runs.
//!
//! [`RunMetrics`] captures the work done and wall-clock time of one
//! pathline or streakline run.

/// Work and timing for a single run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Euler steps (ticks) completed.
    pub steps: u64,
    /// Point evaluations of the velocity field.
    pub field_evaluations: u64,
    /// Wall-clock time for the run, in microseconds.
    pub elapsed_us: u64,
}
