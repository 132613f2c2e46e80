//! Particle tracing for Flowlines.
//!
//! Two drivers share one explicit-Euler kernel ([`euler_step`]):
//!
//! - [`Integrator`] advances a fixed set of seeds and records each
//!   particle's full [`Trajectory`] (pathlines).
//! - [`StreakEmitter`] releases a new tracer from a fixed point every few
//!   ticks and records periodic [`StreakSnapshot`]s of the live population
//!   (streaklines).
//!
//! Both take the velocity field explicitly and are deterministic: the same
//! field, configuration and seeds always produce identical output.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod euler;
pub mod integrator;
pub mod metrics;
pub mod streak;
pub mod trajectory;

pub use error::TraceError;
pub use euler::euler_step;
pub use integrator::{Integrator, IntegratorBuilder, Pathlines};
pub use metrics::RunMetrics;
pub use streak::{StreakBatch, StreakEmitter, StreakEmitterBuilder, StreakSnapshot, Streaklines};
pub use trajectory::Trajectory;

/// Upper bound on up-front buffer reservations; longer runs grow on demand.
pub(crate) const MAX_PREALLOC: usize = 1 << 20;
