//! Streakline emission.
//!
//! A [`StreakEmitter`] releases one tracer at a fixed point every
//! `emission_period` ticks and samples the whole live population every
//! `sample_period` ticks. Each tick runs, in order:
//!
//! 1. release a new tracer if `tick % emission_period == 0`;
//! 2. advance every live tracer one Euler step;
//! 3. capture a [`StreakSnapshot`] if `tick % sample_period == 0` and at
//!    least one tracer is live.
//!
//! Tracers never despawn and every tracer moves exactly once per tick,
//! whatever its age.

use std::time::Instant;

use flowlines_core::{validate_dt, ConfigError, Vec2, VelocityField};
use tracing::debug;

use crate::error::TraceError;
use crate::euler::step_with;
use crate::metrics::RunMetrics;

/// Default time step.
pub const DEFAULT_DT: f64 = 0.01;
/// Default number of ticks.
pub const DEFAULT_STEPS: usize = 500;
/// Default release point.
pub const DEFAULT_RELEASE: Vec2 = Vec2 { x: 1.0, y: 0.0 };
/// Default ticks between releases.
pub const DEFAULT_EMISSION_PERIOD: usize = 10;
/// Default ticks between snapshots.
pub const DEFAULT_SAMPLE_PERIOD: usize = 100;

/// Tracers released together at one tick.
///
/// `release_time` is kept for labelling only; it plays no part in the
/// integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreakBatch {
    /// Tick at which the batch was released.
    pub release_tick: usize,
    /// `release_tick · dt`.
    pub release_time: f64,
    /// Index of the batch's first tracer in release order.
    pub first_tracer: usize,
    /// Number of tracers in the batch.
    pub len: usize,
}

/// Every live tracer at one sampling tick, in release order.
#[derive(Clone, Debug, PartialEq)]
pub struct StreakSnapshot {
    /// The sampling tick.
    pub tick: usize,
    /// `tick · dt`.
    pub time: f64,
    /// Tracer positions after the tick's step.
    pub positions: Vec<Vec2>,
}

impl StreakSnapshot {
    /// Plot label for the snapshot, e.g. `t=1.00`.
    pub fn label(&self) -> String {
        format!("t={:.2}", self.time)
    }
}

/// The output of [`StreakEmitter::run`].
#[derive(Clone, Debug)]
pub struct Streaklines {
    batches: Vec<StreakBatch>,
    snapshots: Vec<StreakSnapshot>,
    final_positions: Vec<Vec2>,
    metrics: RunMetrics,
}

impl Streaklines {
    /// Release batches in order.
    pub fn batches(&self) -> &[StreakBatch] {
        &self.batches
    }

    /// Snapshots in tick order.
    pub fn snapshots(&self) -> &[StreakSnapshot] {
        &self.snapshots
    }

    /// Positions of every tracer after the last tick, in release order.
    pub fn final_positions(&self) -> &[Vec2] {
        &self.final_positions
    }

    /// Work and timing for the run.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}

/// Emits and advances streak tracers.
///
/// ```
/// use flowlines_fields::Uniform;
/// use flowlines_tracer::StreakEmitter;
///
/// let emitter = StreakEmitter::builder()
///     .steps(100)
///     .emission_period(10)
///     .sample_period(50)
///     .build()
///     .unwrap();
/// let streaks = emitter.run(&Uniform).unwrap();
/// assert_eq!(streaks.batches().len(), 10);
/// assert_eq!(streaks.snapshots().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StreakEmitter {
    dt: f64,
    steps: usize,
    release: Vec2,
    emission_period: usize,
    sample_period: usize,
}

/// Builder for [`StreakEmitter`].
///
/// Defaults: `dt = 0.01`, `steps = 500`, release at `(1, 0)`,
/// `emission_period = 10`, `sample_period = 100`.
#[derive(Clone, Debug)]
pub struct StreakEmitterBuilder {
    dt: f64,
    steps: usize,
    release: Vec2,
    emission_period: usize,
    sample_period: usize,
}

impl StreakEmitter {
    /// Create a builder with default settings.
    pub fn builder() -> StreakEmitterBuilder {
        StreakEmitterBuilder {
            dt: DEFAULT_DT,
            steps: DEFAULT_STEPS,
            release: DEFAULT_RELEASE,
            emission_period: DEFAULT_EMISSION_PERIOD,
            sample_period: DEFAULT_SAMPLE_PERIOD,
        }
    }

    /// The time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The number of ticks per run.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The release point.
    pub fn release(&self) -> Vec2 {
        self.release
    }

    /// Ticks between releases.
    pub fn emission_period(&self) -> usize {
        self.emission_period
    }

    /// Ticks between snapshots.
    pub fn sample_period(&self) -> usize {
        self.sample_period
    }

    /// Run the emitter through all ticks.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::NonFiniteVelocity`] if any live tracer meets a
    /// non-finite velocity; `particle` is the tracer's release index and
    /// `step` the tick.
    pub fn run<F>(&self, field: &F) -> Result<Streaklines, TraceError>
    where
        F: VelocityField + ?Sized,
    {
        let start = Instant::now();
        let expected = self
            .steps
            .div_ceil(self.emission_period)
            .min(crate::MAX_PREALLOC);
        let mut tracers: Vec<Vec2> = Vec::with_capacity(expected);
        let mut batches = Vec::with_capacity(expected);
        let mut snapshots = Vec::new();
        let mut velocities = Vec::with_capacity(expected);
        let mut evaluations = 0u64;

        for tick in 0..self.steps {
            let time = tick as f64 * self.dt;
            if tick % self.emission_period == 0 {
                batches.push(StreakBatch {
                    release_tick: tick,
                    release_time: time,
                    first_tracer: tracers.len(),
                    len: 1,
                });
                tracers.push(self.release);
            }

            step_with(field, &mut tracers, self.dt, &mut velocities)
                .map_err(|e| e.at_step(tick))?;
            evaluations += tracers.len() as u64;

            if tick % self.sample_period == 0 && !tracers.is_empty() {
                snapshots.push(StreakSnapshot {
                    tick,
                    time,
                    positions: tracers.clone(),
                });
            }
        }

        let metrics = RunMetrics {
            steps: self.steps as u64,
            field_evaluations: evaluations,
            elapsed_us: start.elapsed().as_micros() as u64,
        };
        debug!(
            tracers = tracers.len(),
            batches = batches.len(),
            snapshots = snapshots.len(),
            elapsed_us = metrics.elapsed_us,
            "streakline run complete"
        );
        Ok(Streaklines {
            batches,
            snapshots,
            final_positions: tracers,
            metrics,
        })
    }
}

impl StreakEmitterBuilder {
    /// Set the time step. Must be positive and finite.
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Set the number of ticks.
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Set the release point. Must be finite.
    pub fn release(mut self, release: Vec2) -> Self {
        self.release = release;
        self
    }

    /// Set the ticks between releases. Must be at least 1.
    pub fn emission_period(mut self, period: usize) -> Self {
        self.emission_period = period;
        self
    }

    /// Set the ticks between snapshots. Must be at least 1.
    pub fn sample_period(mut self, period: usize) -> Self {
        self.sample_period = period;
        self
    }

    /// Build the emitter, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `dt` is not positive and finite
    /// - either period is zero
    /// - the release point is not finite
    pub fn build(self) -> Result<StreakEmitter, ConfigError> {
        validate_dt(self.dt)?;
        if self.emission_period == 0 {
            return Err(ConfigError::ZeroPeriod { which: "emission" });
        }
        if self.sample_period == 0 {
            return Err(ConfigError::ZeroPeriod { which: "sampling" });
        }
        if !self.release.is_finite() {
            return Err(ConfigError::NonFinitePoint {
                which: "release point",
            });
        }
        Ok(StreakEmitter {
            dt: self.dt,
            steps: self.steps,
            release: self.release,
            emission_period: self.emission_period,
            sample_period: self.sample_period,
        })
    }
}

impl Default for StreakEmitterBuilder {
    fn default() -> Self {
        StreakEmitter::builder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowlines_test_utils::{ConstantField, CountingField, NonFiniteBeyond};

    // ---------------------------------------------------------------
    // Builder tests
    // ---------------------------------------------------------------

    #[test]
    fn builder_defaults() {
        let e = StreakEmitter::builder().build().unwrap();
        assert_eq!(e.dt(), 0.01);
        assert_eq!(e.steps(), 500);
        assert_eq!(e.release(), Vec2::new(1.0, 0.0));
        assert_eq!(e.emission_period(), 10);
        assert_eq!(e.sample_period(), 100);
    }

    #[test]
    fn builder_rejects_zero_periods() {
        assert_eq!(
            StreakEmitter::builder().emission_period(0).build(),
            Err(ConfigError::ZeroPeriod { which: "emission" })
        );
        assert_eq!(
            StreakEmitter::builder().sample_period(0).build(),
            Err(ConfigError::ZeroPeriod { which: "sampling" })
        );
    }

    #[test]
    fn builder_rejects_bad_dt_and_release() {
        assert!(StreakEmitter::builder().dt(0.0).build().is_err());
        assert!(matches!(
            StreakEmitter::builder()
                .release(Vec2::new(f64::NAN, 0.0))
                .build(),
            Err(ConfigError::NonFinitePoint { .. })
        ));
    }

    // ---------------------------------------------------------------
    // Cadence tests
    // ---------------------------------------------------------------

    #[test]
    fn release_cadence_and_live_population() {
        let e = StreakEmitter::builder()
            .steps(100)
            .emission_period(10)
            .sample_period(5)
            .build()
            .unwrap();
        let s = e.run(&ConstantField::new(1.0, 0.0)).unwrap();

        assert_eq!(s.batches().len(), 10);
        for (k, b) in s.batches().iter().enumerate() {
            assert_eq!(b.release_tick, k * 10);
            assert_eq!(b.first_tracer, k);
            assert_eq!(b.len, 1);
        }
        assert_eq!(s.snapshots().len(), 20);
        for snap in s.snapshots() {
            let released = s
                .batches()
                .iter()
                .filter(|b| b.release_tick <= snap.tick)
                .map(|b| b.len)
                .sum::<usize>();
            assert_eq!(snap.positions.len(), released);
        }
    }

    #[test]
    fn every_tracer_steps_once_per_tick() {
        let e = StreakEmitter::builder()
            .dt(0.5)
            .steps(20)
            .release(Vec2::ZERO)
            .emission_period(5)
            .sample_period(1)
            .build()
            .unwrap();
        let s = e.run(&ConstantField::new(1.0, 0.0)).unwrap();
        // A tracer released at tick r has taken (19 - r + 1) steps at the end.
        for b in s.batches() {
            let age = (20 - b.release_tick) as f64;
            assert_eq!(s.final_positions()[b.first_tracer], Vec2::new(0.5 * age, 0.0));
        }
    }

    #[test]
    fn snapshot_time_and_label() {
        let e = StreakEmitter::builder().steps(201).build().unwrap();
        let s = e.run(&ConstantField::new(0.0, 1.0)).unwrap();
        let ticks: Vec<usize> = s.snapshots().iter().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![0, 100, 200]);
        assert_eq!(s.snapshots()[1].label(), "t=1.00");
        assert_eq!(s.snapshots()[2].label(), "t=2.00");
    }

    #[test]
    fn zero_steps_yields_nothing() {
        let e = StreakEmitter::builder().steps(0).build().unwrap();
        let s = e.run(&ConstantField::new(1.0, 0.0)).unwrap();
        assert!(s.batches().is_empty());
        assert!(s.snapshots().is_empty());
        assert!(s.final_positions().is_empty());
    }

    #[test]
    fn metrics_count_live_tracer_evaluations() {
        let field = CountingField::new(ConstantField::new(1.0, 0.0));
        let e = StreakEmitter::builder()
            .steps(30)
            .emission_period(10)
            .build()
            .unwrap();
        let s = e.run(&field).unwrap();
        // 10 ticks with 1 tracer, 10 with 2, 10 with 3.
        assert_eq!(s.metrics().field_evaluations, 60);
        assert_eq!(field.calls(), 60);
        assert_eq!(s.metrics().steps, 30);
    }

    #[test]
    fn non_finite_velocity_aborts_run() {
        let e = StreakEmitter::builder()
            .dt(0.1)
            .steps(100)
            .release(Vec2::ZERO)
            .build()
            .unwrap();
        let err = e.run(&NonFiniteBeyond::stream(1.05, 1.0)).unwrap_err();
        assert!(matches!(
            err,
            TraceError::NonFiniteVelocity { particle: 0, step: 11, .. }
        ));
    }

    #[test]
    fn huge_tick_count_fails_cleanly() {
        let e = StreakEmitter::builder()
            .steps(usize::MAX)
            .emission_period(1)
            .release(Vec2::new(2.0, 0.0))
            .build()
            .unwrap();
        let err = e.run(&NonFiniteBeyond::stream(1.0, 1.0)).unwrap_err();
        assert!(matches!(
            err,
            TraceError::NonFiniteVelocity { particle: 0, step: 0, .. }
        ));
    }
}
