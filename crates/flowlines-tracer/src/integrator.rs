//! Pathline integration.
//!
//! Constructed via the builder pattern: [`Integrator::builder`].

use std::time::Instant;

use flowlines_core::{validate_dt, ConfigError, Vec2, VelocityField};
use tracing::debug;

use crate::error::TraceError;
use crate::euler::step_with;
use crate::metrics::RunMetrics;
use crate::trajectory::Trajectory;

/// Default time step.
pub const DEFAULT_DT: f64 = 0.01;
/// Default number of steps.
pub const DEFAULT_STEPS: usize = 800;

/// Advances seed particles through a steady field with forward Euler.
///
/// # Construction
///
/// ```
/// use flowlines_core::Vec2;
/// use flowlines_fields::Uniform;
/// use flowlines_tracer::Integrator;
///
/// let integrator = Integrator::builder().dt(0.01).steps(100).build().unwrap();
/// let paths = integrator.pathlines(&Uniform, &[Vec2::new(0.0, 0.0)]).unwrap();
/// assert_eq!(paths.trajectories()[0].len(), 101);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Integrator {
    dt: f64,
    steps: usize,
}

/// Builder for [`Integrator`].
///
/// Defaults: `dt = 0.01`, `steps = 800`.
#[derive(Clone, Debug)]
pub struct IntegratorBuilder {
    dt: f64,
    steps: usize,
}

/// The output of [`Integrator::pathlines`]: one trajectory per seed, in
/// seed order.
#[derive(Clone, Debug)]
pub struct Pathlines {
    trajectories: Vec<Trajectory>,
    dt: f64,
    metrics: RunMetrics,
}

impl Pathlines {
    /// Trajectories, index `i` belonging to seed `i`.
    pub fn trajectories(&self) -> &[Trajectory] {
        &self.trajectories
    }

    /// Consume into the trajectories.
    pub fn into_trajectories(self) -> Vec<Trajectory> {
        self.trajectories
    }

    /// Number of trajectories.
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    /// Returns `true` if there were no seeds.
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// The time step used.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Work and timing for the run.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}

impl Integrator {
    /// Create a builder with default settings.
    pub fn builder() -> IntegratorBuilder {
        IntegratorBuilder {
            dt: DEFAULT_DT,
            steps: DEFAULT_STEPS,
        }
    }

    /// The time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The number of steps per run.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Trace pathlines from `seeds`.
    ///
    /// Each returned trajectory holds `steps + 1` positions. An empty seed
    /// set yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::NonFiniteVelocity`] if the field yields a
    /// non-finite velocity for any particle at any step; no partial result
    /// is returned.
    pub fn pathlines<F>(&self, field: &F, seeds: &[Vec2]) -> Result<Pathlines, TraceError>
    where
        F: VelocityField + ?Sized,
    {
        let start = Instant::now();
        let mut positions = seeds.to_vec();
        let mut trajectories: Vec<Trajectory> = seeds
            .iter()
            .map(|&s| Trajectory::with_capacity(s, self.steps.saturating_add(1)))
            .collect();
        let mut velocities = Vec::with_capacity(seeds.len());

        for step in 0..self.steps {
            step_with(field, &mut positions, self.dt, &mut velocities)
                .map_err(|e| e.at_step(step))?;
            for (t, &p) in trajectories.iter_mut().zip(&positions) {
                t.push(p);
            }
        }

        let metrics = self.metrics_for(seeds.len(), start);
        debug!(
            particles = seeds.len(),
            steps = self.steps,
            elapsed_us = metrics.elapsed_us,
            "pathline run complete"
        );
        Ok(Pathlines {
            trajectories,
            dt: self.dt,
            metrics,
        })
    }

    /// Advance `positions` in place through all steps, keeping only the
    /// final positions.
    ///
    /// # Errors
    ///
    /// As for [`pathlines`](Self::pathlines). On error, `positions` holds
    /// the positions at the start of the failing step.
    pub fn advance<F>(&self, field: &F, positions: &mut [Vec2]) -> Result<RunMetrics, TraceError>
    where
        F: VelocityField + ?Sized,
    {
        let start = Instant::now();
        let mut velocities = Vec::with_capacity(positions.len());
        for step in 0..self.steps {
            step_with(field, positions, self.dt, &mut velocities).map_err(|e| e.at_step(step))?;
        }
        Ok(self.metrics_for(positions.len(), start))
    }

    fn metrics_for(&self, particles: usize, start: Instant) -> RunMetrics {
        RunMetrics {
            steps: self.steps as u64,
            field_evaluations: (self.steps as u64).saturating_mul(particles as u64),
            elapsed_us: start.elapsed().as_micros() as u64,
        }
    }
}

impl IntegratorBuilder {
    /// Set the time step. Must be positive and finite.
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Set the number of steps. Zero is allowed and yields seed-only
    /// trajectories.
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Build the integrator, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeStep`] if `dt` is not positive and
    /// finite.
    pub fn build(self) -> Result<Integrator, ConfigError> {
        validate_dt(self.dt)?;
        Ok(Integrator {
            dt: self.dt,
            steps: self.steps,
        })
    }
}

impl Default for IntegratorBuilder {
    fn default() -> Self {
        Integrator::builder()
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
        let i = Integrator::builder().build().unwrap();
        assert_eq!(i.dt(), 0.01);
        assert_eq!(i.steps(), 800);
    }

    #[test]
    fn builder_rejects_bad_dt() {
        for dt in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let err = Integrator::builder().dt(dt).build().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTimeStep { .. }));
        }
    }

    // ---------------------------------------------------------------
    // Run tests
    // ---------------------------------------------------------------

    #[test]
    fn trajectories_have_steps_plus_one_points() {
        let i = Integrator::builder().dt(0.1).steps(7).build().unwrap();
        let seeds = [Vec2::ZERO, Vec2::new(1.0, 1.0)];
        let p = i.pathlines(&ConstantField::new(1.0, 0.0), &seeds).unwrap();
        assert_eq!(p.len(), 2);
        for (t, &s) in p.trajectories().iter().zip(&seeds) {
            assert_eq!(t.len(), 8);
            assert_eq!(t.start(), s);
        }
    }

    #[test]
    fn zero_steps_returns_seeds() {
        let i = Integrator::builder().steps(0).build().unwrap();
        let p = i
            .pathlines(&ConstantField::new(1.0, 0.0), &[Vec2::new(3.0, 4.0)])
            .unwrap();
        assert_eq!(p.trajectories()[0].points(), &[Vec2::new(3.0, 4.0)]);
    }

    #[test]
    fn empty_seeds_yield_empty_result() {
        let i = Integrator::builder().build().unwrap();
        let p = i.pathlines(&ConstantField::new(1.0, 0.0), &[]).unwrap();
        assert!(p.is_empty());
        assert_eq!(p.metrics().field_evaluations, 0);
    }

    #[test]
    fn metrics_count_evaluations() {
        let field = CountingField::new(ConstantField::new(0.0, 1.0));
        let i = Integrator::builder().steps(25).build().unwrap();
        let p = i.pathlines(&field, &[Vec2::ZERO; 3]).unwrap();
        assert_eq!(p.metrics().steps, 25);
        assert_eq!(p.metrics().field_evaluations, 75);
        assert_eq!(field.calls(), 75);
    }

    #[test]
    fn non_finite_velocity_aborts_with_step() {
        // Speed 1, dt 0.1: x = 0.1·k after k steps; leaves radius 1.05 on
        // step 11 (x = 1.1).
        let field = NonFiniteBeyond::stream(1.05, 1.0);
        let i = Integrator::builder().dt(0.1).steps(50).build().unwrap();
        let err = i.pathlines(&field, &[Vec2::ZERO]).unwrap_err();
        match err {
            TraceError::NonFiniteVelocity { particle, step, position } => {
                assert_eq!(particle, 0);
                assert_eq!(step, 11);
                assert!(position.x > 1.05);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn advance_matches_trajectory_end() {
        let i = Integrator::builder().dt(0.05).steps(40).build().unwrap();
        let field = ConstantField::new(0.5, -0.25);
        let seeds = [Vec2::new(0.2, 0.3), Vec2::new(-1.0, 0.0)];
        let p = i.pathlines(&field, &seeds).unwrap();
        let mut ps = seeds;
        let m = i.advance(&field, &mut ps).unwrap();
        assert_eq!(m.steps, 40);
        for (t, &end) in p.trajectories().iter().zip(&ps) {
            assert_eq!(t.end(), end);
        }
    }

    #[test]
    fn huge_step_count_fails_cleanly() {
        // The seed starts outside the finite region, so the run stops at
        // step 0 without reserving a buffer per step.
        let i = Integrator::builder().steps(usize::MAX).build().unwrap();
        let err = i
            .pathlines(&NonFiniteBeyond::stream(1.0, 1.0), &[Vec2::new(2.0, 0.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            TraceError::NonFiniteVelocity { particle: 0, step: 0, .. }
        ));
    }
}
