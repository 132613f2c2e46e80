//! Visualization configuration, defaults and validation.
//!
//! [`VisualizationConfig`] is the input to [`visualize`](crate::visualize).
//! Each stage has its own plain config struct with a [`Default`] matching
//! the reference visualization and a `validate()` that checks it without
//! running anything.

use flowlines_core::{ConfigError, Vec2};
use flowlines_diag::VorticityEstimator;
use flowlines_tracer::{Integrator, StreakEmitter};

use crate::streamlines::GridSpec;

// ── PathlineConfig ─────────────────────────────────────────────────

/// Pathline stage settings.
#[derive(Clone, Debug, PartialEq)]
pub struct PathlineConfig {
    /// Time step. Default: 0.01.
    pub dt: f64,
    /// Steps per particle. Default: 800.
    pub steps: usize,
    /// Seed positions. Default: (1, 0), (0.5, 0.5), (0, 1).
    pub seeds: Vec<Vec2>,
}

impl Default for PathlineConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            steps: 800,
            seeds: vec![Vec2::new(1.0, 0.0), Vec2::new(0.5, 0.5), Vec2::new(0.0, 1.0)],
        }
    }
}

impl PathlineConfig {
    /// Build the configured [`Integrator`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeStep`] for a bad `dt`.
    pub fn integrator(&self) -> Result<Integrator, ConfigError> {
        Integrator::builder().dt(self.dt).steps(self.steps).build()
    }

    /// Check the settings.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `dt` is invalid or any seed is not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.integrator()?;
        if self.seeds.iter().any(|s| !s.is_finite()) {
            return Err(ConfigError::NonFinitePoint { which: "seed" });
        }
        Ok(())
    }
}

// ── StreaklineConfig ───────────────────────────────────────────────

/// Streakline stage settings.
#[derive(Clone, Debug, PartialEq)]
pub struct StreaklineConfig {
    /// Time step. Default: 0.01.
    pub dt: f64,
    /// Ticks. Default: 500.
    pub steps: usize,
    /// Release point. Default: (1, 0).
    pub release: Vec2,
    /// Ticks between releases. Default: 10.
    pub emission_period: usize,
    /// Ticks between snapshots. Default: 100.
    pub sample_period: usize,
}

impl Default for StreaklineConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            steps: 500,
            release: Vec2::new(1.0, 0.0),
            emission_period: 10,
            sample_period: 100,
        }
    }
}

impl StreaklineConfig {
    /// Build the configured [`StreakEmitter`].
    ///
    /// # Errors
    ///
    /// As for [`StreakEmitterBuilder::build`](flowlines_tracer::StreakEmitterBuilder::build).
    pub fn emitter(&self) -> Result<StreakEmitter, ConfigError> {
        StreakEmitter::builder()
            .dt(self.dt)
            .steps(self.steps)
            .release(self.release)
            .emission_period(self.emission_period)
            .sample_period(self.sample_period)
            .build()
    }

    /// Check the settings.
    ///
    /// # Errors
    ///
    /// As for [`emitter`](Self::emitter).
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.emitter().map(|_| ())
    }
}

// ── VorticityConfig ────────────────────────────────────────────────

/// Vorticity diagnostic settings.
#[derive(Clone, Debug, PartialEq)]
pub struct VorticityConfig {
    /// Finite-difference perturbation δ. Default: 1e-5.
    pub perturbation: f64,
    /// Irrotational if |ω| is below this. Default: 1e-6.
    pub threshold: f64,
    /// Where the diagnostic is evaluated. Default: (1, 1).
    pub point: Vec2,
}

impl Default for VorticityConfig {
    fn default() -> Self {
        Self {
            perturbation: flowlines_diag::DEFAULT_PERTURBATION,
            threshold: flowlines_diag::DEFAULT_THRESHOLD,
            point: Vec2::new(1.0, 1.0),
        }
    }
}

impl VorticityConfig {
    /// Build the configured [`VorticityEstimator`].
    ///
    /// # Errors
    ///
    /// As for [`VorticityEstimator::new`].
    pub fn estimator(&self) -> Result<VorticityEstimator, ConfigError> {
        VorticityEstimator::new(self.perturbation, self.threshold)
    }

    /// Check the settings.
    ///
    /// # Errors
    ///
    /// Returns `Err` for a bad perturbation or threshold, or a non-finite
    /// evaluation point.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.estimator()?;
        if !self.point.is_finite() {
            return Err(ConfigError::NonFinitePoint {
                which: "reference point",
            });
        }
        Ok(())
    }
}

// ── VisualizationConfig ────────────────────────────────────────────

/// Settings for every stage of a visualization run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualizationConfig {
    /// Streamline sampling grid.
    pub grid: GridSpec,
    /// Pathline stage.
    pub pathlines: PathlineConfig,
    /// Streakline stage.
    pub streaklines: StreaklineConfig,
    /// Vorticity diagnostic.
    pub vorticity: VorticityConfig,
}

impl VisualizationConfig {
    /// Check every stage.
    ///
    /// # Errors
    ///
    /// Returns the first stage error, checked in run order: grid,
    /// pathlines, streaklines, vorticity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.pathlines.validate()?;
        self.streaklines.validate()?;
        self.vorticity.validate()?;
        Ok(())
    }
}
