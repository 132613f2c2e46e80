//! One-call visualization of a named flow.

use std::fmt;
use std::time::Instant;

use flowlines_core::{FieldError, NamedField};
use flowlines_diag::{DiagnosticError, VorticityReport};
use flowlines_tracer::{Pathlines, Streaklines, TraceError};
use tracing::{debug, info_span, warn};

use crate::config::VisualizationConfig;
use crate::error::VisualizeError;
use crate::streamlines::{sample_validated, SampledGrid};

/// Everything a renderer needs to draw one flow.
///
/// The four stages run independently: a numerical failure in one is
/// recorded on its field and the others still report.
#[derive(Clone, Debug)]
pub struct FlowReport {
    /// Display name of the flow.
    pub flow_name: String,
    /// Velocity sampled over the streamline grid.
    pub grid: Result<SampledGrid, FieldError>,
    /// Pathlines from the configured seeds.
    pub pathlines: Result<Pathlines, TraceError>,
    /// Streaklines from the configured release point.
    pub streaklines: Result<Streaklines, TraceError>,
    /// Vorticity at the configured reference point.
    pub vorticity: Result<VorticityReport, DiagnosticError>,
}

impl FlowReport {
    /// Returns `true` if every stage succeeded.
    pub fn is_complete(&self) -> bool {
        self.grid.is_ok()
            && self.pathlines.is_ok()
            && self.streaklines.is_ok()
            && self.vorticity.is_ok()
    }

    /// The failed stages in run order, as aggregate errors.
    pub fn failures(&self) -> Vec<VisualizeError> {
        let mut out = Vec::new();
        if let Err(e) = &self.grid {
            out.push(VisualizeError::Field(e.clone()));
        }
        if let Err(e) = &self.pathlines {
            out.push(VisualizeError::Trace(e.clone()));
        }
        if let Err(e) = &self.streaklines {
            out.push(VisualizeError::Trace(e.clone()));
        }
        if let Err(e) = &self.vorticity {
            out.push(VisualizeError::Diagnostic(e.clone()));
        }
        out
    }
}

/// A short text summary: one line per stage, then the vorticity report. A
/// failed stage prints its error in place of its summary.
impl fmt::Display for FlowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.flow_name)?;
        match &self.grid {
            Ok(grid) => {
                let max_speed = grid.speed().iter().copied().fold(0.0f64, f64::max);
                writeln!(
                    f,
                    "streamlines: {n}x{n} grid, max speed {max_speed:.4}",
                    n = grid.resolution()
                )?;
            }
            Err(e) => writeln!(f, "streamlines: failed: {e}")?,
        }
        match &self.pathlines {
            Ok(pathlines) => {
                writeln!(
                    f,
                    "pathlines: {} particles, {} steps",
                    pathlines.len(),
                    pathlines.metrics().steps
                )?;
                for (i, t) in pathlines.trajectories().iter().enumerate() {
                    writeln!(f, "  #{i}: {} -> {}", t.start(), t.end())?;
                }
            }
            Err(e) => writeln!(f, "pathlines: failed: {e}")?,
        }
        match &self.streaklines {
            Ok(streaklines) => {
                writeln!(
                    f,
                    "streaklines: {} tracers, {} snapshots",
                    streaklines.final_positions().len(),
                    streaklines.snapshots().len()
                )?;
                for snap in streaklines.snapshots() {
                    writeln!(f, "  {}: {} tracers", snap.label(), snap.positions.len())?;
                }
            }
            Err(e) => writeln!(f, "streaklines: failed: {e}")?,
        }
        match &self.vorticity {
            Ok(report) => write!(f, "{report}"),
            Err(e) => write!(f, "vorticity: failed: {e}"),
        }
    }
}

/// Run every stage for `flow`: grid sampling, pathlines, streaklines and
/// the vorticity diagnostic.
///
/// # Errors
///
/// Only an invalid configuration fails the call, before any evaluation.
/// Stage failures are recorded on the returned [`FlowReport`] and logged.
///
/// # Examples
///
/// ```
/// use flowlines::{select_flow, visualize, VisualizationConfig};
///
/// let selected = select_flow("2", None);
/// let report = visualize(&selected.flow, &VisualizationConfig::default()).unwrap();
/// assert!(report.is_complete());
/// assert_eq!(report.pathlines.as_ref().unwrap().trajectories()[0].len(), 801);
/// assert!(report.to_string().ends_with("Uniform Flow is irrotational."));
/// ```
pub fn visualize(
    flow: &NamedField,
    config: &VisualizationConfig,
) -> Result<FlowReport, VisualizeError> {
    let _span = info_span!("visualize", flow = flow.name()).entered();
    let start = Instant::now();
    config.validate()?;
    let integrator = config.pathlines.integrator()?;
    let emitter = config.streaklines.emitter()?;
    let estimator = config.vorticity.estimator()?;

    let field = flow.field();
    let grid = sample_validated(field, &config.grid);
    let pathlines = integrator.pathlines(field, &config.pathlines.seeds);
    let streaklines = emitter.run(field);
    let vorticity = estimator.report(flow, config.vorticity.point);

    let report = FlowReport {
        flow_name: flow.name().to_string(),
        grid,
        pathlines,
        streaklines,
        vorticity,
    };
    for e in report.failures() {
        warn!(error = %e, "visualization stage failed");
    }
    debug!(
        elapsed_us = start.elapsed().as_micros() as u64,
        complete = report.is_complete(),
        "visualization complete"
    );
    Ok(report)
}
