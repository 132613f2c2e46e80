//! Flowlines: planar flow visualization.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Flowlines sub-crates and adds the pieces that tie them together: the
//! selection boundary, streamline grid sampling, run configuration and the
//! one-call [`visualize`] driver.
//!
//! # Quick start
//!
//! ```rust
//! use flowlines::prelude::*;
//!
//! // Pick a flow the way an interactive menu would.
//! let selected = select_flow("5", Some(&CustomFormulas::new("-y", "x")));
//! assert!(selected.fallback.is_none());
//!
//! // Shorter runs than the defaults.
//! let mut config = VisualizationConfig::default();
//! config.grid.resolution = 20;
//! config.pathlines.steps = 100;
//! config.streaklines.steps = 100;
//!
//! let report = visualize(&selected.flow, &config).unwrap();
//! assert!(report.is_complete());
//! let vorticity = report.vorticity.unwrap();
//! assert_eq!(vorticity.sample.rotationality, Rotationality::Rotational);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `flowlines-core` | `Vec2`, `VelocityField`, `NamedField`, shared errors |
//! | [`fields`] | `flowlines-fields` | Analytic flows and the `FieldLibrary` registry |
//! | [`expr`] | `flowlines-expr` | Formula-to-field compiler |
//! | [`tracer`] | `flowlines-tracer` | Pathlines and streaklines |
//! | [`diag`] | `flowlines-diag` | Vorticity estimation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits and errors (`flowlines-core`).
pub use flowlines_core as types;

/// Analytic reference flows and their registry (`flowlines-fields`).
pub use flowlines_fields as fields;

/// Formula-to-velocity-field compiler (`flowlines-expr`).
pub use flowlines_expr as expr;

/// Explicit-Euler particle tracing (`flowlines-tracer`).
pub use flowlines_tracer as tracer;

/// Finite-difference diagnostics (`flowlines-diag`).
pub use flowlines_diag as diag;

pub mod config;
pub mod error;
pub mod selection;
pub mod streamlines;
pub mod visualize;

pub use config::{PathlineConfig, StreaklineConfig, VisualizationConfig, VorticityConfig};
pub use error::VisualizeError;
pub use selection::{select_flow, CustomFormulas, Fallback, FlowSelector, SelectedFlow};
pub use streamlines::{sample_grid, GridSpec, SampledGrid};
pub use visualize::{visualize, FlowReport};

/// Common imports for typical Flowlines usage.
///
/// ```rust
/// use flowlines::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use flowlines_core::{NamedField, Vec2, VelocityField};

    // Errors
    pub use flowlines_core::{ConfigError, FieldError};
    pub use flowlines_diag::DiagnosticError;
    pub use flowlines_expr::ParseError;
    pub use flowlines_tracer::TraceError;

    // Fields
    pub use flowlines_expr::FieldCompiler;
    pub use flowlines_fields::FieldLibrary;

    // Tracing and diagnostics
    pub use flowlines_diag::{Rotationality, VorticityEstimator};
    pub use flowlines_tracer::{Integrator, StreakEmitter};

    // Facade
    pub use crate::{
        select_flow, visualize, CustomFormulas, FlowReport, GridSpec, VisualizationConfig,
        VisualizeError,
    };
}
