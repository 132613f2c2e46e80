//! Flow diagnostics for Flowlines.
//!
//! [`VorticityEstimator`] approximates the scalar vorticity
//! ω = ∂v/∂x − ∂u/∂y of any [`VelocityField`](flowlines_core::VelocityField)
//! with central differences and classifies the flow at a point as
//! rotational or irrotational.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod vorticity;

pub use error::DiagnosticError;
pub use vorticity::{
    Rotationality, VorticityEstimator, VorticityReport, VorticitySample, DEFAULT_PERTURBATION,
    DEFAULT_THRESHOLD,
};
