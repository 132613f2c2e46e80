//! Analytic reference velocity fields for Flowlines.
//!
//! Provides the four classic planar flows, each a zero-sized
//! [`VelocityField`](flowlines_core::VelocityField) with a closed-form
//! grid evaluation, and the [`FieldLibrary`] registry that maps menu keys
//! to named fields in a stable order.
//!
//! | Field | u | v |
//! |-------|---|---|
//! | [`Vortex`] | −y | x |
//! | [`Uniform`] | 1 | 0 |
//! | [`Source`] | x/r² | y/r² |
//! | [`Doublet`] | (x²−y²)/r⁴ | 2xy/r⁴ |
//!
//! with r² = x² + y² + [`SINGULARITY_EPSILON`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod analytic;
pub mod library;

pub use analytic::{Doublet, Source, Uniform, Vortex, SINGULARITY_EPSILON};
pub use library::{FieldLibrary, LibraryEntry};
