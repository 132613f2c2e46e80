//! Test utilities and mock types for Flowlines development.
//!
//! Provides mock [`VelocityField`](flowlines_core::VelocityField)
//! implementations with known analytic behavior, plus fields that fail in
//! controlled ways, for exercising the tracer and diagnostics.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{ConstantField, CountingField, NonFiniteBeyond, ShearField};

use flowlines_core::Vec2;

/// Assert two vectors agree componentwise within `tol`.
#[track_caller]
pub fn assert_vec2_near(actual: Vec2, expected: Vec2, tol: f64) {
    assert!(
        (actual.x - expected.x).abs() <= tol && (actual.y - expected.y).abs() <= tol,
        "expected {expected} within {tol}, got {actual}"
    );
}
