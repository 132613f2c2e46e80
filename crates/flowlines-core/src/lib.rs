//! Core types and traits for the Flowlines flow-visualization toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Flowlines workspace:
//! the [`Vec2`] point/velocity type, the [`VelocityField`] trait with its
//! point and grid call forms, and the shared error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod vec2;

pub use error::{validate_dt, ConfigError, FieldError};
pub use field::{check_same_shape, NamedField, VelocityField};
pub use vec2::Vec2;
