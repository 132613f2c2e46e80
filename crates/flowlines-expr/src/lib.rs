//! Formula-to-velocity-field compiler for Flowlines.
//!
//! [`FieldCompiler`] turns two formula strings, one per velocity component,
//! into a [`CompiledField`] implementing
//! [`VelocityField`](flowlines_core::VelocityField). Compilation is an
//! explicit two-stage pipeline:
//!
//! 1. [`FieldCompiler::parse`]: parse and validate both formulas over the
//!    coordinate symbols `x` and `y`, failing with [`ParseError`].
//! 2. [`FieldCompiler::lower`]: lower the validated expressions into
//!    vectorized programs.
//!
//! The symbolic engine sits behind the [`SymbolicEngine`] trait. The
//! default [`TapeEngine`] parses a Python-flavoured arithmetic grammar into
//! an [`Expr`] tree and lowers it to a linear [`Tape`].
//!
//! ```
//! use flowlines_core::{Vec2, VelocityField};
//! use flowlines_expr::FieldCompiler;
//!
//! let field = FieldCompiler::new().compile("-y", "x").unwrap();
//! assert_eq!(field.velocity(Vec2::new(1.0, 2.0)), Vec2::new(-2.0, 1.0));
//!
//! assert!(FieldCompiler::new().compile("(x + 1", "y").is_err());
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod ast;
pub mod compiler;
pub mod engine;
pub mod error;
mod lexer;
mod parser;
pub mod tape;

pub use ast::{Axis, BinOp, Expr, UnaryFn};
pub use compiler::{CompiledField, FieldCompiler, ParsedField};
pub use engine::{ScalarProgram, SymbolicEngine, TapeEngine};
pub use error::{Component, ParseError, SyntaxError};
pub use parser::MAX_DEPTH;
pub use tape::Tape;
