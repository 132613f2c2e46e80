//! The symbolic-engine seam.
//!
//! [`FieldCompiler`](crate::FieldCompiler) only talks to a backend through
//! [`SymbolicEngine`], so a different grammar or code generator can be
//! substituted without touching the compiler or its callers.

use std::fmt;

use ndarray::{ArrayD, ArrayViewD};

use crate::ast::Expr;
use crate::error::SyntaxError;
use crate::parser;
use crate::tape::Tape;

/// A compiled, vectorized scalar function of `(x, y)`.
pub trait ScalarProgram: Send + Sync + 'static {
    /// Evaluate at one point.
    fn eval(&self, x: f64, y: f64) -> f64;

    /// Evaluate over equal-shaped arrays, returning an array of the same
    /// shape. Shapes are checked by the caller.
    fn eval_grid(&self, xs: ArrayViewD<'_, f64>, ys: ArrayViewD<'_, f64>) -> ArrayD<f64>;
}

/// A backend that parses formula text and compiles validated expressions.
pub trait SymbolicEngine {
    /// A parsed and validated formula.
    type Validated: Clone + fmt::Display;
    /// The compiled form of a validated formula.
    type Program: ScalarProgram;

    /// Parse and validate one formula over `x` and `y`.
    fn parse(&self, source: &str) -> Result<Self::Validated, SyntaxError>;

    /// Compile a validated formula. Cannot fail.
    fn compile(&self, validated: &Self::Validated) -> Self::Program;
}

/// The default engine: recursive-descent parsing into [`Expr`], lowering
/// into [`Tape`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TapeEngine;

impl SymbolicEngine for TapeEngine {
    type Validated = Expr;
    type Program = Tape;

    fn parse(&self, source: &str) -> Result<Expr, SyntaxError> {
        parser::parse(source)
    }

    fn compile(&self, validated: &Expr) -> Tape {
        Tape::lower(validated)
    }
}

impl ScalarProgram for Tape {
    fn eval(&self, x: f64, y: f64) -> f64 {
        self.eval_point(x, y)
    }

    fn eval_grid(&self, xs: ArrayViewD<'_, f64>, ys: ArrayViewD<'_, f64>) -> ArrayD<f64> {
        Tape::eval_grid(self, xs, ys)
    }
}
