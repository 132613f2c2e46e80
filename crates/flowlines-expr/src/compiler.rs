//! [`FieldCompiler`]: two formulas in, one velocity field out.

use std::fmt;

use flowlines_core::{check_same_shape, FieldError, Vec2, VelocityField};
use ndarray::{ArrayD, ArrayViewD};
use tracing::debug;

use crate::engine::{ScalarProgram, SymbolicEngine, TapeEngine};
use crate::error::{Component, ParseError};

/// Compiles `u(x, y)` / `v(x, y)` formula pairs into velocity fields.
///
/// Generic over the [`SymbolicEngine`]; defaults to [`TapeEngine`].
#[derive(Clone, Debug, Default)]
pub struct FieldCompiler<E = TapeEngine> {
    engine: E,
}

/// Both formulas parsed and validated, not yet compiled.
#[derive(Clone, Debug)]
pub struct ParsedField<T> {
    /// Validated x-component.
    pub u: T,
    /// Validated y-component.
    pub v: T,
    u_source: String,
    v_source: String,
}

impl<T> ParsedField<T> {
    /// The x-component formula as given.
    pub fn u_source(&self) -> &str {
        &self.u_source
    }

    /// The y-component formula as given.
    pub fn v_source(&self) -> &str {
        &self.v_source
    }
}

impl<T: fmt::Display> fmt::Display for ParsedField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u = {}, v = {}", self.u, self.v)
    }
}

/// A velocity field compiled from user formulas.
///
/// Singularities in the formulas are inherited as-is: `1/x` at `x = 0`
/// evaluates to infinity.
pub struct CompiledField<P> {
    u: P,
    v: P,
    u_source: String,
    v_source: String,
}

impl<P> CompiledField<P> {
    /// The x-component formula as given.
    pub fn u_source(&self) -> &str {
        &self.u_source
    }

    /// The y-component formula as given.
    pub fn v_source(&self) -> &str {
        &self.v_source
    }
}

impl<P> fmt::Debug for CompiledField<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledField")
            .field("u", &self.u_source)
            .field("v", &self.v_source)
            .finish()
    }
}

impl<P: ScalarProgram> VelocityField for CompiledField<P> {
    fn velocity(&self, p: Vec2) -> Vec2 {
        Vec2::new(self.u.eval(p.x, p.y), self.v.eval(p.x, p.y))
    }

    fn velocity_grid(
        &self,
        xs: ArrayViewD<'_, f64>,
        ys: ArrayViewD<'_, f64>,
    ) -> Result<(ArrayD<f64>, ArrayD<f64>), FieldError> {
        check_same_shape(&xs, &ys)?;
        let us = self.u.eval_grid(xs.view(), ys.view());
        let vs = self.v.eval_grid(xs, ys);
        Ok((us, vs))
    }
}

impl FieldCompiler<TapeEngine> {
    /// A compiler using the default [`TapeEngine`].
    pub fn new() -> Self {
        Self { engine: TapeEngine }
    }
}

impl<E: SymbolicEngine> FieldCompiler<E> {
    /// A compiler using a custom engine.
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// Stage 1: parse and validate both formulas.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for the first formula (u before v) that fails.
    pub fn parse(&self, u_src: &str, v_src: &str) -> Result<ParsedField<E::Validated>, ParseError> {
        let u = self
            .engine
            .parse(u_src)
            .map_err(|cause| ParseError::new(Component::U, u_src, cause))?;
        let v = self
            .engine
            .parse(v_src)
            .map_err(|cause| ParseError::new(Component::V, v_src, cause))?;
        Ok(ParsedField {
            u,
            v,
            u_source: u_src.to_string(),
            v_source: v_src.to_string(),
        })
    }

    /// Stage 2: compile validated formulas into a field.
    pub fn lower(&self, parsed: &ParsedField<E::Validated>) -> CompiledField<E::Program> {
        let field = CompiledField {
            u: self.engine.compile(&parsed.u),
            v: self.engine.compile(&parsed.v),
            u_source: parsed.u_source.clone(),
            v_source: parsed.v_source.clone(),
        };
        debug!(u = %parsed.u, v = %parsed.v, "compiled custom velocity field");
        field
    }

    /// Both stages.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if either formula fails to parse or validate.
    pub fn compile(&self, u_src: &str, v_src: &str) -> Result<CompiledField<E::Program>, ParseError> {
        let parsed = self.parse(u_src, v_src)?;
        Ok(self.lower(&parsed))
    }
}
