//! Closed-form planar flows.
//!
//! Each field evaluates the same expression in both call forms: the point
//! form on two `f64`s, the grid form with whole-array arithmetic. Fields
//! with a singularity at the origin add [`SINGULARITY_EPSILON`] to the
//! squared radius so every evaluation stays finite.

use flowlines_core::{check_same_shape, FieldError, Vec2, VelocityField};
use ndarray::{ArrayD, ArrayViewD};

/// Stabilizing offset added to r² by [`Source`] and [`Doublet`].
///
/// Trades accuracy within ~1e-3 of the origin for finiteness everywhere.
pub const SINGULARITY_EPSILON: f64 = 1e-6;

/// Solid-body rotation: u = −y, v = x. Vorticity is 2 everywhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vortex;

/// Uniform stream along +x: u = 1, v = 0. Vorticity is 0 everywhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uniform;

/// Point source at the origin: u = x/r², v = y/r².
#[derive(Clone, Copy, Debug, Default)]
pub struct Source;

/// Doublet at the origin: u = (x² − y²)/r⁴, v = 2xy/r⁴.
#[derive(Clone, Copy, Debug, Default)]
pub struct Doublet;

type GridResult = Result<(ArrayD<f64>, ArrayD<f64>), FieldError>;

impl VelocityField for Vortex {
    fn velocity(&self, p: Vec2) -> Vec2 {
        Vec2::new(-p.y, p.x)
    }

    fn velocity_grid(&self, xs: ArrayViewD<'_, f64>, ys: ArrayViewD<'_, f64>) -> GridResult {
        check_same_shape(&xs, &ys)?;
        Ok((ys.mapv(|y| -y), xs.to_owned()))
    }
}

impl VelocityField for Uniform {
    fn velocity(&self, _p: Vec2) -> Vec2 {
        Vec2::new(1.0, 0.0)
    }

    fn velocity_grid(&self, xs: ArrayViewD<'_, f64>, ys: ArrayViewD<'_, f64>) -> GridResult {
        check_same_shape(&xs, &ys)?;
        // Full arrays, never broadcast scalars: consumers index elementwise.
        Ok((ArrayD::ones(xs.raw_dim()), ArrayD::zeros(xs.raw_dim())))
    }
}

fn radius_sq(x: f64, y: f64) -> f64 {
    x * x + y * y + SINGULARITY_EPSILON
}

fn radius_sq_grid(xs: &ArrayViewD<'_, f64>, ys: &ArrayViewD<'_, f64>) -> ArrayD<f64> {
    let mut r2 = xs * xs + ys * ys;
    r2 += SINGULARITY_EPSILON;
    r2
}

impl VelocityField for Source {
    fn velocity(&self, p: Vec2) -> Vec2 {
        let r2 = radius_sq(p.x, p.y);
        Vec2::new(p.x / r2, p.y / r2)
    }

    fn velocity_grid(&self, xs: ArrayViewD<'_, f64>, ys: ArrayViewD<'_, f64>) -> GridResult {
        check_same_shape(&xs, &ys)?;
        let r2 = radius_sq_grid(&xs, &ys);
        Ok((&xs / &r2, &ys / &r2))
    }
}

impl VelocityField for Doublet {
    fn velocity(&self, p: Vec2) -> Vec2 {
        let r2 = radius_sq(p.x, p.y);
        let r4 = r2 * r2;
        Vec2::new((p.x * p.x - p.y * p.y) / r4, p.x * 2.0 * p.y / r4)
    }

    fn velocity_grid(&self, xs: ArrayViewD<'_, f64>, ys: ArrayViewD<'_, f64>) -> GridResult {
        check_same_shape(&xs, &ys)?;
        let r2 = radius_sq_grid(&xs, &ys);
        let r4 = &r2 * &r2;
        let u = (&xs * &xs - &ys * &ys) / &r4;
        let v = (&xs * 2.0) * &ys / &r4;
        Ok((u, v))
    }
}
