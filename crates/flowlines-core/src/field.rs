//! The [`VelocityField`] trait and [`NamedField`] handle.

use std::fmt;
use std::sync::Arc;

use ndarray::{ArrayD, ArrayViewD, Zip};

use crate::error::FieldError;
use crate::vec2::Vec2;

/// A steady 2D velocity field.
///
/// # Contract
///
/// - Pure: the same position always yields the same velocity.
/// - Two call forms with identical semantics:
///   [`velocity`](VelocityField::velocity) for a single point and
///   [`velocity_grid`](VelocityField::velocity_grid) for equal-shaped
///   coordinate arrays of any dimensionality.
/// - The grid form returns arrays with exactly the input shape, elementwise
///   equal to the point form at each corresponding pair.
///
/// Fields are immutable once constructed and are shared read-only,
/// typically as `Arc<dyn VelocityField>`.
///
/// # Examples
///
/// ```
/// use flowlines_core::{Vec2, VelocityField};
///
/// struct Shear;
///
/// impl VelocityField for Shear {
///     fn velocity(&self, p: Vec2) -> Vec2 {
///         Vec2::new(p.y, 0.0)
///     }
/// }
///
/// assert_eq!(Shear.velocity(Vec2::new(0.0, 2.0)), Vec2::new(2.0, 0.0));
/// ```
pub trait VelocityField: Send + Sync {
    /// Velocity at a single point.
    fn velocity(&self, p: Vec2) -> Vec2;

    /// Velocity over a grid of points given as two equal-shaped arrays.
    ///
    /// The default implementation evaluates [`velocity`](Self::velocity)
    /// elementwise. Implementors with closed-form expressions override it
    /// with whole-array arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] if `xs` and `ys` differ in shape.
    fn velocity_grid(
        &self,
        xs: ArrayViewD<'_, f64>,
        ys: ArrayViewD<'_, f64>,
    ) -> Result<(ArrayD<f64>, ArrayD<f64>), FieldError> {
        check_same_shape(&xs, &ys)?;
        let mut us = ArrayD::zeros(xs.raw_dim());
        let mut vs = ArrayD::zeros(xs.raw_dim());
        Zip::from(&mut us)
            .and(&mut vs)
            .and(&xs)
            .and(&ys)
            .for_each(|u, v, &x, &y| {
                let vel = self.velocity(Vec2::new(x, y));
                *u = vel.x;
                *v = vel.y;
            });
        Ok((us, vs))
    }
}

impl<F: VelocityField + ?Sized> VelocityField for Arc<F> {
    fn velocity(&self, p: Vec2) -> Vec2 {
        (**self).velocity(p)
    }

    fn velocity_grid(
        &self,
        xs: ArrayViewD<'_, f64>,
        ys: ArrayViewD<'_, f64>,
    ) -> Result<(ArrayD<f64>, ArrayD<f64>), FieldError> {
        (**self).velocity_grid(xs, ys)
    }
}

impl<F: VelocityField + ?Sized> VelocityField for &F {
    fn velocity(&self, p: Vec2) -> Vec2 {
        (**self).velocity(p)
    }

    fn velocity_grid(
        &self,
        xs: ArrayViewD<'_, f64>,
        ys: ArrayViewD<'_, f64>,
    ) -> Result<(ArrayD<f64>, ArrayD<f64>), FieldError> {
        (**self).velocity_grid(xs, ys)
    }
}

/// Check that two coordinate arrays share a shape.
pub fn check_same_shape(
    xs: &ArrayViewD<'_, f64>,
    ys: &ArrayViewD<'_, f64>,
) -> Result<(), FieldError> {
    if xs.shape() == ys.shape() {
        Ok(())
    } else {
        Err(FieldError::ShapeMismatch {
            x: xs.shape().to_vec(),
            y: ys.shape().to_vec(),
        })
    }
}

/// A velocity field paired with its display name.
///
/// Passed explicitly to every consumer that reports by name; there is no
/// process-wide "current field".
#[derive(Clone)]
pub struct NamedField {
    name: String,
    field: Arc<dyn VelocityField>,
}

impl NamedField {
    /// Pair a field with a display name.
    pub fn new(name: impl Into<String>, field: Arc<dyn VelocityField>) -> Self {
        Self {
            name: name.into(),
            field,
        }
    }

    /// Display name, e.g. `"Vortex Flow"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared field.
    pub fn field(&self) -> &Arc<dyn VelocityField> {
        &self.field
    }
}

impl fmt::Debug for NamedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedField")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
