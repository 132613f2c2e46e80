//! Reusable velocity-field fixtures.
//!
//! - [`ConstantField`]: the same velocity everywhere.
//! - [`ShearField`]: u = y, v = 0, with vorticity exactly −1.
//! - [`NonFiniteBeyond`]: finite inside a radius, NaN outside.
//! - [`CountingField`]: wraps another field and counts evaluations.

use std::sync::atomic::{AtomicUsize, Ordering};

use flowlines_core::{Vec2, VelocityField};

/// Returns the same velocity at every position.
#[derive(Clone, Copy, Debug)]
pub struct ConstantField {
    pub velocity: Vec2,
}

impl ConstantField {
    pub fn new(u: f64, v: f64) -> Self {
        Self {
            velocity: Vec2::new(u, v),
        }
    }
}

impl VelocityField for ConstantField {
    fn velocity(&self, _p: Vec2) -> Vec2 {
        self.velocity
    }
}

/// Simple shear flow u = y, v = 0.
///
/// Central differences are exact on linear fields, so the estimated
/// vorticity is −1 up to rounding.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShearField;

impl VelocityField for ShearField {
    fn velocity(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.y, 0.0)
    }
}

/// Uniform +x stream of `speed` inside `radius`, NaN outside.
///
/// A particle seeded at the origin with step `dt` leaves the finite region
/// after a predictable number of steps.
#[derive(Clone, Copy, Debug)]
pub struct NonFiniteBeyond {
    pub radius: f64,
    pub speed: f64,
}

impl NonFiniteBeyond {
    pub fn stream(radius: f64, speed: f64) -> Self {
        Self { radius, speed }
    }
}

impl VelocityField for NonFiniteBeyond {
    fn velocity(&self, p: Vec2) -> Vec2 {
        if p.length() > self.radius {
            Vec2::new(f64::NAN, f64::NAN)
        } else {
            Vec2::new(self.speed, 0.0)
        }
    }
}

/// Wraps a field and counts point evaluations.
pub struct CountingField<F> {
    inner: F,
    calls: AtomicUsize,
}

impl<F: VelocityField> CountingField<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of point evaluations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<F: VelocityField> VelocityField for CountingField<F> {
    fn velocity(&self, p: Vec2) -> Vec2 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.velocity(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_beyond_radius() {
        let f = NonFiniteBeyond::stream(1.0, 0.5);
        assert_eq!(f.velocity(Vec2::new(0.5, 0.0)), Vec2::new(0.5, 0.0));
        assert!(!f.velocity(Vec2::new(1.5, 0.0)).is_finite());
    }

    #[test]
    fn counting_field_counts() {
        let f = CountingField::new(ShearField);
        f.velocity(Vec2::ZERO);
        f.velocity(Vec2::new(1.0, 1.0));
        assert_eq!(f.calls(), 2);
    }
}
