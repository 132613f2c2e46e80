//! The explicit-Euler kernel shared by every tracer.

use flowlines_core::{Vec2, VelocityField};

use crate::error::TraceError;

/// Advance every particle by one forward-Euler step: `p += v(p)·dt`.
///
/// All velocities are sampled at the pre-step positions before any particle
/// moves, so the result does not depend on particle order. If any velocity
/// is non-finite the step is abandoned and `positions` is left untouched.
///
/// `dt` is not validated here; the drivers validate it at build time.
///
/// # Errors
///
/// Returns [`TraceError::NonFiniteVelocity`] with `step: 0`.
///
/// # Examples
///
/// ```
/// use flowlines_core::{Vec2, VelocityField};
/// use flowlines_tracer::euler_step;
///
/// struct East;
/// impl VelocityField for East {
///     fn velocity(&self, _p: Vec2) -> Vec2 {
///         Vec2::new(1.0, 0.0)
///     }
/// }
///
/// let mut ps = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0)];
/// euler_step(&East, &mut ps, 0.5).unwrap();
/// assert_eq!(ps, [Vec2::new(0.5, 0.0), Vec2::new(0.5, 1.0)]);
/// ```
pub fn euler_step<F>(field: &F, positions: &mut [Vec2], dt: f64) -> Result<(), TraceError>
where
    F: VelocityField + ?Sized,
{
    let mut scratch = Vec::with_capacity(positions.len());
    step_with(field, positions, dt, &mut scratch)
}

/// [`euler_step`] with a caller-owned velocity buffer, reused across steps.
pub(crate) fn step_with<F>(
    field: &F,
    positions: &mut [Vec2],
    dt: f64,
    velocities: &mut Vec<Vec2>,
) -> Result<(), TraceError>
where
    F: VelocityField + ?Sized,
{
    velocities.clear();
    for (particle, &p) in positions.iter().enumerate() {
        let v = field.velocity(p);
        if !v.is_finite() {
            return Err(TraceError::NonFiniteVelocity {
                particle,
                step: 0,
                position: p,
            });
        }
        velocities.push(v);
    }
    for (p, &v) in positions.iter_mut().zip(velocities.iter()) {
        *p += v * dt;
    }
    Ok(())
}
