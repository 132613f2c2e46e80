//! Integration tests tracing the library flows.
//!
//! These check the physical behavior of the Euler tracer against closed
//! forms, not just the bookkeeping covered by the unit tests.

use flowlines_core::{Vec2, VelocityField};
use flowlines_fields::{FieldLibrary, Source, Uniform, Vortex};
use flowlines_test_utils::assert_vec2_near;
use flowlines_tracer::{euler_step, Integrator, StreakEmitter, TraceError};
use proptest::prelude::*;

// ---------- Pathlines ----------

#[test]
fn uniform_flow_matches_closed_form() {
    let integrator = Integrator::builder().dt(0.01).steps(250).build().unwrap();
    let seeds = [Vec2::new(0.0, 0.0), Vec2::new(-1.0, 0.5)];
    let paths = integrator.pathlines(&Uniform, &seeds).unwrap();
    for (t, s) in paths.trajectories().iter().zip(&seeds) {
        for (k, p) in t.iter().enumerate() {
            assert_vec2_near(*p, Vec2::new(s.x + 0.01 * k as f64, s.y), 1e-9);
            assert_eq!(p.y, s.y);
        }
    }
}

#[test]
fn vortex_radius_is_nearly_preserved() {
    // Explicit Euler spirals outward by a factor sqrt(1 + dt²) per step,
    // which is about 0.05% over this run.
    let integrator = Integrator::builder().dt(0.001).steps(1000).build().unwrap();
    let paths = integrator.pathlines(&Vortex, &[Vec2::new(1.0, 0.0)]).unwrap();
    let t = &paths.trajectories()[0];
    assert_eq!(t.len(), 1001);
    for p in t {
        assert!((p.length() - 1.0).abs() < 0.01, "radius drifted to {}", p.length());
    }
    assert!(t.end().length() >= 1.0);
}

#[test]
fn default_pathline_run_over_library_fields() {
    let integrator = Integrator::builder().build().unwrap();
    let seeds = [Vec2::new(1.0, 0.0), Vec2::new(0.5, 0.5), Vec2::new(0.0, 1.0)];
    let library = FieldLibrary::standard();
    for (_, entry) in library.iter() {
        let paths = integrator.pathlines(&entry.field, &seeds).unwrap();
        assert_eq!(paths.len(), 3, "{}", entry.name);
        assert!(paths
            .trajectories()
            .iter()
            .all(|t| t.len() == 801 && t.iter().all(|p| p.is_finite())));
    }
}

#[test]
fn seed_at_singular_formula_aborts() {
    struct Inverse;
    impl VelocityField for Inverse {
        fn velocity(&self, p: Vec2) -> Vec2 {
            Vec2::new(1.0 / p.x, 0.0)
        }
    }
    let integrator = Integrator::builder().steps(10).build().unwrap();
    let err = integrator
        .pathlines(&Inverse, &[Vec2::new(1.0, 0.0), Vec2::ZERO])
        .unwrap_err();
    assert_eq!(
        err,
        TraceError::NonFiniteVelocity {
            particle: 1,
            step: 0,
            position: Vec2::ZERO,
        }
    );
}

// ---------- Streaklines ----------

#[test]
fn streak_cadence_over_hundred_ticks() {
    let emitter = StreakEmitter::builder()
        .steps(100)
        .emission_period(10)
        .sample_period(10)
        .build()
        .unwrap();
    let streaks = emitter.run(&Vortex).unwrap();
    assert_eq!(streaks.batches().len(), 10);
    for snap in streaks.snapshots() {
        let released = streaks
            .batches()
            .iter()
            .filter(|b| b.release_tick <= snap.tick)
            .count();
        assert_eq!(snap.positions.len(), released, "tick {}", snap.tick);
        assert_eq!(snap.positions.len(), snap.tick / 10 + 1);
    }
}

#[test]
fn source_streak_moves_outward() {
    let streaks = StreakEmitter::builder().build().unwrap().run(&Source).unwrap();
    let finals = streaks.final_positions();
    assert_eq!(finals.len(), 50);
    // Older tracers have travelled further from the release point.
    for pair in finals.windows(2) {
        assert!(pair[0].length() > pair[1].length());
    }
}

// ---------- Property tests ----------

proptest! {
    #[test]
    fn euler_step_is_permutation_equivariant(
        pts in prop::collection::vec((-3.0f64..3.0, -3.0f64..3.0), 1..12),
        rot in 0usize..12,
    ) {
        let mut a: Vec<Vec2> = pts.iter().map(|&p| p.into()).collect();
        let mut b = a.clone();
        let k = rot % b.len();
        b.rotate_left(k);
        euler_step(&Source, &mut a, 0.01).unwrap();
        euler_step(&Source, &mut b, 0.01).unwrap();
        b.rotate_right(k);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn uniform_closed_form_for_any_run(
        x0 in -10.0f64..10.0,
        y0 in -10.0f64..10.0,
        steps in 0usize..400,
    ) {
        let integrator = Integrator::builder().dt(0.01).steps(steps).build().unwrap();
        let paths = integrator.pathlines(&Uniform, &[Vec2::new(x0, y0)]).unwrap();
        let end = paths.trajectories()[0].end();
        prop_assert!((end.x - (x0 + 0.01 * steps as f64)).abs() < 1e-9);
        prop_assert_eq!(end.y, y0);
    }
}
