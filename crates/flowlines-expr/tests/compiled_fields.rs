//! Integration tests for compiled formula fields against the analytic
//! library fields.

use flowlines_core::{Vec2, VelocityField};
use flowlines_expr::{Component, FieldCompiler, SyntaxError, MAX_DEPTH};
use flowlines_fields::{Doublet, Source, Vortex};
use flowlines_test_utils::assert_vec2_near;
use ndarray::{Array1, Array2, ArrayD, IxDyn};
use proptest::prelude::*;

fn meshgrid(min: f64, max: f64, n: usize) -> (ArrayD<f64>, ArrayD<f64>) {
    let axis = Array1::linspace(min, max, n);
    let xs = Array2::from_shape_fn((n, n), |(_, c)| axis[c]).into_dyn();
    let ys = Array2::from_shape_fn((n, n), |(r, _)| axis[r]).into_dyn();
    (xs, ys)
}

// ---------- Round trip against the library ----------

#[test]
fn rotation_formula_matches_vortex_pointwise() {
    let field = FieldCompiler::new().compile("-y", "x").unwrap();
    for &(x, y) in &[(0.0, 0.0), (1.0, 0.0), (-0.3, 2.5), (1e3, -7.0)] {
        let p = Vec2::new(x, y);
        assert_eq!(field.velocity(p), Vortex.velocity(p));
    }
}

#[test]
fn rotation_formula_matches_vortex_on_grid() {
    let (xs, ys) = meshgrid(-2.0, 2.0, 21);
    let compiled = FieldCompiler::new().compile("-y", "x").unwrap();
    let (cu, cv) = compiled.velocity_grid(xs.view(), ys.view()).unwrap();
    let (vu, vv) = Vortex.velocity_grid(xs.view(), ys.view()).unwrap();
    assert_eq!(cu, vu);
    assert_eq!(cv, vv);
}

#[test]
fn source_formula_matches_library_source() {
    let compiled = FieldCompiler::new()
        .compile("x / (x**2 + y**2 + 1e-6)", "y / (x**2 + y**2 + 1e-6)")
        .unwrap();
    for &(x, y) in &[(1.0, 0.0), (0.5, -0.5), (-2.0, 1.5)] {
        let p = Vec2::new(x, y);
        assert_vec2_near(compiled.velocity(p), Source.velocity(p), 1e-12);
    }
}

#[test]
fn doublet_formula_matches_library_doublet() {
    let compiled = FieldCompiler::new()
        .compile(
            "(x**2 - y**2) / (x**2 + y**2 + 1e-6)**2",
            "2*x*y / (x**2 + y**2 + 1e-6)**2",
        )
        .unwrap();
    let p = Vec2::new(0.7, -1.1);
    assert_vec2_near(compiled.velocity(p), Doublet.velocity(p), 1e-12);
}

// ---------- Error paths ----------

#[test]
fn unmatched_paren_fails_to_compile() {
    let err = FieldCompiler::new().compile("(x + 1", "y").unwrap_err();
    assert_eq!(err.component, Component::U);
    assert_eq!(err.cause, SyntaxError::UnmatchedParen { offset: 0 });
    assert!(err.to_string().contains("u(x,y)"));
}

#[test]
fn undefined_symbol_in_v_fails_to_compile() {
    let err = FieldCompiler::new().compile("x", "x + t").unwrap_err();
    assert_eq!(err.component, Component::V);
    assert!(matches!(err.cause, SyntaxError::UndefinedSymbol { ref name, .. } if name == "t"));
}

#[test]
fn deeply_nested_formula_is_a_parse_error() {
    let deep = format!("{}x{}", "(".repeat(1000), ")".repeat(1000));
    let err = FieldCompiler::new().compile(&deep, "y").unwrap_err();
    assert_eq!(err.component, Component::U);
    assert_eq!(err.cause, SyntaxError::TooDeep { offset: MAX_DEPTH });

    let signs = format!("{}y", "-".repeat(5000));
    let err = FieldCompiler::new().compile("x", &signs).unwrap_err();
    assert_eq!(err.component, Component::V);
    assert!(matches!(err.cause, SyntaxError::TooDeep { .. }));
}

// ---------- Shape and singularity behavior ----------

#[test]
fn constant_formulas_broadcast_to_grid_shape() {
    let (xs, ys) = meshgrid(-1.0, 1.0, 7);
    let field = FieldCompiler::new().compile("1", "0").unwrap();
    let (us, vs) = field.velocity_grid(xs.view(), ys.view()).unwrap();
    assert_eq!(us.shape(), &[7, 7]);
    assert_eq!(vs.shape(), &[7, 7]);
    assert!(us.iter().all(|&u| u == 1.0));
    assert!(vs.iter().all(|&v| v == 0.0));
}

#[test]
fn singular_formula_yields_non_finite_velocity() {
    let field = FieldCompiler::new().compile("1/x", "0").unwrap();
    assert!(!field.velocity(Vec2::ZERO).is_finite());
    let xs = ArrayD::from_elem(IxDyn(&[2]), 0.0);
    let (us, _) = field.velocity_grid(xs.view(), xs.view()).unwrap();
    assert!(us.iter().all(|u| u.is_infinite()));
}

// ---------- Property tests ----------

proptest! {
    #[test]
    fn grid_form_matches_point_form(
        coords in prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 1..40),
    ) {
        let field = FieldCompiler::new()
            .compile("sin(x)*y - x**2 / (1 + y**2)", "exp(-x**2) + atan2(y, x)")
            .unwrap();
        let xs = ArrayD::from_shape_vec(IxDyn(&[coords.len()]), coords.iter().map(|c| c.0).collect()).unwrap();
        let ys = ArrayD::from_shape_vec(IxDyn(&[coords.len()]), coords.iter().map(|c| c.1).collect()).unwrap();
        let (us, vs) = field.velocity_grid(xs.view(), ys.view()).unwrap();
        for (i, &(x, y)) in coords.iter().enumerate() {
            let p = field.velocity(Vec2::new(x, y));
            prop_assert_eq!(us[IxDyn(&[i])], p.x);
            prop_assert_eq!(vs[IxDyn(&[i])], p.y);
        }
    }

    #[test]
    fn linear_formulas_match_closed_form(
        a in -5.0f64..5.0,
        b in -5.0f64..5.0,
        x in -10.0f64..10.0,
        y in -10.0f64..10.0,
    ) {
        let field = FieldCompiler::new()
            .compile(&format!("({a})*x + ({b})*y"), &format!("({b})*x - ({a})*y"))
            .unwrap();
        let v = field.velocity(Vec2::new(x, y));
        prop_assert!((v.x - (a * x + b * y)).abs() <= 1e-9 * (1.0 + v.x.abs()));
        prop_assert!((v.y - (b * x - a * y)).abs() <= 1e-9 * (1.0 + v.y.abs()));
    }
}
