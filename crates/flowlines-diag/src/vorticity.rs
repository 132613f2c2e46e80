//! Central-difference vorticity estimation.
//!
//! # Stencil
//!
//! ```text
//! ∂v/∂x ≈ (v(x+δ, y) − v(x−δ, y)) / 2δ
//! ∂u/∂y ≈ (u(x, y+δ) − u(x, y−δ)) / 2δ
//! ω     = ∂v/∂x − ∂u/∂y
//! ```
//!
//! Four point evaluations per estimate. The stencil is exact for fields
//! linear in x and y up to rounding, whatever δ.

use std::fmt;

use flowlines_core::{ConfigError, NamedField, Vec2, VelocityField};
use tracing::debug;

use crate::error::DiagnosticError;

/// Default finite-difference perturbation δ.
pub const DEFAULT_PERTURBATION: f64 = 1e-5;
/// Default classification threshold: irrotational if |ω| is below it.
pub const DEFAULT_THRESHOLD: f64 = 1e-6;

/// Whether a flow rotates at a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotationality {
    /// |ω| at or above the threshold.
    Rotational,
    /// |ω| below the threshold.
    Irrotational,
}

impl Rotationality {
    /// `"rotational"` or `"irrotational"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rotational => "rotational",
            Self::Irrotational => "irrotational",
        }
    }
}

impl fmt::Display for Rotationality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One vorticity estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VorticitySample {
    /// Where the estimate was taken.
    pub point: Vec2,
    /// Estimated ω.
    pub vorticity: f64,
    /// Classification against the estimator's threshold.
    pub rotationality: Rotationality,
}

/// A vorticity sample labelled with the flow's display name.
///
/// Displays as two lines:
///
/// ```text
/// Approx vorticity = 2.0000e+00
/// Vortex Flow is rotational.
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VorticityReport {
    /// Display name of the flow.
    pub flow_name: String,
    /// The estimate.
    pub sample: VorticitySample,
}

impl fmt::Display for VorticityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Approx vorticity = {}", Scientific(self.sample.vorticity))?;
        write!(f, "{} is {}.", self.flow_name, self.sample.rotationality)
    }
}

/// Four-decimal scientific notation with a signed exponent of at least two
/// digits, e.g. `2.0000e+00` or `-3.1416e-07`.
struct Scientific(f64);

impl fmt::Display for Scientific {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{:.4e}", self.0);
        let Some((mantissa, exponent)) = text.split_once('e') else {
            return f.write_str(&text);
        };
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        write!(f, "{mantissa}e{sign}{digits:0>2}")
    }
}

/// Estimates vorticity by central differences.
///
/// Analytic and compiled fields take the same numeric path; the estimator
/// only ever calls [`VelocityField::velocity`].
///
/// ```
/// use flowlines_core::Vec2;
/// use flowlines_diag::{Rotationality, VorticityEstimator};
/// use flowlines_fields::Vortex;
///
/// let sample = VorticityEstimator::default()
///     .estimate(&Vortex, Vec2::new(1.0, 1.0))
///     .unwrap();
/// assert!((sample.vorticity - 2.0).abs() < 1e-3);
/// assert_eq!(sample.rotationality, Rotationality::Rotational);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VorticityEstimator {
    perturbation: f64,
    threshold: f64,
}

impl Default for VorticityEstimator {
    fn default() -> Self {
        Self {
            perturbation: DEFAULT_PERTURBATION,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl VorticityEstimator {
    /// Create an estimator with a custom perturbation and threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPerturbation`] unless `perturbation` is
    /// positive and finite, and [`ConfigError::InvalidThreshold`] unless
    /// `threshold` is non-negative and finite.
    pub fn new(perturbation: f64, threshold: f64) -> Result<Self, ConfigError> {
        if !(perturbation.is_finite() && perturbation > 0.0) {
            return Err(ConfigError::InvalidPerturbation {
                value: perturbation,
            });
        }
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(ConfigError::InvalidThreshold { value: threshold });
        }
        Ok(Self {
            perturbation,
            threshold,
        })
    }

    /// The perturbation δ.
    pub fn perturbation(&self) -> f64 {
        self.perturbation
    }

    /// The classification threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Classify a vorticity value against the threshold.
    pub fn classify(&self, vorticity: f64) -> Rotationality {
        if vorticity.abs() < self.threshold {
            Rotationality::Irrotational
        } else {
            Rotationality::Rotational
        }
    }

    /// Estimate ω at `point`.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticError::NonFinite`] if the estimate is NaN or
    /// infinite.
    pub fn estimate<F>(&self, field: &F, point: Vec2) -> Result<VorticitySample, DiagnosticError>
    where
        F: VelocityField + ?Sized,
    {
        let d = self.perturbation;
        let dx = Vec2::new(d, 0.0);
        let dy = Vec2::new(0.0, d);

        let dv_dx = (field.velocity(point + dx).y - field.velocity(point - dx).y) / (2.0 * d);
        let du_dy = (field.velocity(point + dy).x - field.velocity(point - dy).x) / (2.0 * d);
        let vorticity = dv_dx - du_dy;

        if !vorticity.is_finite() {
            return Err(DiagnosticError::NonFinite { point });
        }
        let rotationality = self.classify(vorticity);
        debug!(%point, vorticity, %rotationality, "vorticity estimated");
        Ok(VorticitySample {
            point,
            vorticity,
            rotationality,
        })
    }

    /// Estimate ω for a named flow and wrap it in a printable report.
    ///
    /// # Errors
    ///
    /// As for [`estimate`](Self::estimate).
    pub fn report(&self, flow: &NamedField, point: Vec2) -> Result<VorticityReport, DiagnosticError> {
        let sample = self.estimate(flow.field(), point)?;
        Ok(VorticityReport {
            flow_name: flow.name().to_string(),
            sample,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowlines_test_utils::{ConstantField, CountingField, ShearField};
    use std::sync::Arc;

    // ---------------------------------------------------------------
    // Construction tests
    // ---------------------------------------------------------------

    #[test]
    fn default_settings() {
        let e = VorticityEstimator::default();
        assert_eq!(e.perturbation(), 1e-5);
        assert_eq!(e.threshold(), 1e-6);
    }

    #[test]
    fn new_validates() {
        assert!(VorticityEstimator::new(1e-4, 0.0).is_ok());
        for d in [0.0, -1e-5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                VorticityEstimator::new(d, 1e-6),
                Err(ConfigError::InvalidPerturbation { .. })
            ));
        }
        for t in [-1e-6, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                VorticityEstimator::new(1e-5, t),
                Err(ConfigError::InvalidThreshold { .. })
            ));
        }
    }

    // ---------------------------------------------------------------
    // Estimate tests
    // ---------------------------------------------------------------

    #[test]
    fn shear_flow_has_unit_negative_vorticity() {
        let s = VorticityEstimator::default()
            .estimate(&ShearField, Vec2::new(0.3, -2.0))
            .unwrap();
        assert!((s.vorticity + 1.0).abs() < 1e-6, "got {}", s.vorticity);
        assert_eq!(s.rotationality, Rotationality::Rotational);
    }

    #[test]
    fn constant_flow_is_irrotational() {
        let s = VorticityEstimator::default()
            .estimate(&ConstantField::new(3.0, -1.0), Vec2::new(1.0, 1.0))
            .unwrap();
        assert_eq!(s.vorticity, 0.0);
        assert_eq!(s.rotationality, Rotationality::Irrotational);
    }

    #[test]
    fn four_evaluations_per_estimate() {
        let field = CountingField::new(ShearField);
        VorticityEstimator::default()
            .estimate(&field, Vec2::ZERO)
            .unwrap();
        assert_eq!(field.calls(), 4);
    }

    #[test]
    fn non_finite_estimate_is_an_error() {
        struct Pole;
        impl VelocityField for Pole {
            fn velocity(&self, p: Vec2) -> Vec2 {
                Vec2::new(0.0, 1.0 / (p.x - 1e-5))
            }
        }
        let err = VorticityEstimator::default()
            .estimate(&Pole, Vec2::ZERO)
            .unwrap_err();
        assert_eq!(err, DiagnosticError::NonFinite { point: Vec2::ZERO });
    }

    #[test]
    fn classification_boundary() {
        let e = VorticityEstimator::new(1e-5, 0.5).unwrap();
        assert_eq!(e.classify(0.49), Rotationality::Irrotational);
        assert_eq!(e.classify(-0.49), Rotationality::Irrotational);
        assert_eq!(e.classify(0.5), Rotationality::Rotational);
    }

    // ---------------------------------------------------------------
    // Report tests
    // ---------------------------------------------------------------

    #[test]
    fn report_display() {
        let flow = NamedField::new("Shear Flow", Arc::new(ShearField));
        let report = VorticityEstimator::default()
            .report(&flow, Vec2::new(1.0, 1.0))
            .unwrap();
        let text = report.to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Approx vorticity = -1.0000e+00"));
        assert_eq!(lines.next(), Some("Shear Flow is rotational."));
    }

    #[test]
    fn scientific_exponent_is_signed_and_padded() {
        assert_eq!(Scientific(2.0).to_string(), "2.0000e+00");
        assert_eq!(Scientific(0.0).to_string(), "0.0000e+00");
        assert_eq!(Scientific(-3.14159e-7).to_string(), "-3.1416e-07");
        assert_eq!(Scientific(1.5e12).to_string(), "1.5000e+12");
        assert_eq!(Scientific(2.5e-123).to_string(), "2.5000e-123");
    }
}
