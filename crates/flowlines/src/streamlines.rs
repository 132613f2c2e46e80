//! Regular-grid sampling for streamline rendering.
//!
//! A renderer draws streamlines by integrating its own copy of the sampled
//! velocity; this module only produces the grid and the samples.

use flowlines_core::{ConfigError, FieldError, VelocityField};
use ndarray::{Array1, Array2, ArrayD, Ix2, Zip};

use crate::error::VisualizeError;

/// A square sampling grid: `resolution` points per axis over
/// `[min, max]` in both x and y.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    /// Lower bound on both axes. Default: −2.
    pub min: f64,
    /// Upper bound on both axes. Default: 2.
    pub max: f64,
    /// Points per axis, endpoints included. Default: 200.
    pub resolution: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            min: -2.0,
            max: 2.0,
            resolution: 200,
        }
    }
}

impl GridSpec {
    /// Check the grid is usable.
    ///
    /// # Errors
    ///
    /// [`ConfigError::GridResolutionTooSmall`] below 2 points per axis,
    /// [`ConfigError::InvalidGridBounds`] unless both bounds are finite with
    /// `min < max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution < 2 {
            return Err(ConfigError::GridResolutionTooSmall {
                configured: self.resolution,
            });
        }
        if !(self.min.is_finite() && self.max.is_finite() && self.min < self.max) {
            return Err(ConfigError::InvalidGridBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Evenly spaced axis coordinates, endpoints included.
    pub fn axis(&self) -> Array1<f64> {
        Array1::linspace(self.min, self.max, self.resolution)
    }

    /// Coordinate matrices `(X, Y)`: rows index y, columns index x.
    pub fn meshgrid(&self) -> (Array2<f64>, Array2<f64>) {
        let axis = self.axis();
        let n = self.resolution;
        let xs = Array2::from_shape_fn((n, n), |(_, c)| axis[c]);
        let ys = Array2::from_shape_fn((n, n), |(r, _)| axis[r]);
        (xs, ys)
    }
}

/// A field sampled over a [`GridSpec`].
#[derive(Clone, Debug, PartialEq)]
pub struct SampledGrid {
    /// X coordinates.
    pub x: Array2<f64>,
    /// Y coordinates.
    pub y: Array2<f64>,
    /// Velocity x-component.
    pub u: Array2<f64>,
    /// Velocity y-component.
    pub v: Array2<f64>,
}

impl SampledGrid {
    /// Velocity magnitude at each grid point, for colouring.
    pub fn speed(&self) -> Array2<f64> {
        Zip::from(&self.u)
            .and(&self.v)
            .map_collect(|&u, &v| u.hypot(v))
    }

    /// Points per axis.
    pub fn resolution(&self) -> usize {
        self.x.nrows()
    }
}

/// Sample `field` over `grid` with the grid call form.
///
/// # Errors
///
/// Returns [`VisualizeError::Config`] for an invalid grid, and
/// [`VisualizeError::Field`] if the field fails or returns arrays that do
/// not match the grid.
pub fn sample_grid<F>(field: &F, grid: &GridSpec) -> Result<SampledGrid, VisualizeError>
where
    F: VelocityField + ?Sized,
{
    grid.validate()?;
    Ok(sample_validated(field, grid)?)
}

/// [`sample_grid`] for a grid that has already passed
/// [`GridSpec::validate`].
pub(crate) fn sample_validated<F>(field: &F, grid: &GridSpec) -> Result<SampledGrid, FieldError>
where
    F: VelocityField + ?Sized,
{
    let (x, y) = grid.meshgrid();
    let (u, v) = field.velocity_grid(x.view().into_dyn(), y.view().into_dyn())?;
    let u = to_grid(u, x.shape())?;
    let v = to_grid(v, x.shape())?;
    Ok(SampledGrid { x, y, u, v })
}

fn to_grid(arr: ArrayD<f64>, expected: &[usize]) -> Result<Array2<f64>, FieldError> {
    if arr.shape() != expected {
        return Err(FieldError::OutputShape {
            expected: expected.to_vec(),
            found: arr.shape().to_vec(),
        });
    }
    arr.into_dimensionality::<Ix2>()
        .map_err(|_| FieldError::OutputShape {
            expected: expected.to_vec(),
            found: Vec::new(),
        })
}
