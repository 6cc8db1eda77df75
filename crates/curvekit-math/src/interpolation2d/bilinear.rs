//! Bilinear surface interpolation.

use super::{Grid, Interpolator2D};
use crate::error::MathResult;
use crate::interpolation::locate;

/// Bilinear interpolation on a (maturity, strike) grid, flat outside.
///
/// ```rust
/// use curvekit_math::interpolation2d::{BiLinearInterpolator, Interpolator2D};
///
/// let surface = BiLinearInterpolator::new(
///     vec![1.0, 2.0],
///     vec![90.0, 110.0],
///     vec![0.20, 0.30, 0.40, 0.50],
/// ).unwrap();
///
/// assert!((surface.interpolate(1.5, 100.0).unwrap() - 0.35).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BiLinearInterpolator {
    grid: Grid,
}

impl BiLinearInterpolator {
    /// Creates the interpolator from a row-major grid.
    pub fn new(ts: Vec<f64>, ks: Vec<f64>, values: Vec<f64>) -> MathResult<Self> {
        Ok(Self::from_grid(Grid::new(ts, ks, values)?))
    }

    pub(crate) fn from_grid(grid: Grid) -> Self {
        Self { grid }
    }
}

impl Interpolator2D for BiLinearInterpolator {
    fn interpolate(&self, t: f64, k: f64) -> MathResult<f64> {
        if let Some(corner) = self.grid.corner(t, k) {
            return Ok(corner);
        }
        let (t, k) = self.grid.clamp(t, k);

        let ts = self.grid.ts();
        let i = locate(ts, t);
        let u = (t - ts[i]) / (ts[i + 1] - ts[i]);
        let (j, v) = self.grid.strike_weight(k);

        let g = &self.grid;
        Ok((1.0 - u) * (1.0 - v) * g.at(i, j)
            + u * (1.0 - v) * g.at(i + 1, j)
            + (1.0 - u) * v * g.at(i, j + 1)
            + u * v * g.at(i + 1, j + 1))
    }

    fn name(&self) -> &'static str {
        "BiLinear"
    }

    fn t_range(&self) -> (f64, f64) {
        self.grid.t_range()
    }

    fn k_range(&self) -> (f64, f64) {
        self.grid.k_range()
    }
}
