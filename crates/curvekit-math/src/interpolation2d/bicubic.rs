//! Cubic along maturity, linear along strike.

use super::{Grid, Interpolator2D};
use crate::error::MathResult;
use crate::interpolation::{CubicHermiteFdInterpolator, Interpolator};

/// Surface interpolation with a [`CubicHermiteFdInterpolator`] down each strike
/// column and linear interpolation across strikes.
#[derive(Debug, Clone)]
pub struct BiCubicSplineInterpolator {
    grid: Grid,
    columns: Vec<CubicHermiteFdInterpolator>,
}

impl BiCubicSplineInterpolator {
    /// Creates the interpolator from a row-major grid.
    pub fn new(ts: Vec<f64>, ks: Vec<f64>, values: Vec<f64>) -> MathResult<Self> {
        Self::from_grid(Grid::new(ts, ks, values)?)
    }

    pub(crate) fn from_grid(grid: Grid) -> MathResult<Self> {
        let columns = (0..grid.ks().len())
            .map(|j| CubicHermiteFdInterpolator::new(grid.ts().to_vec(), grid.column(j)))
            .collect::<MathResult<Vec<_>>>()?;
        Ok(Self { grid, columns })
    }
}

impl Interpolator2D for BiCubicSplineInterpolator {
    fn interpolate(&self, t: f64, k: f64) -> MathResult<f64> {
        if let Some(corner) = self.grid.corner(t, k) {
            return Ok(corner);
        }
        let (t, k) = self.grid.clamp(t, k);
        let (j, w) = self.grid.strike_weight(k);

        let left = self.columns[j].interpolate(t)?;
        let right = self.columns[j + 1].interpolate(t)?;
        Ok(left + w * (right - left))
    }

    fn name(&self) -> &'static str {
        "BiCubicSpline"
    }

    fn t_range(&self) -> (f64, f64) {
        self.grid.t_range()
    }

    fn k_range(&self) -> (f64, f64) {
        self.grid.k_range()
    }
}
