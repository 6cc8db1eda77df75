//! Surface interpolation in total variance.

use super::{BiCubicSplineInterpolator, BiLinearInterpolator, Grid, Interpolator2D};
use crate::error::{MathError, MathResult};

/// Volatility surface interpolated in total variance `w = vol^2 t`.
///
/// The inner method runs on `w`; the result is `sqrt(w / t)`. Along maturity
/// `w` is held flat beyond the grid, so short-dated vols scale with
/// `1 / sqrt(t)`. Queries outside both ranges return the corner vol. For
/// `t <= 0` the first grid maturity stands in for `t`.
#[derive(Debug)]
pub struct VarianceInterpolator {
    vols: Grid,
    variance: Box<dyn Interpolator2D>,
    name: &'static str,
}

impl VarianceInterpolator {
    /// Bilinear interpolation of total variance.
    pub fn bilinear(ts: Vec<f64>, ks: Vec<f64>, vols: Vec<f64>) -> MathResult<Self> {
        let vols = Self::vol_grid(ts, ks, vols)?;
        let variance = BiLinearInterpolator::from_grid(Self::total_variance(&vols));
        Ok(Self {
            vols,
            variance: Box::new(variance),
            name: "VarianceBiLinear",
        })
    }

    /// Cubic-in-maturity, linear-in-strike interpolation of total variance.
    pub fn bicubic_spline(ts: Vec<f64>, ks: Vec<f64>, vols: Vec<f64>) -> MathResult<Self> {
        let vols = Self::vol_grid(ts, ks, vols)?;
        let variance = BiCubicSplineInterpolator::from_grid(Self::total_variance(&vols))?;
        Ok(Self {
            vols,
            variance: Box::new(variance),
            name: "VarianceBiCubicSpline",
        })
    }

    fn vol_grid(ts: Vec<f64>, ks: Vec<f64>, vols: Vec<f64>) -> MathResult<Grid> {
        if ts.first().is_some_and(|&t| t <= 0.0) {
            return Err(MathError::invalid_input(
                "variance interpolation needs positive maturities",
            ));
        }
        Grid::new(ts, ks, vols)
    }

    fn total_variance(vols: &Grid) -> Grid {
        vols.map(|t, vol| vol * vol * t)
    }
}

impl Interpolator2D for VarianceInterpolator {
    fn interpolate(&self, t: f64, k: f64) -> MathResult<f64> {
        if let Some(corner) = self.vols.corner(t, k) {
            return Ok(corner);
        }
        let w = self.variance.interpolate(t, k)?;
        let t = if t > 0.0 { t } else { self.vols.t_range().0 };
        Ok((w.max(0.0) / t).sqrt())
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn t_range(&self) -> (f64, f64) {
        self.vols.t_range()
    }

    fn k_range(&self) -> (f64, f64) {
        self.vols.k_range()
    }
}
