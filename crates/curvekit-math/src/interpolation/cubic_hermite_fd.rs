//! Cubic Hermite spline with finite-difference tangents.

use super::{check_domain, locate, validate_knots, Interpolator};
use crate::error::MathResult;

/// Cubic Hermite interpolation with tangents from finite differences.
///
/// Interior tangents average the neighbouring secants; the end tangents are
/// the one-sided secants. Values are held flat outside the knots. Mostly used
/// along the time axis of 2D surfaces.
#[derive(Debug, Clone)]
pub struct CubicHermiteFdInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    tangents: Vec<f64>,
    allow_extrapolation: bool,
}

impl CubicHermiteFdInterpolator {
    /// Creates the interpolator. Requires at least 2 knots.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys, 2)?;

        let secants: Vec<f64> = xs
            .windows(2)
            .zip(ys.windows(2))
            .map(|(x, y)| (y[1] - y[0]) / (x[1] - x[0]))
            .collect();

        let n = xs.len();
        let mut tangents = vec![0.0; n];
        tangents[0] = secants[0];
        tangents[n - 1] = secants[n - 2];
        for i in 1..n - 1 {
            tangents[i] = 0.5 * (secants[i - 1] + secants[i]);
        }

        Ok(Self {
            xs,
            ys,
            tangents,
            allow_extrapolation: true,
        })
    }

    /// Enables or disables flat extrapolation.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// Tangent at each knot.
    pub fn tangents(&self) -> &[f64] {
        &self.tangents
    }
}

impl Interpolator for CubicHermiteFdInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        check_domain(self.allow_extrapolation, x, &self.xs)?;

        let n = self.xs.len() - 1;
        if x < self.xs[0] {
            return Ok(self.ys[0]);
        }
        if x >= self.xs[n] {
            return Ok(self.ys[n]);
        }

        let i = locate(&self.xs, x);
        let dx = self.xs[i + 1] - self.xs[i];
        let t = (x - self.xs[i]) / dx;
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        Ok(h00 * self.ys[i]
            + h10 * dx * self.tangents[i]
            + h01 * self.ys[i + 1]
            + h11 * dx * self.tangents[i + 1])
    }

    fn name(&self) -> &'static str {
        "CubicHermiteFd"
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
