//! Piecewise constant (forward flat) interpolation.

use super::{check_domain, validate_knots, Interpolator};
use crate::error::MathResult;

/// Step function: `y[i]` on `[x[i], x[i+1])`, `y[n-1]` from the last knot on.
///
/// Used for continuously compounded instantaneous forward curves, where the
/// integral gives ln of the compounding factor. The integral runs from zero
/// and treats `y[0]` as the value on `[0, x[0])`; left of the first knot the
/// value is held at `y[0]`.
#[derive(Debug, Clone)]
pub struct ForwardFlatInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    integrals: Vec<f64>,
    allow_extrapolation: bool,
}

impl ForwardFlatInterpolator {
    /// Creates a forward flat interpolator.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys, 1)?;

        let mut integrals = Vec::with_capacity(xs.len());
        let mut integral = ys[0] * xs[0];
        integrals.push(integral);
        for i in 1..xs.len() {
            integral += ys[i - 1] * (xs[i] - xs[i - 1]);
            integrals.push(integral);
        }

        Ok(Self {
            xs,
            ys,
            integrals,
            allow_extrapolation: true,
        })
    }

    /// Enables or disables extrapolation.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// Index of the step containing x (`x >= xs[0]`).
    fn step(&self, x: f64) -> usize {
        self.xs.partition_point(|&k| k <= x).saturating_sub(1)
    }
}

impl Interpolator for ForwardFlatInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        check_domain(self.allow_extrapolation, x, &self.xs)?;

        if x < self.xs[0] {
            return Ok(self.ys[0]);
        }
        Ok(self.ys[self.step(x)])
    }

    fn integral(&self, x: f64) -> MathResult<f64> {
        check_domain(self.allow_extrapolation, x, &self.xs)?;

        if x < self.xs[0] {
            return Ok(self.ys[0] * x);
        }
        let i = self.step(x);
        Ok(self.integrals[i] + (x - self.xs[i]) * self.ys[i])
    }

    fn name(&self) -> &'static str {
        "ForwardFlat"
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
