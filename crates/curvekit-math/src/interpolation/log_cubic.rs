//! Monotonic cubic interpolation in log space.

use super::{CubicHermiteMonotonicInterpolator, Interpolator};
use crate::error::{MathError, MathResult};

/// `exp` of a [`CubicHermiteMonotonicInterpolator`] fitted to ln(y).
///
/// Suited to discount factors: positive, and monotone whenever the input is.
#[derive(Debug, Clone)]
pub struct LogCubicInterpolator {
    inner: CubicHermiteMonotonicInterpolator,
}

impl LogCubicInterpolator {
    /// Creates the interpolator. All y values must be positive.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if let Some((i, y)) = ys.iter().enumerate().find(|(_, y)| **y <= 0.0) {
            return Err(MathError::invalid_input(format!(
                "y[{i}] = {y} is not positive; log-cubic requires positive values"
            )));
        }
        let log_ys = ys.iter().map(|y| y.ln()).collect();
        Ok(Self {
            inner: CubicHermiteMonotonicInterpolator::new(xs, log_ys)?,
        })
    }

    /// Enables or disables flat extrapolation.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.inner = self.inner.with_extrapolation(allow);
        self
    }
}

impl Interpolator for LogCubicInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        Ok(self.inner.interpolate(x)?.exp())
    }

    fn name(&self) -> &'static str {
        "LogCubic"
    }

    fn allows_extrapolation(&self) -> bool {
        self.inner.allows_extrapolation()
    }

    fn min_x(&self) -> f64 {
        self.inner.min_x()
    }

    fn max_x(&self) -> f64 {
        self.inner.max_x()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_factors_stay_decreasing() {
        let xs = vec![0.0, 0.5, 1.0, 2.0, 5.0];
        let ys = vec![1.0, 0.99, 0.975, 0.95, 0.86];
        let interp = LogCubicInterpolator::new(xs.clone(), ys.clone()).unwrap();

        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(interp.interpolate(*x).unwrap(), *y, epsilon = 1e-12);
        }
        let mut previous = 1.0;
        for k in 1..=50 {
            let df = interp.interpolate(0.1 * f64::from(k)).unwrap();
            assert!(df <= previous + 1e-15);
            previous = df;
        }
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(LogCubicInterpolator::new(vec![0.0, 1.0], vec![1.0, 0.0]).is_err());
    }
}
