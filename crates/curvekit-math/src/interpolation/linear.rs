//! Linear interpolation.

use super::{check_domain, locate, validate_knots, Interpolator};
use crate::error::MathResult;

/// Piecewise linear interpolation with flat extrapolation.
///
/// Segment integrals are accumulated at construction so [`Interpolator::integral`]
/// is O(log n). The integral starts at the first knot and follows the flat
/// extrapolation outside the knots.
///
/// # Example
///
/// ```rust
/// use curvekit_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0]).unwrap();
/// assert_eq!(interp.interpolate(1.5).unwrap(), 2.5);
/// assert_eq!(interp.interpolate(3.0).unwrap(), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    integrals: Vec<f64>,
    allow_extrapolation: bool,
}

impl LinearInterpolator {
    /// Creates a linear interpolator. A single knot gives a constant function.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys, 1)?;

        let mut integrals = Vec::with_capacity(xs.len());
        integrals.push(0.0);
        for i in 1..xs.len() {
            let dx = xs[i] - xs[i - 1];
            let slope = (ys[i] - ys[i - 1]) / dx;
            integrals.push(integrals[i - 1] + dx * (ys[i - 1] + 0.5 * dx * slope));
        }

        Ok(Self {
            xs,
            ys,
            integrals,
            allow_extrapolation: true,
        })
    }

    /// Enables or disables flat extrapolation.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    fn last(&self) -> usize {
        self.xs.len() - 1
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        check_domain(self.allow_extrapolation, x, &self.xs)?;

        let n = self.last();
        if x <= self.xs[0] {
            return Ok(self.ys[0]);
        }
        if x >= self.xs[n] {
            return Ok(self.ys[n]);
        }

        let i = locate(&self.xs, x);
        let t = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        Ok(self.ys[i] + t * (self.ys[i + 1] - self.ys[i]))
    }

    fn integral(&self, x: f64) -> MathResult<f64> {
        check_domain(self.allow_extrapolation, x, &self.xs)?;

        let n = self.last();
        if x <= self.xs[0] {
            return Ok(self.ys[0] * (x - self.xs[0]));
        }
        if x >= self.xs[n] {
            return Ok(self.integrals[n] + self.ys[n] * (x - self.xs[n]));
        }

        let i = locate(&self.xs, x);
        let dx = x - self.xs[i];
        let slope = (self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i]);
        Ok(self.integrals[i] + dx * (self.ys[i] + 0.5 * dx * slope))
    }

    fn name(&self) -> &'static str {
        "Linear"
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.last()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_interpolation() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 4.0]).unwrap();

        assert_relative_eq!(interp.interpolate(0.0).unwrap(), 0.0, epsilon = 1e-10);
        assert_relative_eq!(interp.interpolate(1.0).unwrap(), 2.0, epsilon = 1e-10);
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 4.0, epsilon = 1e-10);
        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(interp.interpolate(1.5).unwrap(), 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_flat_extrapolation() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap();

        assert_relative_eq!(interp.interpolate(-1.0).unwrap(), 1.0);
        assert_relative_eq!(interp.interpolate(5.0).unwrap(), 3.0);
    }

    #[test]
    fn test_extrapolation_disabled() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0])
            .unwrap()
            .with_extrapolation(false);

        assert!(matches!(
            interp.interpolate(2.5),
            Err(MathError::ExtrapolationNotAllowed { .. })
        ));
        assert!(interp.integral(-0.5).is_err());
        assert!(interp.interpolate(2.0).is_ok());
    }

    #[test]
    fn test_integral_is_trapezoidal() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 3.0], vec![1.0, 3.0, 3.0]).unwrap();

        // [0, 1]: area of trapezoid 1..3 = 2
        assert_relative_eq!(interp.integral(1.0).unwrap(), 2.0, epsilon = 1e-12);
        // [0, 0.5]: 0.5 * (1 + 2) / 2 = 0.75
        assert_relative_eq!(interp.integral(0.5).unwrap(), 0.75, epsilon = 1e-12);
        // [0, 3] = 2 + 6
        assert_relative_eq!(interp.integral(3.0).unwrap(), 8.0, epsilon = 1e-12);
        // flat beyond the end
        assert_relative_eq!(interp.integral(4.0).unwrap(), 11.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_point_is_constant() {
        let interp = LinearInterpolator::new(vec![1.0], vec![0.03]).unwrap();

        assert_eq!(interp.interpolate(0.0).unwrap(), 0.03);
        assert_eq!(interp.interpolate(7.0).unwrap(), 0.03);
        assert_relative_eq!(interp.integral(3.0).unwrap(), 0.06, epsilon = 1e-15);
    }

    #[test]
    fn test_unsorted_error() {
        assert!(LinearInterpolator::new(vec![1.0, 0.0, 2.0], vec![1.0, 0.0, 2.0]).is_err());
        assert!(LinearInterpolator::new(vec![], vec![]).is_err());
    }
}
