//! Parametric exponential spline for discount factors.

use super::{validate_knots, Interpolator};
use crate::error::{MathError, MathResult};

/// Exponential spline in `exp(-alpha x)`.
///
/// The knots carry parameters rather than values:
///
/// - `ys[0]` is the decay `alpha`
/// - `ys[1..=3]` are the basis weights `b1`, `b2`, `b3`
/// - every further knot `(t_i, v_i)` adds a term switched on after `t_i`
///
/// ```text
/// D(x) = 1 + b1 (1 - f) + b2 (1 - f^2) + b3 (1 - f^3)
///          + sum over t_i <= x of v_i ((1 - F) - (1 - F^2) + (1 - F^3) / 3)
/// f = exp(-alpha x),  F = exp(-alpha (x - t_i))
/// ```
///
/// `D(x) = 1` for `x <= 0`. The form is defined everywhere, so there is no
/// extrapolation check.
#[derive(Debug, Clone)]
pub struct ExponentialSplineInterpolator {
    xs: Vec<f64>,
    alpha: f64,
    weights: [f64; 3],
    knots: Vec<(f64, f64)>,
}

impl ExponentialSplineInterpolator {
    /// Builds the spline from parameter knots.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys, 4)?;
        if ys[0] <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "exponential spline decay must be positive, got {}",
                ys[0]
            )));
        }

        let knots = xs[4..].iter().copied().zip(ys[4..].iter().copied()).collect();
        Ok(Self {
            alpha: ys[0],
            weights: [ys[1], ys[2], ys[3]],
            knots,
            xs,
        })
    }

    /// The decay parameter.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn value(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }

        let f = (-self.alpha * x).exp();
        let [b1, b2, b3] = self.weights;
        let base = 1.0 + b1 * (1.0 - f) + b2 * (1.0 - f * f) + b3 * (1.0 - f * f * f);

        let knots: f64 = self
            .knots
            .iter()
            .filter(|(t, _)| x >= *t)
            .map(|&(t, v)| {
                let big_f = (-self.alpha * (x - t)).exp();
                v * ((1.0 - big_f) - (1.0 - big_f * big_f) + (1.0 - big_f * big_f * big_f) / 3.0)
            })
            .sum();

        base + knots
    }
}

impl Interpolator for ExponentialSplineInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        Ok(self.value(x))
    }

    fn name(&self) -> &'static str {
        "ExponentialSpline"
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
