//! Log-linear interpolation.

use super::{check_domain, locate, validate_knots, Extrapolation, Interpolator};
use crate::error::{MathError, MathResult};

/// Linear interpolation of ln(y).
///
/// The usual choice for discount factors: values stay positive and the implied
/// instantaneous forward is constant between knots. Past the knots the value
/// is either held ([`Extrapolation::Flat`]) or the boundary log-slope is
/// continued ([`Extrapolation::Natural`], the default).
///
/// ```rust
/// use curvekit_math::interpolation::{Interpolator, LogLinearInterpolator};
///
/// let interp = LogLinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![1.0, 0.95, 0.90]).unwrap();
/// let df = interp.interpolate(0.5).unwrap();
/// assert!((df - 0.95_f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LogLinearInterpolator {
    xs: Vec<f64>,
    log_ys: Vec<f64>,
    slopes: Vec<f64>,
    extrapolation: Extrapolation,
    allow_extrapolation: bool,
}

impl LogLinearInterpolator {
    /// Creates a log-linear interpolator. All y values must be positive.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys, 1)?;

        let mut log_ys = Vec::with_capacity(ys.len());
        for (i, &y) in ys.iter().enumerate() {
            if y <= 0.0 {
                return Err(MathError::invalid_input(format!(
                    "y[{i}] = {y} is not positive; log-linear requires positive values"
                )));
            }
            log_ys.push(y.ln());
        }

        let slopes = xs
            .windows(2)
            .zip(log_ys.windows(2))
            .map(|(x, ly)| (ly[1] - ly[0]) / (x[1] - x[0]))
            .collect();

        Ok(Self {
            xs,
            log_ys,
            slopes,
            extrapolation: Extrapolation::default(),
            allow_extrapolation: true,
        })
    }

    /// Sets the extrapolation style.
    #[must_use]
    pub fn with_extrapolation_style(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Enables or disables extrapolation.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    fn boundary(&self, knot: usize, slope: Option<f64>, x: f64) -> f64 {
        match (self.extrapolation, slope) {
            (Extrapolation::Natural, Some(s)) => (self.log_ys[knot] + s * (x - self.xs[knot])).exp(),
            _ => self.log_ys[knot].exp(),
        }
    }
}

impl Interpolator for LogLinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        check_domain(self.allow_extrapolation, x, &self.xs)?;

        let n = self.xs.len() - 1;
        if x < self.xs[0] {
            return Ok(self.boundary(0, self.slopes.first().copied(), x));
        }
        if x >= self.xs[n] {
            return Ok(self.boundary(n, self.slopes.last().copied(), x));
        }

        let i = locate(&self.xs, x);
        Ok((self.log_ys[i] + self.slopes[i] * (x - self.xs[i])).exp())
    }

    fn name(&self) -> &'static str {
        "LogLinear"
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
