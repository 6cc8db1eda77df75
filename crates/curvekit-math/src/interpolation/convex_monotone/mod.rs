//! Convex monotone interpolation (Hagan-West) on segment averages.
//!
//! The input y-values are averages of the curve over each segment:
//! `y[i]` is the mean on `[x[i-1], x[i]]`, so `y[0]` is never read. This is
//! the natural input for instantaneous forwards, where the averages are the
//! discrete forwards between curve knots. The interpolant reproduces every
//! average exactly, so the cumulative integral hits
//! `sum(y[j] * (x[j] - x[j-1]))` at each knot.
//!
//! Two weights shape the result. `quadraticity` blends towards a smooth
//! quadratic through the end values, `monotonicity` controls how far the
//! convex monotone shapes may move their turning point. With
//! `force_positive` the shapes are floored at zero.

mod section;

use serde::{Deserialize, Serialize};

use self::section::{
    Constant, Gradient, Monotone2, Monotone3, Monotone4, Quadratic, Section,
};
use super::{check_domain, validate_knots, Interpolator};
use crate::error::{MathError, MathResult};

const ALMOST_ZERO: f64 = 1e-8;

fn is_zero(x: f64) -> bool {
    x.abs() < ALMOST_ZERO
}

/// Tuning of the [`ConvexMonotoneInterpolator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvexMonotoneConfig {
    /// Weight of the quadratic shape, in `[0, 1]`.
    pub quadraticity: f64,
    /// Monotonicity weight, in `[0, 1]`.
    pub monotonicity: f64,
    /// Floor the curve at zero.
    pub force_positive: bool,
    /// Hold the last average constant over the last segment.
    pub constant_last_period: bool,
    /// Answer queries outside the knots.
    pub allow_extrapolation: bool,
}

impl Default for ConvexMonotoneConfig {
    fn default() -> Self {
        Self {
            quadraticity: 0.3,
            monotonicity: 0.7,
            force_positive: true,
            constant_last_period: false,
            allow_extrapolation: true,
        }
    }
}

impl ConvexMonotoneConfig {
    /// Pure Hagan-West monotone convex shape: no quadratic blend, full
    /// monotonicity weight and no zero floor.
    ///
    /// Under this setting nondecreasing averages give a nondecreasing curve.
    /// The default blend trades that guarantee for smoothness, and the zero
    /// floor may squeeze a flat zero region into a rising segment.
    #[must_use]
    pub fn shape_preserving() -> Self {
        Self {
            quadraticity: 0.0,
            monotonicity: 1.0,
            force_positive: false,
            ..Self::default()
        }
    }

    /// Sets the quadraticity weight.
    #[must_use]
    pub fn with_quadraticity(mut self, quadraticity: f64) -> Self {
        self.quadraticity = quadraticity;
        self
    }

    /// Sets the monotonicity weight.
    #[must_use]
    pub fn with_monotonicity(mut self, monotonicity: f64) -> Self {
        self.monotonicity = monotonicity;
        self
    }

    /// Enables or disables the zero floor.
    #[must_use]
    pub fn with_force_positive(mut self, force_positive: bool) -> Self {
        self.force_positive = force_positive;
        self
    }

    /// Enables or disables a constant last segment.
    #[must_use]
    pub fn with_constant_last_period(mut self, constant_last_period: bool) -> Self {
        self.constant_last_period = constant_last_period;
        self
    }

    /// Enables or disables extrapolation.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// Checks both weights lie in `[0, 1]`.
    pub fn validate(&self) -> MathResult<()> {
        for (name, value) in [
            ("quadraticity", self.quadraticity),
            ("monotonicity", self.monotonicity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MathError::invalid_input(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Hagan-West convex monotone interpolator.
///
/// # Example
///
/// ```rust
/// use curvekit_math::interpolation::{ConvexMonotoneInterpolator, Interpolator};
///
/// // Discrete forwards: 2% over [0, 1], 3% over [1, 2]
/// let interp = ConvexMonotoneInterpolator::new(
///     vec![0.0, 1.0, 2.0],
///     vec![0.0, 0.02, 0.03],
/// ).unwrap();
///
/// assert!((interp.integral(2.0).unwrap() - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct ConvexMonotoneInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// `sections[i]` covers `[xs[i], xs[i + 1]]`.
    sections: Vec<Section>,
    extrapolation: Section,
    config: ConvexMonotoneConfig,
}

impl ConvexMonotoneInterpolator {
    /// Creates an interpolator with the default configuration.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        Self::with_config(xs, ys, ConvexMonotoneConfig::default())
    }

    /// Creates an interpolator with an explicit configuration.
    pub fn with_config(xs: Vec<f64>, ys: Vec<f64>, config: ConvexMonotoneConfig) -> MathResult<Self> {
        config.validate()?;
        validate_knots(&xs, &ys, 2)?;

        let (sections, extrapolation) = build_sections(&xs, &ys, &config);

        Ok(Self {
            xs,
            ys,
            sections,
            extrapolation,
            config,
        })
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &ConvexMonotoneConfig {
        &self.config
    }

    /// Segment averages as given.
    #[must_use]
    pub fn averages(&self) -> &[f64] {
        &self.ys
    }

    fn last(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    fn section(&self, x: f64) -> &Section {
        let upper = self.xs.partition_point(|&k| k <= x);
        &self.sections[upper - 1]
    }
}

/// Instantaneous values at the knots from neighbouring averages.
fn knot_values(xs: &[f64], ys: &[f64], force_positive: bool) -> Vec<f64> {
    let n = xs.len();
    let mut f = vec![0.0; n];

    for i in 1..n - 1 {
        let dx_prev = xs[i] - xs[i - 1];
        let dx = xs[i + 1] - xs[i];
        f[i] = dx_prev / (dx + dx_prev) * ys[i] + dx / (dx + dx_prev) * ys[i + 1];
    }

    f[0] = 1.5 * ys[1] - 0.5 * f[1];
    f[n - 1] = 1.5 * ys[n - 1] - 0.5 * f[n - 2];
    if force_positive {
        f[0] = f[0].max(0.0);
        f[n - 1] = f[n - 1].max(0.0);
    }
    f
}

fn build_sections(xs: &[f64], ys: &[f64], config: &ConvexMonotoneConfig) -> (Vec<Section>, Section) {
    let n = xs.len();
    let f = knot_values(xs, ys, config.force_positive);
    let end = if config.constant_last_period { n - 1 } else { n };

    let mut sections = Vec::with_capacity(n - 1);
    let mut primitive = 0.0;

    for i in 1..end {
        sections.push(segment(xs[i - 1], xs[i], f[i - 1], f[i], ys[i], primitive, config));
        primitive += ys[i] * (xs[i] - xs[i - 1]);
    }

    let extrapolation = if config.constant_last_period {
        let last = Section::EverywhereConstant(Constant::new(ys[n - 1], primitive, xs[n - 2]));
        sections.push(last.clone());
        last
    } else {
        let tail = sections[n - 2].value(xs[n - 1]);
        Section::EverywhereConstant(Constant::new(tail, primitive, xs[n - 1]))
    };

    (sections, extrapolation)
}

/// Picks the shape for one segment from the end values and its average.
fn segment(
    x_prev: f64,
    x_next: f64,
    f_prev: f64,
    f_next: f64,
    f_average: f64,
    primitive: f64,
    config: &ConvexMonotoneConfig,
) -> Section {
    let g_prev = f_prev - f_average;
    let g_next = f_next - f_average;

    if is_zero(g_prev) && is_zero(g_next) {
        return Section::ConstantGradient(Gradient::new(f_prev, f_next, x_prev, x_next, primitive));
    }

    let quadratic = |floored: bool| {
        if floored {
            Section::QuadraticMin(Quadratic::floored(x_prev, x_next, f_prev, f_next, f_average, primitive))
        } else {
            Section::Quadratic(Quadratic::new(x_prev, x_next, f_prev, f_next, f_average, primitive))
        }
    };
    let monotone4 = |eta: f64| {
        if config.force_positive {
            Section::ConvexMonotone4Min(Monotone4::floored(
                x_prev, x_next, g_prev, g_next, f_average, eta, primitive,
            ))
        } else {
            Section::ConvexMonotone4(Monotone4::new(
                x_prev, x_next, g_prev, g_next, f_average, eta, primitive,
            ))
        }
    };

    let q = config.quadraticity;
    let prefer_floored = g_prev >= -2.0 * g_next && g_prev > -0.5 * g_next && config.force_positive;
    let mut weight = q;
    let mut quad = (q > 0.0).then(|| quadratic(prefer_floored));
    let mut monotone = None;

    if q < 1.0 {
        let upper = (1.0 + config.monotonicity) / 2.0;
        let lower = (1.0 - config.monotonicity) / 2.0;

        let in_quadratic_region = (g_prev > 0.0 && -0.5 * g_prev >= g_next && g_next >= -2.0 * g_prev)
            || (g_prev < 0.0 && -0.5 * g_prev <= g_next && g_next <= -2.0 * g_prev);

        if in_quadratic_region {
            weight = 1.0;
            if is_zero(q) {
                quad = Some(quadratic(config.force_positive));
            }
        } else if (g_prev < 0.0 && g_next > -2.0 * g_prev) || (g_prev > 0.0 && g_next < -2.0 * g_prev) {
            let eta = (g_next + 2.0 * g_prev) / (g_next - g_prev);
            monotone = Some(if eta < upper {
                Section::ConvexMonotone2(Monotone2::new(
                    x_prev, x_next, g_prev, g_next, f_average, eta, primitive,
                ))
            } else {
                monotone4(upper)
            });
        } else if (g_prev > 0.0 && g_next < 0.0 && g_next > -0.5 * g_prev)
            || (g_prev < 0.0 && g_next > 0.0 && g_next < -0.5 * g_prev)
        {
            let eta = g_next / (g_next - g_prev) * 3.0;
            monotone = Some(if eta > lower {
                Section::ConvexMonotone3(Monotone3::new(
                    x_prev, x_next, g_prev, g_next, f_average, eta, primitive,
                ))
            } else {
                monotone4(lower)
            });
        } else {
            let eta = (g_next / (g_prev + g_next)).clamp(lower, upper);
            monotone = Some(monotone4(eta));
        }
    }

    let quad = quad.unwrap_or_else(|| quadratic(prefer_floored));
    match monotone {
        Some(monotone) if !is_zero(weight - 1.0) => {
            if is_zero(weight) {
                monotone
            } else {
                Section::Combo {
                    quadratic: Box::new(quad),
                    monotone: Box::new(monotone),
                    weight,
                }
            }
        }
        _ => quad,
    }
}

impl Interpolator for ConvexMonotoneInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        check_domain(self.config.allow_extrapolation, x, &self.xs)?;

        if x >= self.last() {
            return Ok(self.extrapolation.value(x));
        }
        if x < self.xs[0] {
            return Ok(self.sections[0].value(self.xs[0]));
        }
        Ok(self.section(x).value(x))
    }

    fn integral(&self, x: f64) -> MathResult<f64> {
        check_domain(self.config.allow_extrapolation, x, &self.xs)?;

        if x >= self.last() {
            return Ok(self.extrapolation.integral(x));
        }
        if x < self.xs[0] {
            return Ok(self.sections[0].value(self.xs[0]) * (x - self.xs[0]));
        }
        Ok(self.section(x).integral(x))
    }

    fn name(&self) -> &'static str {
        "ConvexMonotonic"
    }

    fn allows_extrapolation(&self) -> bool {
        self.config.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.last()
    }
}
