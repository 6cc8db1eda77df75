//! Interpolated curves over an arbitrary abscissa.
//!
//! A [`Curve`] stores key points keyed by some `X` (a time in years, a date)
//! together with a mapping from `X` onto the real line. The interpolator is
//! built once over the mapped abscissae.

use std::fmt;
use std::sync::Arc;

use curvekit_core::daycounts::DayCount;
use curvekit_core::types::Date;
use curvekit_math::interpolation::{Interpolant, InterpolationMethod, Interpolator};

use crate::error::{CurveError, CurveResult};

type Mapping<X> = Arc<dyn Fn(&X) -> f64 + Send + Sync>;

/// Key points plus an interpolator over their mapped abscissae.
///
/// ```rust
/// use curvekit_curves::Curve;
/// use curvekit_math::interpolation::InterpolationMethod;
///
/// let curve = Curve::from_points(
///     vec![(0.0, 0.02), (1.0, 0.03)],
///     InterpolationMethod::Linear,
/// ).unwrap();
/// assert!((curve.value(&0.5).unwrap() - 0.025).abs() < 1e-15);
/// ```
#[derive(Clone)]
pub struct Curve<X> {
    start: X,
    key_points: Vec<(X, f64)>,
    mapping: Mapping<X>,
    method: InterpolationMethod,
    interpolant: Interpolant,
    allow_extrapolation: bool,
}

impl<X: Clone> Curve<X> {
    /// Builds a curve from key points and an abscissa mapping.
    ///
    /// Mapped abscissae must be finite and strictly increasing.
    pub fn new<F>(
        start: X,
        key_points: Vec<(X, f64)>,
        mapping: F,
        method: InterpolationMethod,
    ) -> CurveResult<Self>
    where
        F: Fn(&X) -> f64 + Send + Sync + 'static,
    {
        if key_points.is_empty() {
            return Err(CurveError::construction("curve has no key points"));
        }

        let xs: Vec<f64> = key_points.iter().map(|(x, _)| mapping(x)).collect();
        let ys: Vec<f64> = key_points.iter().map(|(_, y)| *y).collect();

        if let Some(i) = xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(CurveError::construction(format!(
                "key points must be strictly increasing: {} then {}",
                xs[i],
                xs[i + 1]
            )));
        }
        if ys.iter().any(|y| !y.is_finite()) {
            return Err(CurveError::construction("key point values must be finite"));
        }

        let interpolant = method.build(xs, ys)?;

        Ok(Self {
            start,
            key_points,
            mapping: Arc::new(mapping),
            method,
            interpolant,
            allow_extrapolation: true,
        })
    }

    /// Enables or disables queries outside the key point range.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// Origin of the abscissa.
    pub fn start(&self) -> &X {
        &self.start
    }

    /// Key points in their original abscissa.
    pub fn key_points(&self) -> &[(X, f64)] {
        &self.key_points
    }

    /// Interpolation method in use.
    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    /// Maps an abscissa onto the interpolation axis.
    pub fn map(&self, x: &X) -> f64 {
        (self.mapping)(x)
    }

    /// Interpolated value at `x`.
    pub fn value(&self, x: &X) -> CurveResult<f64> {
        self.value_at(self.map(x))
    }

    /// Cumulative integral up to `x`.
    pub fn integral(&self, x: &X) -> CurveResult<f64> {
        self.integral_at(self.map(x))
    }

    /// Interpolated value at a point already on the interpolation axis.
    pub fn value_at(&self, t: f64) -> CurveResult<f64> {
        self.check_domain(t)?;
        Ok(self.interpolant.interpolate(t)?)
    }

    /// Cumulative integral at a point already on the interpolation axis.
    pub fn integral_at(&self, t: f64) -> CurveResult<f64> {
        self.check_domain(t)?;
        Ok(self.interpolant.integral(t)?)
    }

    /// Mapped abscissa of every key point.
    pub fn times(&self) -> Vec<f64> {
        self.key_points.iter().map(|(x, _)| self.map(x)).collect()
    }

    fn check_domain(&self, t: f64) -> CurveResult<()> {
        let (min, max) = (self.interpolant.min_x(), self.interpolant.max_x());
        if !self.allow_extrapolation && (t < min || t > max) {
            return Err(CurveError::ExtrapolationDisallowed { x: t, min, max });
        }
        Ok(())
    }
}

impl Curve<f64> {
    /// Curve whose abscissa is already a real number.
    pub fn from_points(
        key_points: Vec<(f64, f64)>,
        method: InterpolationMethod,
    ) -> CurveResult<Self> {
        let start = key_points.first().map_or(0.0, |(x, _)| *x);
        Self::new(start, key_points, |x: &f64| *x, method)
    }
}

impl Curve<Date> {
    /// Date-keyed curve measured in year fractions from `start`.
    pub fn dated(
        start: Date,
        key_points: Vec<(Date, f64)>,
        day_count: Arc<dyn DayCount>,
        method: InterpolationMethod,
    ) -> CurveResult<Self> {
        Self::new(
            start,
            key_points,
            move |date: &Date| day_count.year_fraction_f64(start, *date),
            method,
        )
    }
}

impl<X: fmt::Debug> fmt::Debug for Curve<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("start", &self.start)
            .field("key_points", &self.key_points)
            .field("method", &self.method)
            .field("allow_extrapolation", &self.allow_extrapolation)
            .finish_non_exhaustive()
    }
}
