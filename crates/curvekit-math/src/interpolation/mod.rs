//! One-dimensional interpolation.
//!
//! Every interpolator is built once from strictly increasing knots and is
//! immutable afterwards, so queries are pure and safe to share across threads.
//!
//! # Available Methods
//!
//! | Method | Knots | Extrapolation | Integral |
//! |--------|-------|---------------|----------|
//! | [`LinearInterpolator`] | ≥ 1 | flat | yes |
//! | [`LogLinearInterpolator`] | ≥ 1 | flat or natural | no |
//! | [`ForwardFlatInterpolator`] | ≥ 1 | flat | yes (from 0) |
//! | [`CubicHermiteFdInterpolator`] | ≥ 2 | flat | no |
//! | [`CubicHermiteMonotonicInterpolator`] | ≥ 2 | flat | yes |
//! | [`LogCubicInterpolator`] | ≥ 2 | flat | no |
//! | [`ConvexMonotoneInterpolator`] | ≥ 2 | flat | yes |
//! | [`ExponentialSplineInterpolator`] | ≥ 4 | parametric | no |
//!
//! [`InterpolationMethod`] selects one at runtime and builds an
//! [`Interpolant`], which dispatches statically over the concrete types.

mod convex_monotone;
mod cubic_hermite_fd;
mod cubic_hermite_monotonic;
mod exponential_spline;
mod forward_flat;
mod linear;
mod log_cubic;
mod log_linear;

pub use convex_monotone::{ConvexMonotoneConfig, ConvexMonotoneInterpolator};
pub use cubic_hermite_fd::CubicHermiteFdInterpolator;
pub use cubic_hermite_monotonic::CubicHermiteMonotonicInterpolator;
pub use exponential_spline::ExponentialSplineInterpolator;
pub use forward_flat::ForwardFlatInterpolator;
pub use linear::LinearInterpolator;
pub use log_cubic::LogCubicInterpolator;
pub use log_linear::LogLinearInterpolator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MathError, MathResult};

/// Trait for one-dimensional interpolators.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the cumulative integral of the interpolant up to x.
    ///
    /// The lower limit is method specific: the first knot for most methods,
    /// zero for [`ForwardFlatInterpolator`].
    fn integral(&self, x: f64) -> MathResult<f64> {
        let _ = x;
        Err(MathError::integral_not_supported(self.name()))
    }

    /// Short name of the method.
    fn name(&self) -> &'static str;

    /// Returns true if queries outside the knots are answered.
    fn allows_extrapolation(&self) -> bool {
        true
    }

    /// Returns the first knot.
    fn min_x(&self) -> f64;

    /// Returns the last knot.
    fn max_x(&self) -> f64;

    /// Checks if x is within the knot range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// How log-based interpolators continue past the knots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Extrapolation {
    /// Hold the boundary value.
    Flat,
    /// Continue the boundary log-slope.
    #[default]
    Natural,
}

/// Runtime selector for the 1D interpolators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InterpolationMethod {
    /// Piecewise linear.
    #[default]
    Linear,
    /// Linear in ln(y).
    LogLinear,
    /// Alias of [`InterpolationMethod::CubicHermiteFd`].
    CubicSpline,
    /// Alias of [`InterpolationMethod::CubicHermiteFd`].
    LinearCubicSpline,
    /// Monotonic cubic Hermite in ln(y).
    LogCubic,
    /// Cubic Hermite with monotonicity-preserving tangents.
    CubicHermiteMonotonic,
    /// Cubic Hermite with finite-difference tangents.
    CubicHermiteFd,
    /// Piecewise constant.
    ForwardFlat,
    /// Hagan-West convex monotone.
    ConvexMonotonic,
    /// Parametric exponential spline on discount factors.
    ExponentialSpline,
}

impl InterpolationMethod {
    /// Builds the interpolator over the given knots with default settings.
    pub fn build(&self, xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Interpolant> {
        Ok(match self {
            Self::Linear => Interpolant::Linear(LinearInterpolator::new(xs, ys)?),
            Self::LogLinear => Interpolant::LogLinear(LogLinearInterpolator::new(xs, ys)?),
            Self::CubicSpline | Self::LinearCubicSpline | Self::CubicHermiteFd => {
                Interpolant::CubicHermiteFd(CubicHermiteFdInterpolator::new(xs, ys)?)
            }
            Self::LogCubic => Interpolant::LogCubic(LogCubicInterpolator::new(xs, ys)?),
            Self::CubicHermiteMonotonic => Interpolant::CubicHermiteMonotonic(
                CubicHermiteMonotonicInterpolator::new(xs, ys)?,
            ),
            Self::ForwardFlat => Interpolant::ForwardFlat(ForwardFlatInterpolator::new(xs, ys)?),
            Self::ConvexMonotonic => {
                Interpolant::ConvexMonotone(ConvexMonotoneInterpolator::new(xs, ys)?)
            }
            Self::ExponentialSpline => {
                Interpolant::ExponentialSpline(ExponentialSplineInterpolator::new(xs, ys)?)
            }
        })
    }

    /// Minimum number of knots the method accepts.
    #[must_use]
    pub fn min_points(&self) -> usize {
        match self {
            Self::Linear | Self::LogLinear | Self::ForwardFlat => 1,
            Self::ExponentialSpline => 4,
            _ => 2,
        }
    }

    /// Returns true if the built interpolator implements [`Interpolator::integral`].
    #[must_use]
    pub fn supports_integral(&self) -> bool {
        matches!(
            self,
            Self::Linear | Self::ForwardFlat | Self::CubicHermiteMonotonic | Self::ConvexMonotonic
        )
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::LogLinear => "LogLinear",
            Self::CubicSpline => "CubicSpline",
            Self::LinearCubicSpline => "LinearCubicSpline",
            Self::LogCubic => "LogCubic",
            Self::CubicHermiteMonotonic => "CubicHermiteMonotonic",
            Self::CubicHermiteFd => "CubicHermiteFd",
            Self::ForwardFlat => "ForwardFlat",
            Self::ConvexMonotonic => "ConvexMonotonic",
            Self::ExponentialSpline => "ExponentialSpline",
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InterpolationMethod {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', '-', ' '], "").as_str() {
            "linear" => Ok(Self::Linear),
            "loglinear" => Ok(Self::LogLinear),
            "cubicspline" => Ok(Self::CubicSpline),
            "linearcubicspline" => Ok(Self::LinearCubicSpline),
            "logcubic" => Ok(Self::LogCubic),
            "cubichermitemonotonic" | "cubichermitemonotic" => Ok(Self::CubicHermiteMonotonic),
            "cubichermitefd" => Ok(Self::CubicHermiteFd),
            "forwardflat" => Ok(Self::ForwardFlat),
            "convexmonotonic" | "convexmonotone" | "convexmonotic" => Ok(Self::ConvexMonotonic),
            "exponentialspline" => Ok(Self::ExponentialSpline),
            _ => Err(MathError::invalid_input(format!(
                "unknown interpolation method: {s}"
            ))),
        }
    }
}

/// A built interpolator of any supported kind.
#[derive(Debug, Clone)]
pub enum Interpolant {
    /// See [`LinearInterpolator`].
    Linear(LinearInterpolator),
    /// See [`LogLinearInterpolator`].
    LogLinear(LogLinearInterpolator),
    /// See [`ForwardFlatInterpolator`].
    ForwardFlat(ForwardFlatInterpolator),
    /// See [`CubicHermiteFdInterpolator`].
    CubicHermiteFd(CubicHermiteFdInterpolator),
    /// See [`CubicHermiteMonotonicInterpolator`].
    CubicHermiteMonotonic(CubicHermiteMonotonicInterpolator),
    /// See [`LogCubicInterpolator`].
    LogCubic(LogCubicInterpolator),
    /// See [`ConvexMonotoneInterpolator`].
    ConvexMonotone(ConvexMonotoneInterpolator),
    /// See [`ExponentialSplineInterpolator`].
    ExponentialSpline(ExponentialSplineInterpolator),
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            Interpolant::Linear($inner) => $body,
            Interpolant::LogLinear($inner) => $body,
            Interpolant::ForwardFlat($inner) => $body,
            Interpolant::CubicHermiteFd($inner) => $body,
            Interpolant::CubicHermiteMonotonic($inner) => $body,
            Interpolant::LogCubic($inner) => $body,
            Interpolant::ConvexMonotone($inner) => $body,
            Interpolant::ExponentialSpline($inner) => $body,
        }
    };
}

impl Interpolator for Interpolant {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        dispatch!(self, i => i.interpolate(x))
    }

    fn integral(&self, x: f64) -> MathResult<f64> {
        dispatch!(self, i => i.integral(x))
    }

    fn name(&self) -> &'static str {
        dispatch!(self, i => i.name())
    }

    fn allows_extrapolation(&self) -> bool {
        dispatch!(self, i => i.allows_extrapolation())
    }

    fn min_x(&self) -> f64 {
        dispatch!(self, i => i.min_x())
    }

    fn max_x(&self) -> f64 {
        dispatch!(self, i => i.max_x())
    }
}

/// Checks knot count, matching lengths, finiteness and strict ordering.
pub(crate) fn validate_knots(xs: &[f64], ys: &[f64], required: usize) -> MathResult<()> {
    if xs.len() < required {
        return Err(MathError::insufficient_data(required, xs.len()));
    }
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "xs and ys must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if ys.iter().any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("knots must be finite"));
    }
    validate_axis(xs, required)
}

/// Checks an abscissa grid: enough points, finite, strictly increasing.
pub(crate) fn validate_axis(xs: &[f64], required: usize) -> MathResult<()> {
    if xs.len() < required {
        return Err(MathError::insufficient_data(required, xs.len()));
    }
    if xs.iter().any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("knots must be finite"));
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::invalid_input(
            "x values must be strictly increasing",
        ));
    }
    Ok(())
}

/// Fails with `ExtrapolationNotAllowed` if x is outside the knots and
/// extrapolation is disabled.
pub(crate) fn check_domain(allow: bool, x: f64, xs: &[f64]) -> MathResult<()> {
    let (min, max) = (xs[0], xs[xs.len() - 1]);
    if !allow && (x < min || x > max) {
        return Err(MathError::extrapolation(x, min, max));
    }
    Ok(())
}

/// Index i with `xs[i] <= x < xs[i + 1]`, clamped to `[0, len - 2]`.
///
/// Requires at least two knots.
pub(crate) fn locate(xs: &[f64], x: f64) -> usize {
    let upper = xs.partition_point(|&k| k <= x);
    upper.saturating_sub(1).min(xs.len() - 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> (Vec<f64>, Vec<f64>) {
        (
            vec![0.5, 1.0, 2.0, 3.0, 5.0],
            vec![0.02, 0.025, 0.03, 0.035, 0.04],
        )
    }

    #[test]
    fn test_locate() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(locate(&xs, -1.0), 0);
        assert_eq!(locate(&xs, 0.0), 0);
        assert_eq!(locate(&xs, 0.999), 0);
        assert_eq!(locate(&xs, 1.0), 1);
        assert_eq!(locate(&xs, 2.5), 2);
        assert_eq!(locate(&xs, 3.0), 2);
        assert_eq!(locate(&xs, 10.0), 2);
    }

    #[test]
    fn test_validate_knots() {
        assert!(validate_knots(&[0.0, 1.0], &[1.0, 2.0], 2).is_ok());
        assert!(matches!(
            validate_knots(&[0.0], &[1.0], 2),
            Err(MathError::InsufficientData { required: 2, actual: 1 })
        ));
        assert!(validate_knots(&[0.0, 1.0], &[1.0], 1).is_err());
        assert!(validate_knots(&[1.0, 1.0], &[1.0, 2.0], 1).is_err());
        assert!(validate_knots(&[0.0, f64::NAN], &[1.0, 2.0], 1).is_err());
    }

    #[test]
    fn test_all_local_interpolators_through_points() {
        let (xs, ys) = sample();
        for method in [
            InterpolationMethod::Linear,
            InterpolationMethod::LogLinear,
            InterpolationMethod::CubicSpline,
            InterpolationMethod::LinearCubicSpline,
            InterpolationMethod::LogCubic,
            InterpolationMethod::CubicHermiteMonotonic,
            InterpolationMethod::CubicHermiteFd,
            InterpolationMethod::ForwardFlat,
        ] {
            let interp = method.build(xs.clone(), ys.clone()).unwrap();
            for (x, y) in xs.iter().zip(ys.iter()) {
                assert_relative_eq!(interp.interpolate(*x).unwrap(), *y, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_flat_extrapolation() {
        let (xs, ys) = sample();
        for method in [
            InterpolationMethod::Linear,
            InterpolationMethod::ForwardFlat,
            InterpolationMethod::CubicHermiteFd,
            InterpolationMethod::CubicHermiteMonotonic,
        ] {
            let interp = method.build(xs.clone(), ys.clone()).unwrap();
            assert_relative_eq!(interp.interpolate(10.0).unwrap(), 0.04, epsilon = 1e-15);
            assert_relative_eq!(interp.interpolate(0.1).unwrap(), 0.02, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_integral_support_matches_selector() {
        let (xs, ys) = sample();
        for method in [
            InterpolationMethod::Linear,
            InterpolationMethod::LogLinear,
            InterpolationMethod::CubicHermiteFd,
            InterpolationMethod::CubicHermiteMonotonic,
            InterpolationMethod::LogCubic,
            InterpolationMethod::ForwardFlat,
            InterpolationMethod::ConvexMonotonic,
        ] {
            let interp = method.build(xs.clone(), ys.clone()).unwrap();
            let result = interp.integral(1.5);
            assert_eq!(result.is_ok(), method.supports_integral(), "{method}");
            if let Err(err) = result {
                assert!(matches!(err, MathError::IntegralNotSupported { .. }));
            }
        }
    }

    #[test]
    fn test_method_parse_round_trip() {
        for method in [
            InterpolationMethod::Linear,
            InterpolationMethod::LogLinear,
            InterpolationMethod::CubicSpline,
            InterpolationMethod::LinearCubicSpline,
            InterpolationMethod::LogCubic,
            InterpolationMethod::CubicHermiteMonotonic,
            InterpolationMethod::CubicHermiteFd,
            InterpolationMethod::ForwardFlat,
            InterpolationMethod::ConvexMonotonic,
            InterpolationMethod::ExponentialSpline,
        ] {
            assert_eq!(method.to_string().parse::<InterpolationMethod>().unwrap(), method);
        }
        assert!("Akima".parse::<InterpolationMethod>().is_err());
    }

    #[test]
    fn test_min_points() {
        assert!(InterpolationMethod::Linear.build(vec![1.0], vec![0.03]).is_ok());
        assert!(InterpolationMethod::ConvexMonotonic
            .build(vec![1.0], vec![0.03])
            .is_err());
        assert_eq!(InterpolationMethod::ExponentialSpline.min_points(), 4);
    }
}
