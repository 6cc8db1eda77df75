//! Monotonicity-preserving cubic Hermite interpolation.
//!
//! Initial tangents use the Fritsch-Butland weighted harmonic mean of the
//! adjacent secants (zero where the secants change sign) with one-sided
//! three-point estimates at the ends. A Hyman filter then caps each tangent
//! so that monotone data produce a monotone interpolant.

use super::{check_domain, locate, validate_knots, Interpolator};
use crate::error::MathResult;

/// Magnitudes below this count as zero when comparing secant signs.
const SIGN_TOLERANCE: f64 = 1e-8;

/// Cubic Hermite spline that does not overshoot monotone data.
///
/// On segment `i` with `d = x - x[i]` the value is
/// `y[i] + d * (a[i] + d * (b[i] + d * c[i]))`. Outside the knots the boundary
/// value is held.
///
/// ```rust
/// use curvekit_math::interpolation::{CubicHermiteMonotonicInterpolator, Interpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 0.0, 1.0, 1.0];
/// let interp = CubicHermiteMonotonicInterpolator::new(xs, ys).unwrap();
/// let y = interp.interpolate(1.5).unwrap();
/// assert!(y > 0.0 && y < 1.0);
/// assert_eq!(interp.interpolate(0.5).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct CubicHermiteMonotonicInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    primitives: Vec<f64>,
    allow_extrapolation: bool,
}

fn sign(value: f64) -> i8 {
    if value.abs() < SIGN_TOLERANCE {
        0
    } else if value < 0.0 {
        -1
    } else {
        1
    }
}

/// Three-point end tangent, zeroed or capped against the end secant.
fn end_tangent(h0: f64, h1: f64, del0: f64, del1: f64) -> f64 {
    let tangent = ((2.0 * h0 + h1) * del0 - h0 * del1) / (h0 + h1);
    if sign(tangent) != sign(del0) {
        0.0
    } else if sign(del0) != sign(del1) && tangent.abs() > (3.0 * del0).abs() {
        3.0 * del0
    } else {
        tangent
    }
}

fn initial_tangents(h: &[f64], del: &[f64]) -> Vec<f64> {
    let n = h.len() + 1;
    if n == 2 {
        return vec![del[0], del[0]];
    }

    let mut tangents = vec![0.0; n];
    for k in 0..n - 2 {
        if sign(del[k]) * sign(del[k + 1]) > 0 {
            let (hk, hk1) = (h[k], h[k + 1]);
            tangents[k + 1] = 3.0 * (hk + hk1) * del[k] * del[k + 1]
                / ((2.0 * hk + hk1) * del[k] + (hk + 2.0 * hk1) * del[k + 1]);
        }
    }
    tangents[0] = end_tangent(h[0], h[1], del[0], del[1]);
    tangents[n - 1] = end_tangent(h[n - 2], h[n - 3], del[n - 2], del[n - 3]);
    tangents
}

/// Keeps the sign of `tangent` when it agrees with `reference`, capped at `bound`.
fn limit(tangent: f64, reference: f64, bound: f64) -> f64 {
    if tangent * reference > 0.0 {
        tangent.signum() * tangent.abs().min(bound)
    } else {
        0.0
    }
}

fn hyman_filter(tangents: &mut [f64], h: &[f64], s: &[f64]) {
    let n = tangents.len();
    for i in 0..n {
        let t = tangents[i];
        tangents[i] = if i == 0 {
            limit(t, s[0], (3.0 * s[0]).abs())
        } else if i == n - 1 {
            limit(t, s[n - 2], (3.0 * s[n - 2]).abs())
        } else {
            let pm = (s[i - 1] * h[i] + s[i] * h[i - 1]) / (h[i - 1] + h[i]);
            let mut bound = 3.0 * s[i - 1].abs().min(s[i].abs()).min(pm.abs());

            if i > 1 && (s[i - 1] - s[i - 2]) * (s[i] - s[i - 1]) > 0.0 {
                let pd = (s[i - 1] * (2.0 * h[i - 1] + h[i - 2]) - s[i - 2] * h[i - 1])
                    / (h[i - 2] + h[i - 1]);
                if pm * pd > 0.0 && pm * (s[i - 1] - s[i - 2]) > 0.0 {
                    bound = bound.max(1.5 * pm.abs().min(pd.abs()));
                }
            }
            if i < n - 2 && (s[i] - s[i - 1]) * (s[i + 1] - s[i]) > 0.0 {
                let pu = (s[i] * (2.0 * h[i] + h[i + 1]) - s[i + 1] * h[i]) / (h[i] + h[i + 1]);
                if pm * pu > 0.0 && -pm * (s[i] - s[i - 1]) > 0.0 {
                    bound = bound.max(1.5 * pm.abs().min(pu.abs()));
                }
            }
            limit(t, pm, bound)
        };
    }
}

impl CubicHermiteMonotonicInterpolator {
    /// Creates the interpolator. Requires at least 2 knots.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys, 2)?;

        let n = xs.len();
        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let s: Vec<f64> = ys
            .windows(2)
            .zip(h.iter())
            .map(|(y, dx)| (y[1] - y[0]) / dx)
            .collect();

        let mut tangents = initial_tangents(&h, &s);
        hyman_filter(&mut tangents, &h, &s);

        let mut a = Vec::with_capacity(n - 1);
        let mut b = Vec::with_capacity(n - 1);
        let mut c = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let dy = ys[i + 1] - ys[i];
            let dx = h[i];
            a.push(tangents[i]);
            b.push(3.0 * dy / (dx * dx) - (2.0 * tangents[i] + tangents[i + 1]) / dx);
            c.push(-2.0 * dy / (dx * dx * dx) + (tangents[i] + tangents[i + 1]) / (dx * dx));
        }

        // primitives[i] = integral from x[0] to x[i]
        let mut primitives = vec![0.0; n];
        for i in 1..n {
            let dx = h[i - 1];
            primitives[i] = primitives[i - 1]
                + dx * (ys[i - 1]
                    + dx * (a[i - 1] / 2.0 + dx * (b[i - 1] / 3.0 + dx * c[i - 1] / 4.0)));
        }

        Ok(Self {
            xs,
            ys,
            a,
            b,
            c,
            primitives,
            allow_extrapolation: true,
        })
    }

    /// Enables or disables flat extrapolation.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }
}

impl Interpolator for CubicHermiteMonotonicInterpolator {
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
        let d = x - self.xs[i];
        Ok(self.ys[i] + d * (self.a[i] + d * (self.b[i] + d * self.c[i])))
    }

    fn integral(&self, x: f64) -> MathResult<f64> {
        check_domain(self.allow_extrapolation, x, &self.xs)?;

        let n = self.xs.len() - 1;
        if x < self.xs[0] {
            return Ok(self.ys[0] * (x - self.xs[0]));
        }
        if x >= self.xs[n] {
            return Ok(self.primitives[n] + self.ys[n] * (x - self.xs[n]));
        }

        let i = locate(&self.xs, x);
        let d = x - self.xs[i];
        Ok(self.primitives[i]
            + d * (self.ys[i]
                + d * (self.a[i] / 2.0 + d * (self.b[i] / 3.0 + d * self.c[i] / 4.0))))
    }

    fn name(&self) -> &'static str {
        "CubicHermiteMonotonic"
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_two_points_is_linear() {
        let interp =
            CubicHermiteMonotonicInterpolator::new(vec![0.0, 2.0], vec![1.0, 3.0]).unwrap();

        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 1.5, epsilon = 1e-14);
        assert_relative_eq!(interp.integral(2.0).unwrap(), 4.0, epsilon = 1e-14);
    }

    #[test]
    fn test_flat_region_has_no_overshoot() {
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = vec![0.0, 1.0, 1.0, 1.0, 2.0];
        let interp = CubicHermiteMonotonicInterpolator::new(xs, ys).unwrap();

        for k in 0..=100 {
            let x = 1.0 + 2.0 * f64::from(k) / 100.0;
            assert_relative_eq!(interp.interpolate(x).unwrap(), 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_integral_matches_numerical_quadrature() {
        let xs = vec![0.25, 1.0, 2.0, 5.0, 10.0];
        let ys = vec![0.010, 0.018, 0.024, 0.031, 0.033];
        let interp = CubicHermiteMonotonicInterpolator::new(xs, ys).unwrap();

        let upper = 7.3;
        let steps = 20_000;
        let h = (upper - 0.25) / f64::from(steps);
        let mut simpson = 0.0;
        for k in 0..=steps {
            let x = 0.25 + h * f64::from(k);
            let w = if k == 0 || k == steps {
                1.0
            } else if k % 2 == 1 {
                4.0
            } else {
                2.0
            };
            simpson += w * interp.interpolate(x).unwrap();
        }
        simpson *= h / 3.0;

        assert_relative_eq!(interp.integral(upper).unwrap(), simpson, epsilon = 1e-9);
    }

    #[test]
    fn test_end_tangent_capped() {
        // del0 and del1 of opposite sign: end tangent limited to 3 * del0
        assert_relative_eq!(end_tangent(1.0, 1.0, 1.0, -10.0), 3.0);
        // sign mismatch zeroes it
        assert_eq!(end_tangent(1.0, 1.0, 1.0, 5.0), 0.0);
    }

    fn monotone_data() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        prop::collection::vec((0.05f64..3.0, 0.0f64..0.02), 2..12).prop_map(|steps| {
            let mut xs = Vec::with_capacity(steps.len());
            let mut ys = Vec::with_capacity(steps.len());
            let (mut x, mut y) = (0.0, 0.01);
            for (dx, dy) in steps {
                x += dx;
                y += dy;
                xs.push(x);
                ys.push(y);
            }
            (xs, ys)
        })
    }

    proptest! {
        #[test]
        fn prop_knots_are_exact((xs, ys) in monotone_data()) {
            let interp = CubicHermiteMonotonicInterpolator::new(xs.clone(), ys.clone()).unwrap();
            for (x, y) in xs.iter().zip(ys.iter()) {
                prop_assert!((interp.interpolate(*x).unwrap() - y).abs() < 1e-10);
            }
        }

        #[test]
        fn prop_monotone_input_gives_monotone_output(
            (xs, ys) in monotone_data(),
            samples in prop::collection::vec(0.0f64..1.0, 1000),
        ) {
            let interp = CubicHermiteMonotonicInterpolator::new(xs.clone(), ys).unwrap();
            let (lo, hi) = (xs[0], xs[xs.len() - 1]);
            let mut points: Vec<f64> = samples.iter().map(|u| lo + u * (hi - lo)).collect();
            points.sort_by(f64::total_cmp);

            let mut previous = f64::NEG_INFINITY;
            for x in points {
                let y = interp.interpolate(x).unwrap();
                prop_assert!(y >= previous - 1e-12, "decrease at x = {}: {} < {}", x, y, previous);
                previous = y;
            }
        }
    }
}
