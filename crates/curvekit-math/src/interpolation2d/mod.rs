//! Two-dimensional grid interpolation over (maturity, strike).
//!
//! Values sit on a rectangular grid, rows along maturity `t` and columns
//! along strike `k`, stored row-major: `values[i * k_len + j]` is the value
//! at `(ts[i], ks[j])`.
//!
//! Outside the grid every method holds values flat along each axis, so a
//! query beyond both ranges returns the nearest corner.

mod bicubic;
mod bilinear;
mod variance;

pub use bicubic::BiCubicSplineInterpolator;
pub use bilinear::BiLinearInterpolator;
pub use variance::VarianceInterpolator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MathError, MathResult};
use crate::interpolation::{locate, validate_axis};

/// Trait for surface interpolators.
pub trait Interpolator2D: Send + Sync + fmt::Debug {
    /// Value at maturity `t` and strike `k`.
    fn interpolate(&self, t: f64, k: f64) -> MathResult<f64>;

    /// Short name of the method.
    fn name(&self) -> &'static str;

    /// Grid range along maturity.
    fn t_range(&self) -> (f64, f64);

    /// Grid range along strike.
    fn k_range(&self) -> (f64, f64);
}

/// Validated rectangular grid.
#[derive(Debug, Clone)]
pub(crate) struct Grid {
    ts: Vec<f64>,
    ks: Vec<f64>,
    values: Vec<f64>,
}

impl Grid {
    pub(crate) fn new(ts: Vec<f64>, ks: Vec<f64>, values: Vec<f64>) -> MathResult<Self> {
        validate_axis(&ts, 2)?;
        validate_axis(&ks, 2)?;
        if values.len() != ts.len() * ks.len() {
            return Err(MathError::invalid_input(format!(
                "grid needs {} x {} = {} values, got {}",
                ts.len(),
                ks.len(),
                ts.len() * ks.len(),
                values.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MathError::invalid_input("grid values must be finite"));
        }
        Ok(Self { ts, ks, values })
    }

    pub(crate) fn ts(&self) -> &[f64] {
        &self.ts
    }

    pub(crate) fn ks(&self) -> &[f64] {
        &self.ks
    }

    pub(crate) fn at(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.ks.len() + j]
    }

    pub(crate) fn column(&self, j: usize) -> Vec<f64> {
        (0..self.ts.len()).map(|i| self.at(i, j)).collect()
    }

    /// Same grid with every value mapped through `f(t, value)`.
    pub(crate) fn map(&self, f: impl Fn(f64, f64) -> f64) -> Self {
        let values = (0..self.ts.len())
            .flat_map(|i| (0..self.ks.len()).map(move |j| (i, j)))
            .map(|(i, j)| f(self.ts[i], self.at(i, j)))
            .collect();
        Self {
            ts: self.ts.clone(),
            ks: self.ks.clone(),
            values,
        }
    }

    pub(crate) fn t_range(&self) -> (f64, f64) {
        (self.ts[0], self.ts[self.ts.len() - 1])
    }

    pub(crate) fn k_range(&self) -> (f64, f64) {
        (self.ks[0], self.ks[self.ks.len() - 1])
    }

    /// Projects `(t, k)` onto the grid rectangle.
    pub(crate) fn clamp(&self, t: f64, k: f64) -> (f64, f64) {
        let (t_min, t_max) = self.t_range();
        let (k_min, k_max) = self.k_range();
        (t.clamp(t_min, t_max), k.clamp(k_min, k_max))
    }

    /// Corner value when `(t, k)` lies outside both ranges.
    pub(crate) fn corner(&self, t: f64, k: f64) -> Option<f64> {
        let (t_min, t_max) = self.t_range();
        let (k_min, k_max) = self.k_range();
        let i = if t < t_min {
            0
        } else if t > t_max {
            self.ts.len() - 1
        } else {
            return None;
        };
        let j = if k < k_min {
            0
        } else if k > k_max {
            self.ks.len() - 1
        } else {
            return None;
        };
        Some(self.at(i, j))
    }

    /// Left strike index and linear weight for k, after clamping.
    pub(crate) fn strike_weight(&self, k: f64) -> (usize, f64) {
        let j = locate(&self.ks, k);
        (j, (k - self.ks[j]) / (self.ks[j + 1] - self.ks[j]))
    }
}

/// Runtime selector for the surface interpolators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interpolation2DMethod {
    /// Bilinear in (t, k).
    #[default]
    BiLinear,
    /// Cubic Hermite along t, linear along k.
    BiCubicSpline,
    /// Bilinear on total variance.
    VarianceBiLinear,
    /// Cubic Hermite along t on total variance, linear along k.
    VarianceBiCubicSpline,
}

impl Interpolation2DMethod {
    /// Builds the interpolator over a row-major grid.
    pub fn build(
        &self,
        ts: Vec<f64>,
        ks: Vec<f64>,
        values: Vec<f64>,
    ) -> MathResult<Box<dyn Interpolator2D>> {
        Ok(match self {
            Self::BiLinear => Box::new(BiLinearInterpolator::new(ts, ks, values)?),
            Self::BiCubicSpline => Box::new(BiCubicSplineInterpolator::new(ts, ks, values)?),
            Self::VarianceBiLinear => Box::new(VarianceInterpolator::bilinear(ts, ks, values)?),
            Self::VarianceBiCubicSpline => {
                Box::new(VarianceInterpolator::bicubic_spline(ts, ks, values)?)
            }
        })
    }

    fn label(&self) -> &'static str {
        match self {
            Self::BiLinear => "BiLinear",
            Self::BiCubicSpline => "BiCubicSpline",
            Self::VarianceBiLinear => "VarianceBiLinear",
            Self::VarianceBiCubicSpline => "VarianceBiCubicSpline",
        }
    }
}

impl fmt::Display for Interpolation2DMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Interpolation2DMethod {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', '-', ' '], "").as_str() {
            "bilinear" => Ok(Self::BiLinear),
            "bicubicspline" | "bicubic" => Ok(Self::BiCubicSpline),
            "variancebilinear" => Ok(Self::VarianceBiLinear),
            "variancebicubicspline" | "variancebicubic" => Ok(Self::VarianceBiCubicSpline),
            _ => Err(MathError::invalid_input(format!(
                "unknown 2D interpolation method: {s}"
            ))),
        }
    }
}
