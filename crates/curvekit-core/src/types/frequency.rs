//! Payment frequency and compounding conventions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Payment frequency of a swap leg or coupon schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual payments (1 per year)
    #[default]
    Annual,
    /// Semi-annual payments (2 per year)
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Monthly payments (12 per year)
    Monthly,
}

impl Frequency {
    /// Number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> i32 {
        match self {
            Frequency::Annual => 12,
            Frequency::SemiAnnual => 6,
            Frequency::Quarterly => 3,
            Frequency::Monthly => 1,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

/// Interest compounding convention.
///
/// Converts between a rate quoted under the convention and the growth
/// factor (or discount factor) over a year fraction `t`:
///
/// | Convention | Compound factor |
/// |------------|-----------------|
/// | Continuous | `exp(r t)` |
/// | Simple | `1 + r t` |
/// | Periodic (m per year) | `(1 + r/m)^(m t)` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Compounding {
    /// Continuous compounding
    #[default]
    Continuous,
    /// Simple interest (no compounding)
    Simple,
    /// Annual compounding (1x per year)
    Annual,
    /// Semi-annual compounding (2x per year)
    SemiAnnual,
    /// Quarterly compounding (4x per year)
    Quarterly,
    /// Monthly compounding (12x per year)
    Monthly,
}

impl Compounding {
    /// Compounding periods per year, `None` for continuous and simple.
    #[must_use]
    pub fn periods_per_year(&self) -> Option<f64> {
        match self {
            Compounding::Continuous | Compounding::Simple => None,
            Compounding::Annual => Some(1.0),
            Compounding::SemiAnnual => Some(2.0),
            Compounding::Quarterly => Some(4.0),
            Compounding::Monthly => Some(12.0),
        }
    }

    /// Growth factor of one unit invested at `rate` for `t` years.
    #[must_use]
    pub fn compound_factor(&self, rate: f64, t: f64) -> f64 {
        match self {
            Compounding::Continuous => (rate * t).exp(),
            Compounding::Simple => 1.0 + rate * t,
            _ => {
                let m = self.periods_per_year().unwrap_or(1.0);
                (1.0 + rate / m).powf(m * t)
            }
        }
    }

    /// Discount factor implied by `rate` over `t` years.
    #[must_use]
    pub fn discount_factor(&self, rate: f64, t: f64) -> f64 {
        1.0 / self.compound_factor(rate, t)
    }

    /// Rate under this convention that reproduces `df` over `t` years.
    ///
    /// # Errors
    ///
    /// Fails when `t` is not positive or `df` is not positive, since no
    /// finite rate exists.
    pub fn rate_from_df(&self, df: f64, t: f64) -> CoreResult<f64> {
        if t <= 0.0 || !t.is_finite() {
            return Err(CoreError::invalid_input(format!(
                "rate from discount factor needs positive time, got {t}"
            )));
        }
        if df <= 0.0 || !df.is_finite() {
            return Err(CoreError::invalid_input(format!(
                "discount factor must be positive, got {df}"
            )));
        }

        let rate = match self {
            Compounding::Continuous => -df.ln() / t,
            Compounding::Simple => (1.0 / df - 1.0) / t,
            _ => {
                let m = self.periods_per_year().unwrap_or(1.0);
                ((1.0 / df).powf(1.0 / (m * t)) - 1.0) * m
            }
        };
        Ok(rate)
    }

    /// Re-expresses `rate` under `target` for the same horizon `t`.
    pub fn convert_to(&self, rate: f64, t: f64, target: Compounding) -> CoreResult<f64> {
        if *self == target {
            return Ok(rate);
        }
        target.rate_from_df(self.discount_factor(rate, t), t)
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compounding::Continuous => "Continuous",
            Compounding::Simple => "Simple",
            Compounding::Annual => "Annual",
            Compounding::SemiAnnual => "Semi-Annual",
            Compounding::Quarterly => "Quarterly",
            Compounding::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Compounding {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "continuous" => Ok(Compounding::Continuous),
            "simple" => Ok(Compounding::Simple),
            "annual" => Ok(Compounding::Annual),
            "semiannual" => Ok(Compounding::SemiAnnual),
            "quarterly" => Ok(Compounding::Quarterly),
            "monthly" => Ok(Compounding::Monthly),
            other => Err(CoreError::invalid_input(format!("unknown compounding '{other}'"))),
        }
    }
}
