//! Day count conventions.
//!
//! A day count turns a pair of dates into a year fraction. Curves use one to
//! map knot dates onto their time axis; instruments use them for accruals.
//!
//! - [`Act360`]: Actual/360
//! - [`Act365Fixed`]: Actual/365 Fixed
//! - [`ActActIsda`]: Actual/Actual ISDA
//! - [`Thirty360US`]: 30/360 US
//!
//! ```rust
//! use curvekit_core::daycounts::{DayCount, DayCountConvention};
//! use curvekit_core::types::Date;
//!
//! let dc = DayCountConvention::Act365Fixed.to_day_count();
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2026, 1, 1).unwrap();
//! assert_eq!(dc.year_fraction_f64(start, end), 1.0);
//! ```

mod actual;
mod thirty360;

pub use actual::{Act360, Act365Fixed, ActActIsda};
pub use thirty360::Thirty360US;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::CoreError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe so curves holding them stay
/// shareable across threads.
pub trait DayCount: Send + Sync + fmt::Debug {
    /// Market name of the convention (e.g. "ACT/365F").
    fn name(&self) -> &'static str;

    /// Year fraction between two dates. Negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Day count between two dates under the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Year fraction as `f64`, the form curve code works in.
    fn year_fraction_f64(&self, start: Date, end: Date) -> f64 {
        self.year_fraction(start, end).to_f64().unwrap_or(0.0)
    }
}

/// Runtime selector for the supported day counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// Actual/360
    Act360,
    /// Actual/365 Fixed
    #[default]
    Act365Fixed,
    /// Actual/Actual ISDA
    ActActIsda,
    /// 30/360 US
    Thirty360US,
}

impl DayCountConvention {
    /// Shared implementation of the convention.
    #[must_use]
    pub fn to_day_count(&self) -> Arc<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Arc::new(Act360),
            DayCountConvention::Act365Fixed => Arc::new(Act365Fixed),
            DayCountConvention::ActActIsda => Arc::new(ActActIsda),
            DayCountConvention::Thirty360US => Arc::new(Thirty360US),
        }
    }

    /// Market name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::ActActIsda => "ACT/ACT ISDA",
            DayCountConvention::Thirty360US => "30/360 US",
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(' ', "");
        match normalized.as_str() {
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),
            "ACT/365F" | "ACT/365" | "ACT/365FIXED" | "ACT365" => {
                Ok(DayCountConvention::Act365Fixed)
            }
            "ACT/ACT" | "ACT/ACTISDA" | "ACTACTISDA" => Ok(DayCountConvention::ActActIsda),
            "30/360" | "30/360US" | "BOND" | "THIRTY360US" => Ok(DayCountConvention::Thirty360US),
            _ => Err(CoreError::unknown_convention(s)),
        }
    }
}
