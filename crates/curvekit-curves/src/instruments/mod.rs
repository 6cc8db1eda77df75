//! Calibration instruments for yield curve bootstrap.
//!
//! Any type implementing [`CalibrationInstrument`] can be a bootstrap target:
//! it reports the date its key point sits on, prices itself against a
//! [`MarketCondition`], and produces bumped copies for risk scenarios.
//!
//! # Available Instruments
//!
//! - [`Deposit`]: money market deposit, fair simple rate
//! - [`InterestRateSwap`]: fixed vs floating swap, fair fixed rate
//! - [`ZeroCouponBond`]: yield implied by the discount factor to maturity
//! - [`DummyInstrument`]: the curve's own spot rate at maturity
//!
//! ```rust
//! use std::sync::Arc;
//! use curvekit_core::types::Date;
//! use curvekit_curves::instruments::{Deposit, MarketInstrument};
//!
//! let spot = Date::from_ymd(2025, 1, 2).unwrap();
//! let deposit = Deposit::from_tenor(spot, "3M", 0.0525).unwrap();
//! let quote = MarketInstrument::new(Arc::new(deposit), 0.0525);
//! assert_eq!(quote.instrument.tenor(), "3M");
//! ```

mod deposit;
mod dummy;
mod swap;
mod zero_coupon_bond;

pub use deposit::Deposit;
pub use dummy::DummyInstrument;
pub use swap::InterestRateSwap;
pub use zero_coupon_bond::ZeroCouponBond;

use std::fmt;
use std::sync::Arc;

use curvekit_core::calendars::{BusinessDayConvention, CalendarId};
use curvekit_core::types::{Date, Term};
use serde::{Deserialize, Serialize};

use crate::error::CurveResult;
use crate::market::MarketCondition;

/// How an instrument's model value is computed during calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CalibMethod {
    /// The instrument's natural quote (fair rate for rate instruments).
    #[default]
    Default,
    /// Swap fair rate with the floating leg worth par.
    IrsFloatingPvConst1,
    /// Swap fair rate with the floating leg projected off the fixing curve.
    IrsFloatingPvReal,
    /// Swap net present value.
    IrsNetPv,
}

/// An instrument a yield curve can be calibrated to.
pub trait CalibrationInstrument: Send + Sync + fmt::Debug {
    /// Tenor label, e.g. "3M".
    fn tenor(&self) -> &str;

    /// Date at which the instrument's key point is placed.
    fn calibration_date(&self) -> CurveResult<Date>;

    /// Quoted rate of the instrument.
    fn rate(&self) -> f64;

    /// Copy with the quoted rate moved by `bp` basis points.
    fn bump(&self, bp: f64) -> Arc<dyn CalibrationInstrument>;

    /// Copy with the quoted rate reset to `rate`.
    fn bump_to(&self, rate: f64) -> Arc<dyn CalibrationInstrument>;

    /// Model value under `market`, comparable to the calibration target.
    fn model_value(&self, market: &MarketCondition, method: CalibMethod) -> CurveResult<f64>;
}

/// A calibration instrument with its observed quote.
#[derive(Debug, Clone)]
pub struct MarketInstrument {
    /// The instrument.
    pub instrument: Arc<dyn CalibrationInstrument>,
    /// Observed market value the model value must reproduce.
    pub target_value: f64,
    /// How the model value is computed.
    pub calib_method: CalibMethod,
}

impl MarketInstrument {
    /// Creates a quote using [`CalibMethod::Default`].
    #[must_use]
    pub fn new(instrument: Arc<dyn CalibrationInstrument>, target_value: f64) -> Self {
        Self {
            instrument,
            target_value,
            calib_method: CalibMethod::Default,
        }
    }

    /// Quote using the instrument's own rate as target.
    #[must_use]
    pub fn at_par(instrument: Arc<dyn CalibrationInstrument>) -> Self {
        let target = instrument.rate();
        Self::new(instrument, target)
    }

    /// Sets the calibration method.
    #[must_use]
    pub fn with_calib_method(mut self, method: CalibMethod) -> Self {
        self.calib_method = method;
        self
    }

    /// Moves both the instrument and the target by `bp` basis points.
    #[must_use]
    pub fn bumped(&self, bp: f64) -> Self {
        Self {
            instrument: self.instrument.bump(bp),
            target_value: self.target_value + bp * 1e-4,
            calib_method: self.calib_method,
        }
    }

    /// Resets both the instrument and the target to `rate`.
    #[must_use]
    pub fn reset_to(&self, rate: f64) -> Self {
        Self {
            instrument: self.instrument.bump_to(rate),
            target_value: rate,
            calib_method: self.calib_method,
        }
    }

    /// Model value minus target under `market`.
    pub fn residual(&self, market: &MarketCondition) -> CurveResult<f64> {
        Ok(self.instrument.model_value(market, self.calib_method)? - self.target_value)
    }
}

/// Tenor label for an instrument built from explicit dates.
pub(crate) fn tenor_label(start: Date, maturity: Date) -> String {
    Term::between(start, maturity).map_or_else(|_| maturity.to_string(), |t| t.to_string())
}

/// Business-day adjusted date.
pub(crate) fn adjusted(
    date: Date,
    calendar: CalendarId,
    bda: BusinessDayConvention,
) -> CurveResult<Date> {
    Ok(calendar.to_calendar().adjust(date, bda)?)
}
