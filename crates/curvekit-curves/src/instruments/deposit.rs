//! Money market deposit instrument.
//!
//! A deposit is the simplest instrument for curve bootstrap,
//! used for the short end of the curve (O/N, T/N, 1W to 12M).

use std::sync::Arc;

use curvekit_core::calendars::{BusinessDayConvention, CalendarId};
use curvekit_core::daycounts::DayCountConvention;
use curvekit_core::types::{Date, Term};

use super::{adjusted, tenor_label, CalibMethod, CalibrationInstrument};
use crate::error::CurveResult;
use crate::market::MarketCondition;

/// A money market deposit.
///
/// # Model Value
///
/// The fair simple rate from the valuation date to the adjusted maturity:
/// ```text
/// r = (1 / DF(val, end) - 1) / τ(val, end)
/// ```
/// where τ uses the deposit's day count.
#[derive(Debug, Clone)]
pub struct Deposit {
    start_date: Date,
    end_date: Date,
    rate: f64,
    day_count: DayCountConvention,
    calendar: CalendarId,
    business_day_convention: BusinessDayConvention,
    tenor: String,
}

impl Deposit {
    /// Creates a deposit between two dates (ACT/360, weekend calendar,
    /// modified following).
    #[must_use]
    pub fn new(start_date: Date, end_date: Date, rate: f64) -> Self {
        Self {
            start_date,
            end_date,
            rate,
            day_count: DayCountConvention::Act360,
            calendar: CalendarId::Weekend,
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
            tenor: tenor_label(start_date, end_date),
        }
    }

    /// Creates a deposit from a tenor string (e.g. "ON", "1W", "3M", "1Y").
    pub fn from_tenor(spot_date: Date, tenor: &str, rate: f64) -> CurveResult<Self> {
        let term: Term = tenor.parse()?;
        let end_date = term.add_to(spot_date)?;
        Ok(Self {
            tenor: tenor.trim().to_uppercase(),
            ..Self::new(spot_date, end_date, rate)
        })
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the calendar used to adjust the maturity.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarId) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention used to adjust the maturity.
    #[must_use]
    pub fn with_business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.business_day_convention = convention;
        self
    }

    /// Returns the start date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the unadjusted end date.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.end_date
    }
}

impl CalibrationInstrument for Deposit {
    fn tenor(&self) -> &str {
        &self.tenor
    }

    fn calibration_date(&self) -> CurveResult<Date> {
        adjusted(self.end_date, self.calendar, self.business_day_convention)
    }

    fn rate(&self) -> f64 {
        self.rate
    }

    fn bump(&self, bp: f64) -> Arc<dyn CalibrationInstrument> {
        self.bump_to(self.rate + bp * 1e-4)
    }

    fn bump_to(&self, rate: f64) -> Arc<dyn CalibrationInstrument> {
        Arc::new(Self {
            rate,
            ..self.clone()
        })
    }

    fn model_value(&self, market: &MarketCondition, _method: CalibMethod) -> CurveResult<f64> {
        let valuation = market.valuation_date();
        let end = self.calibration_date()?;
        let df = market.discount_curve()?.df_between(valuation, end)?;
        let tau = self.day_count.to_day_count().year_fraction_f64(valuation, end);
        Ok((1.0 / df - 1.0) / tau)
    }
}
