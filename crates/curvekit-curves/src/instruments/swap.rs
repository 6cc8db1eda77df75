//! Interest rate swap instrument.
//!
//! Fixed-for-floating swaps calibrate the medium-to-long end of the curve.

use std::sync::Arc;

use curvekit_core::calendars::{BusinessDayConvention, CalendarId};
use curvekit_core::daycounts::DayCountConvention;
use curvekit_core::types::{Date, Frequency, Term};

use super::{adjusted, tenor_label, CalibMethod, CalibrationInstrument};
use crate::error::{CurveError, CurveResult};
use crate::market::MarketCondition;

/// Fixed vs floating interest rate swap.
///
/// # Model Value
///
/// The fair fixed rate. With [`CalibMethod::Default`] or
/// [`CalibMethod::IrsFloatingPvConst1`] the floating leg is worth par:
/// ```text
/// r = (DF(T0) - DF(Tn)) / Σ τi × DF(Ti)
/// ```
/// With [`CalibMethod::IrsFloatingPvReal`] each floating coupon is projected
/// off the fixing curve and discounted on the discount curve. Only payments
/// after the valuation date count.
#[derive(Debug, Clone)]
pub struct InterestRateSwap {
    start_date: Date,
    maturity_date: Date,
    fixed_rate: f64,
    fixed_frequency: Frequency,
    fixed_day_count: DayCountConvention,
    floating_frequency: Frequency,
    floating_day_count: DayCountConvention,
    calendar: CalendarId,
    business_day_convention: BusinessDayConvention,
    tenor: String,
}

impl InterestRateSwap {
    /// Creates a swap with annual ACT/365F fixed and quarterly ACT/360
    /// floating legs.
    #[must_use]
    pub fn new(start_date: Date, maturity_date: Date, fixed_rate: f64) -> Self {
        Self {
            start_date,
            maturity_date,
            fixed_rate,
            fixed_frequency: Frequency::Annual,
            fixed_day_count: DayCountConvention::Act365Fixed,
            floating_frequency: Frequency::Quarterly,
            floating_day_count: DayCountConvention::Act360,
            calendar: CalendarId::Weekend,
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
            tenor: tenor_label(start_date, maturity_date),
        }
    }

    /// Creates a swap from a tenor string (e.g. "2Y", "10Y").
    pub fn from_tenor(start_date: Date, tenor: &str, fixed_rate: f64) -> CurveResult<Self> {
        let term: Term = tenor.parse()?;
        let maturity_date = term.add_to(start_date)?;
        Ok(Self {
            tenor: tenor.trim().to_uppercase(),
            ..Self::new(start_date, maturity_date, fixed_rate)
        })
    }

    /// Sets the fixed leg frequency and day count.
    #[must_use]
    pub fn with_fixed_leg(mut self, frequency: Frequency, day_count: DayCountConvention) -> Self {
        self.fixed_frequency = frequency;
        self.fixed_day_count = day_count;
        self
    }

    /// Sets the floating leg frequency and day count.
    #[must_use]
    pub fn with_floating_leg(
        mut self,
        frequency: Frequency,
        day_count: DayCountConvention,
    ) -> Self {
        self.floating_frequency = frequency;
        self.floating_day_count = day_count;
        self
    }

    /// Sets the calendar for payment dates.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarId) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention for payment dates.
    #[must_use]
    pub fn with_business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.business_day_convention = convention;
        self
    }

    /// Returns the effective date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Fixed leg accrual periods as (accrual start, payment date).
    pub fn fixed_periods(&self) -> CurveResult<Vec<(Date, Date)>> {
        self.periods(self.fixed_frequency)
    }

    /// Floating leg accrual periods as (accrual start, payment date).
    pub fn floating_periods(&self) -> CurveResult<Vec<(Date, Date)>> {
        self.periods(self.floating_frequency)
    }

    fn periods(&self, frequency: Frequency) -> CurveResult<Vec<(Date, Date)>> {
        let dates = generate_schedule(self.start_date, self.maturity_date, frequency)?;
        let adjusted = dates
            .into_iter()
            .map(|d| adjusted(d, self.calendar, self.business_day_convention))
            .collect::<CurveResult<Vec<Date>>>()?;
        let mut periods = Vec::with_capacity(adjusted.len());
        let mut accrual_start = self.start_date;
        for payment in adjusted {
            periods.push((accrual_start, payment));
            accrual_start = payment;
        }
        Ok(periods)
    }

    /// Σ τi × DF(Ti) over fixed payments after the valuation date.
    fn annuity(&self, market: &MarketCondition) -> CurveResult<f64> {
        let curve = market.discount_curve()?;
        let day_count = self.fixed_day_count.to_day_count();
        let mut annuity = 0.0;
        for (start, payment) in self.fixed_periods()? {
            if payment > market.valuation_date() {
                annuity += day_count.year_fraction_f64(start, payment) * curve.df_at(payment)?;
            }
        }
        if annuity <= 0.0 {
            return Err(CurveError::construction(format!(
                "IRS {} has no fixed payment after {}",
                self.tenor,
                market.valuation_date()
            )));
        }
        Ok(annuity)
    }

    fn floating_leg_pv(&self, market: &MarketCondition) -> CurveResult<f64> {
        let discount = market.discount_curve()?;
        let fixing = market.fixing_curve()?;
        let mut pv = 0.0;
        for (start, payment) in self.floating_periods()? {
            if payment > market.valuation_date() {
                let coupon = 1.0 / fixing.df_between(start, payment)? - 1.0;
                pv += coupon * discount.df_at(payment)?;
            }
        }
        Ok(pv)
    }
}

impl CalibrationInstrument for InterestRateSwap {
    fn tenor(&self) -> &str {
        &self.tenor
    }

    fn calibration_date(&self) -> CurveResult<Date> {
        adjusted(self.maturity_date, self.calendar, self.business_day_convention)
    }

    fn rate(&self) -> f64 {
        self.fixed_rate
    }

    fn bump(&self, bp: f64) -> Arc<dyn CalibrationInstrument> {
        self.bump_to(self.fixed_rate + bp * 1e-4)
    }

    fn bump_to(&self, rate: f64) -> Arc<dyn CalibrationInstrument> {
        Arc::new(Self {
            fixed_rate: rate,
            ..self.clone()
        })
    }

    fn model_value(&self, market: &MarketCondition, method: CalibMethod) -> CurveResult<f64> {
        match method {
            CalibMethod::Default | CalibMethod::IrsFloatingPvConst1 => {
                let annuity = self.annuity(market)?;
                let curve = market.discount_curve()?;
                let last_payment = self.calibration_date()?;
                Ok((curve.df_at(self.start_date)? - curve.df_at(last_payment)?) / annuity)
            }
            CalibMethod::IrsFloatingPvReal => {
                let annuity = self.annuity(market)?;
                Ok(self.floating_leg_pv(market)? / annuity)
            }
            CalibMethod::IrsNetPv => Err(CurveError::unrecognized_instrument(
                format!("IRS {}", self.tenor),
                "calibration method IrsNetPv is not supported",
            )),
        }
    }
}

/// Unadjusted payment dates from `start` (exclusive) to `end` (inclusive),
/// rolled forward from `start` so month ends do not drift.
fn generate_schedule(start: Date, end: Date, frequency: Frequency) -> CurveResult<Vec<Date>> {
    let step = frequency.months_per_period();
    let mut dates = Vec::new();
    let mut k = 1;
    loop {
        let next = start.add_months(step * k)?;
        if next >= end {
            break;
        }
        dates.push(next);
        k += 1;
    }
    dates.push(end);
    Ok(dates)
}
