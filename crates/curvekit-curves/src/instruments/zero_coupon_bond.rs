//! Zero coupon bond instrument.

use std::sync::Arc;

use curvekit_core::daycounts::DayCountConvention;
use curvekit_core::types::{Compounding, Date, Term};

use super::{tenor_label, CalibMethod, CalibrationInstrument};
use crate::error::CurveResult;
use crate::market::MarketCondition;

/// A zero coupon bond quoted by its yield.
///
/// The model value is the yield, under the bond's own compounding and day
/// count, implied by the discount factor from the valuation date to maturity.
#[derive(Debug, Clone)]
pub struct ZeroCouponBond {
    maturity_date: Date,
    yield_rate: f64,
    compounding: Compounding,
    day_count: DayCountConvention,
    tenor: String,
}

impl ZeroCouponBond {
    /// Creates a bond quoted at `yield_rate` (annual compounding, ACT/365F).
    #[must_use]
    pub fn new(issue_date: Date, maturity_date: Date, yield_rate: f64) -> Self {
        Self {
            maturity_date,
            yield_rate,
            compounding: Compounding::Annual,
            day_count: DayCountConvention::Act365Fixed,
            tenor: tenor_label(issue_date, maturity_date),
        }
    }

    /// Creates a bond maturing `tenor` after `issue_date`.
    pub fn from_tenor(issue_date: Date, tenor: &str, yield_rate: f64) -> CurveResult<Self> {
        let term: Term = tenor.parse()?;
        let maturity_date = term.add_to(issue_date)?;
        Ok(Self {
            tenor: tenor.trim().to_uppercase(),
            ..Self::new(issue_date, maturity_date, yield_rate)
        })
    }

    /// Sets the yield compounding.
    #[must_use]
    pub fn with_compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Sets the yield day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Price per unit face implied by the quoted yield as of `valuation`.
    #[must_use]
    pub fn price(&self, valuation: Date) -> f64 {
        let t = self
            .day_count
            .to_day_count()
            .year_fraction_f64(valuation, self.maturity_date);
        self.compounding.discount_factor(self.yield_rate, t)
    }
}

impl CalibrationInstrument for ZeroCouponBond {
    fn tenor(&self) -> &str {
        &self.tenor
    }

    fn calibration_date(&self) -> CurveResult<Date> {
        Ok(self.maturity_date)
    }

    fn rate(&self) -> f64 {
        self.yield_rate
    }

    fn bump(&self, bp: f64) -> Arc<dyn CalibrationInstrument> {
        self.bump_to(self.yield_rate + bp * 1e-4)
    }

    fn bump_to(&self, rate: f64) -> Arc<dyn CalibrationInstrument> {
        Arc::new(Self {
            yield_rate: rate,
            ..self.clone()
        })
    }

    fn model_value(&self, market: &MarketCondition, _method: CalibMethod) -> CurveResult<f64> {
        let valuation = market.valuation_date();
        let df = market
            .discount_curve()?
            .df_between(valuation, self.maturity_date)?;
        let t = self
            .day_count
            .to_day_count()
            .year_fraction_f64(valuation, self.maturity_date);
        Ok(self.compounding.rate_from_df(df, t)?)
    }
}
