//! Pass-through instrument quoting the curve's own spot rate.

use std::sync::Arc;

use curvekit_core::types::Date;

use super::{tenor_label, CalibMethod, CalibrationInstrument};
use crate::error::CurveResult;
use crate::market::MarketCondition;

/// Instrument whose model value is the discount curve's spot rate at
/// maturity.
///
/// Calibrating to dummies turns a list of zero rates into a curve with the
/// curve's own compounding, while keeping the curve recalibratable on bumps.
#[derive(Debug, Clone)]
pub struct DummyInstrument {
    maturity_date: Date,
    rate: f64,
    tenor: String,
}

impl DummyInstrument {
    /// Creates a dummy instrument.
    #[must_use]
    pub fn new(start_date: Date, maturity_date: Date, rate: f64) -> Self {
        Self {
            maturity_date,
            rate,
            tenor: tenor_label(start_date, maturity_date),
        }
    }
}

impl CalibrationInstrument for DummyInstrument {
    fn tenor(&self) -> &str {
        &self.tenor
    }

    fn calibration_date(&self) -> CurveResult<Date> {
        Ok(self.maturity_date)
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
        market.discount_curve()?.spot_rate_at(self.maturity_date)
    }
}
