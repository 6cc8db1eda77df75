//! Fluent builder for yield curves.
//!
//! The builder collects the curve's description (name, reference date,
//! conventions, representation, base market) and finishes with one of three
//! constructors:
//!
//! - [`YieldCurveBuilder::from_points`]: key points given by date
//! - [`YieldCurveBuilder::from_terms`]: key points given by tenor
//! - [`YieldCurveBuilder::from_instruments`]: bootstrapped from quotes
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use curvekit_core::types::Date;
//! use curvekit_curves::instruments::{Deposit, InterestRateSwap, MarketInstrument};
//! use curvekit_curves::YieldCurveBuilder;
//!
//! let today = Date::from_ymd(2025, 1, 2).unwrap();
//! let quotes = vec![
//!     MarketInstrument::at_par(Arc::new(Deposit::from_tenor(today, "3M", 0.043).unwrap())),
//!     MarketInstrument::at_par(Arc::new(InterestRateSwap::from_tenor(today, "2Y", 0.040).unwrap())),
//!     MarketInstrument::at_par(Arc::new(InterestRateSwap::from_tenor(today, "5Y", 0.039).unwrap())),
//! ];
//!
//! let curve = YieldCurveBuilder::new("USD-SOFR", today)
//!     .from_instruments(quotes)
//!     .unwrap();
//!
//! assert!(curve.fitting_error() < 1e-10);
//! assert_eq!(curve.key_tenors(), ["3M", "2Y", "5Y"]);
//! ```

use std::sync::Arc;

use curvekit_core::calendars::{BusinessDayConvention, CalendarId};
use curvekit_core::daycounts::DayCountConvention;
use curvekit_core::types::{Compounding, Currency, Date, Term};
use curvekit_math::interpolation::InterpolationMethod;

use crate::bootstrap::BootstrapConfig;
use crate::conventions::{ConventionRegistry, CurveConvention};
use crate::error::CurveResult;
use crate::instruments::MarketInstrument;
use crate::market::{CurveRole, MarketCondition};
use crate::spread::ZeroSpread;
use crate::yield_curve::{CurveSettings, RateRepresentation, YieldCurve};

/// Builder for [`YieldCurve`].
#[derive(Debug, Clone)]
pub struct YieldCurveBuilder {
    name: String,
    reference_date: Date,
    convention: CurveConvention,
    representation: RateRepresentation,
    base_market: Option<Arc<MarketCondition>>,
    curve_roles: Vec<CurveRole>,
    spread: ZeroSpread,
    bootstrap: BootstrapConfig,
    allow_extrapolation: bool,
    key_tenors: Option<Vec<String>>,
}

impl YieldCurveBuilder {
    /// Starts a zero-rate curve with the default convention.
    pub fn new(name: impl Into<String>, reference_date: Date) -> Self {
        Self {
            name: name.into(),
            reference_date,
            convention: CurveConvention::default(),
            representation: RateRepresentation::default(),
            base_market: None,
            curve_roles: CurveRole::DEFAULT.to_vec(),
            spread: ZeroSpread::ZERO,
            bootstrap: BootstrapConfig::default(),
            allow_extrapolation: true,
            key_tenors: None,
        }
    }

    /// Replaces the whole convention.
    #[must_use]
    pub fn with_convention(mut self, convention: CurveConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Uses a convention looked up by name.
    pub fn with_registered_convention(
        self,
        registry: &ConventionRegistry,
        name: &str,
    ) -> CurveResult<Self> {
        let convention = *registry.get(name)?;
        Ok(self.with_convention(convention))
    }

    /// Sets the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.convention.currency = currency;
        self
    }

    /// Sets the day count used to turn dates into times.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.convention.day_count = day_count;
        self
    }

    /// Sets the compounding of zero rates.
    #[must_use]
    pub fn with_compounding(mut self, compounding: Compounding) -> Self {
        self.convention.compounding = compounding;
        self
    }

    /// Sets the interpolation between key points.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: InterpolationMethod) -> Self {
        self.convention.interpolation = interpolation;
        self
    }

    /// Sets the calendar used to roll tenor dates.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarId) -> Self {
        self.convention.calendar = calendar;
        self
    }

    /// Sets the business day convention used to roll tenor dates.
    #[must_use]
    pub fn with_business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention.business_day_convention = convention;
        self
    }

    /// Sets what the key point values mean.
    #[must_use]
    pub fn with_representation(mut self, representation: RateRepresentation) -> Self {
        self.representation = representation;
        self
    }

    /// Calibrates on top of an existing market (other curves, FX spots).
    #[must_use]
    pub fn with_base_market(mut self, market: Arc<MarketCondition>) -> Self {
        self.base_market = Some(market);
        self
    }

    /// Market slots the curve fills while calibrating.
    #[must_use]
    pub fn with_curve_roles(mut self, roles: impl Into<Vec<CurveRole>>) -> Self {
        self.curve_roles = roles.into();
        self
    }

    /// Spread applied at query time.
    #[must_use]
    pub fn with_spread(mut self, spread: ZeroSpread) -> Self {
        self.spread = spread;
        self
    }

    /// Bootstrap settings.
    #[must_use]
    pub fn with_bootstrap_config(mut self, config: BootstrapConfig) -> Self {
        self.bootstrap = config;
        self
    }

    /// Allows or forbids queries outside the key point range.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// Tenor labels for directly built curves, one per key point.
    #[must_use]
    pub fn with_key_tenors(mut self, tenors: Vec<String>) -> Self {
        self.key_tenors = Some(tenors);
        self
    }

    pub(crate) fn settings(self) -> CurveSettings {
        CurveSettings {
            name: self.name,
            reference_date: self.reference_date,
            convention: self.convention,
            representation: self.representation,
            base_market: self.base_market,
            curve_roles: self.curve_roles,
            bootstrap: self.bootstrap,
            allow_extrapolation: self.allow_extrapolation,
        }
    }

    /// Builds a curve directly from key points.
    pub fn from_points(mut self, key_points: Vec<(Date, f64)>) -> CurveResult<YieldCurve> {
        let key_tenors = self.key_tenors.take();
        let spread = self.spread;
        YieldCurve::assemble(self.settings(), key_points, key_tenors, None, spread, 0.0)
    }

    /// Builds a curve directly from key points given by tenor.
    ///
    /// Each tenor is rolled from the reference date on the curve's calendar,
    /// and the tenor strings become the key tenors.
    pub fn from_terms(self, points: Vec<(Term, f64)>) -> CurveResult<YieldCurve> {
        let calendar = self.convention.calendar.to_calendar();
        let bdc = self.convention.business_day_convention;

        let mut key_points = Vec::with_capacity(points.len());
        let mut key_tenors = Vec::with_capacity(points.len());
        for (term, value) in points {
            let date = calendar.adjust(term.add_to(self.reference_date)?, bdc)?;
            key_points.push((date, value));
            key_tenors.push(term.to_string());
        }

        self.with_key_tenors(key_tenors).from_points(key_points)
    }

    /// Bootstraps a curve so that every instrument reprices to its target.
    pub fn from_instruments(self, instruments: Vec<MarketInstrument>) -> CurveResult<YieldCurve> {
        let spread = self.spread;
        YieldCurve::calibrate(self.settings(), instruments, spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurveError;
    use crate::instruments::DummyInstrument;
    use approx::assert_relative_eq;

    fn reference() -> Date {
        Date::from_ymd(2025, 1, 2).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = YieldCurveBuilder::new("USD", reference()).settings();
        assert_eq!(settings.name, "USD");
        assert_eq!(settings.convention, CurveConvention::default());
        assert_eq!(settings.representation, RateRepresentation::ZeroRate);
        assert_eq!(settings.curve_roles, CurveRole::DEFAULT.to_vec());
        assert!(settings.allow_extrapolation);
        assert!(settings.base_market.is_none());
    }

    #[test]
    fn test_registered_convention() {
        let registry = ConventionRegistry::with_defaults();
        let builder = YieldCurveBuilder::new("EUR", reference())
            .with_registered_convention(&registry, "eur")
            .unwrap();
        assert_eq!(builder.settings().convention, CurveConvention::eur());

        let missing =
            YieldCurveBuilder::new("XXX", reference()).with_registered_convention(&registry, "JPY");
        assert!(matches!(missing, Err(CurveError::Core(_))));
    }

    #[test]
    fn test_from_terms_rolls_dates() {
        // 2025-01-02 + 1Y = 2026-01-02 (Friday); + 6M = 2025-07-02 (Wednesday)
        // + 3M = 2025-04-02 (Wednesday); + 1W = 2025-01-09 (Thursday)
        let curve = YieldCurveBuilder::new("terms", reference())
            .from_terms(vec![
                ("1W".parse().unwrap(), 0.02),
                ("3M".parse().unwrap(), 0.021),
                ("1Y".parse().unwrap(), 0.023),
            ])
            .unwrap();

        assert_eq!(curve.key_tenors(), ["1W", "3M", "1Y"]);
        assert_eq!(curve.key_points()[1].0, Date::from_ymd(2025, 4, 2).unwrap());
        assert_eq!(curve.input_rate("1Y"), Some(0.023));
    }

    #[test]
    fn test_from_terms_skips_weekend() {
        // 2025-01-04 is a Saturday; modified following rolls to Monday
        let curve = YieldCurveBuilder::new("weekend", reference())
            .from_terms(vec![("2D".parse().unwrap(), 0.02)])
            .unwrap();
        assert_eq!(curve.key_points()[0].0, Date::from_ymd(2025, 1, 6).unwrap());
    }

    #[test]
    fn test_from_instruments_keeps_spread() {
        let r = reference();
        let quotes = vec![
            MarketInstrument::at_par(Arc::new(DummyInstrument::new(r, r.add_days(365), 0.02))),
            MarketInstrument::at_par(Arc::new(DummyInstrument::new(r, r.add_days(730), 0.03))),
        ];
        let curve = YieldCurveBuilder::new("spreaded", r)
            .with_spread(ZeroSpread::from_bp(10.0))
            .from_instruments(quotes)
            .unwrap();

        assert!(curve.is_calibrated());
        assert_relative_eq!(curve.value(2.0).unwrap(), 0.03, epsilon = 1e-10);
        assert_relative_eq!(curve.spot_rate(2.0).unwrap(), 0.031, epsilon = 1e-10);
    }
}
