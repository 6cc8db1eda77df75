//! Yield curves.
//!
//! A [`YieldCurve`] holds key points over dates and answers discount factor,
//! spot rate and forward rate queries. Its key points mean different things
//! depending on the [`RateRepresentation`] chosen at construction: zero rates,
//! instantaneous forward rates or discount factors. Every query goes through
//! [`YieldCurve::compounded_rate`], so the representation is decided in one
//! place.
//!
//! Curves built from instruments remember them; bumping such a curve bumps
//! the instruments and re-runs the bootstrap. Curves built directly from key
//! points bump the key points themselves. Either way the original curve is
//! left untouched.

use std::collections::BTreeMap;
use std::sync::Arc;

use curvekit_core::calendars::Calendar;
use curvekit_core::daycounts::DayCount;
use curvekit_core::types::{Compounding, Currency, Date, Term};
use curvekit_math::interpolation::InterpolationMethod;
use serde::{Deserialize, Serialize};

use crate::bootstrap::{self, BootstrapConfig};
use crate::bumping::KeyRateBump;
use crate::conventions::CurveConvention;
use crate::curve::Curve;
use crate::error::{CurveError, CurveResult};
use crate::instruments::MarketInstrument;
use crate::market::{CurveRole, MarketCondition};
use crate::spread::ZeroSpread;

/// Times closer to zero than this are treated as today.
const ALMOST_ZERO: f64 = 1e-12;

/// Horizon used to approximate instantaneous forwards.
const FORWARD_STEP: f64 = 1e-4;

/// Meaning of a yield curve's key point values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RateRepresentation {
    /// Zero rates under the curve's compounding.
    #[default]
    ZeroRate,
    /// Instantaneous forward rates, integrated to get discount factors.
    ForwardRate,
    /// Discount factors.
    DiscountFactor,
}

/// Everything about a curve except its key points and spread.
#[derive(Debug, Clone)]
pub(crate) struct CurveSettings {
    pub name: String,
    pub reference_date: Date,
    pub convention: CurveConvention,
    pub representation: RateRepresentation,
    pub base_market: Option<Arc<MarketCondition>>,
    pub curve_roles: Vec<CurveRole>,
    pub bootstrap: BootstrapConfig,
    pub allow_extrapolation: bool,
}

/// An immutable term structure of interest rates.
///
/// Build one with [`YieldCurveBuilder`](crate::builder::YieldCurveBuilder).
///
/// ```rust
/// use curvekit_core::types::Date;
/// use curvekit_curves::YieldCurveBuilder;
///
/// let today = Date::from_ymd(2025, 1, 2).unwrap();
/// let curve = YieldCurveBuilder::new("USD", today)
///     .from_points(vec![(today, 0.03), (today.add_days(3650), 0.04)])
///     .unwrap();
///
/// assert_eq!(curve.df(0.0).unwrap(), 1.0);
/// assert!(curve.df(5.0).unwrap() < curve.df(1.0).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct YieldCurve {
    settings: CurveSettings,
    spread: ZeroSpread,
    key_tenors: Vec<String>,
    instruments: Option<Vec<MarketInstrument>>,
    fitting_error: f64,
    input_rates: BTreeMap<String, f64>,
    day_count: Arc<dyn DayCount>,
    calendar: Arc<dyn Calendar>,
    curve: Curve<Date>,
}

impl YieldCurve {
    /// Builds a curve over the given key points without calibration.
    pub(crate) fn assemble(
        settings: CurveSettings,
        key_points: Vec<(Date, f64)>,
        key_tenors: Option<Vec<String>>,
        instruments: Option<Vec<MarketInstrument>>,
        spread: ZeroSpread,
        fitting_error: f64,
    ) -> CurveResult<Self> {
        let interpolation = settings.convention.interpolation;
        if settings.representation == RateRepresentation::ForwardRate
            && !interpolation.supports_integral()
        {
            return Err(CurveError::construction(format!(
                "forward rate curves need an integrable interpolation, {interpolation} is not"
            )));
        }

        let reference = settings.reference_date;
        let key_tenors = match (&instruments, key_tenors) {
            (Some(quotes), _) => quotes
                .iter()
                .map(|q| q.instrument.tenor().to_string())
                .collect(),
            (None, Some(tenors)) => {
                if tenors.len() != key_points.len() {
                    return Err(CurveError::construction(format!(
                        "{} key tenors for {} key points",
                        tenors.len(),
                        key_points.len()
                    )));
                }
                tenors
            }
            (None, None) => key_points
                .iter()
                .map(|(date, _)| Term::between(reference, *date).map(|t| t.to_string()))
                .collect::<Result<Vec<_>, _>>()?,
        };

        let input_rates = match &instruments {
            Some(quotes) => key_tenors
                .iter()
                .cloned()
                .zip(quotes.iter().map(|q| q.target_value))
                .collect(),
            None => key_tenors
                .iter()
                .cloned()
                .zip(key_points.iter().map(|(_, v)| *v))
                .collect(),
        };

        let day_count = settings.convention.day_count.to_day_count();
        let curve = Curve::dated(reference, key_points, Arc::clone(&day_count), interpolation)?
            .with_extrapolation(settings.allow_extrapolation);

        Ok(Self {
            calendar: settings.convention.calendar.to_calendar(),
            settings,
            spread,
            key_tenors,
            instruments,
            fitting_error,
            input_rates,
            day_count,
            curve,
        })
    }

    /// Bootstraps a curve from instrument quotes.
    pub(crate) fn calibrate(
        settings: CurveSettings,
        instruments: Vec<MarketInstrument>,
        spread: ZeroSpread,
    ) -> CurveResult<Self> {
        let calibration = bootstrap::calibrate(&settings, instruments)?;
        Self::assemble(
            settings,
            calibration.key_points,
            None,
            Some(calibration.instruments),
            spread,
            calibration.fitting_error,
        )
    }

    // ---- Description ----

    /// Curve name.
    pub fn name(&self) -> &str {
        &self.settings.name
    }

    /// Date at which time is zero.
    pub fn reference_date(&self) -> Date {
        self.settings.reference_date
    }

    /// Currency of the curve.
    pub fn currency(&self) -> Currency {
        self.settings.convention.currency
    }

    /// Full convention of the curve.
    pub fn convention(&self) -> &CurveConvention {
        &self.settings.convention
    }

    /// Compounding of the curve's zero rates.
    pub fn compounding(&self) -> Compounding {
        self.settings.convention.compounding
    }

    /// Interpolation between key points.
    pub fn interpolation(&self) -> InterpolationMethod {
        self.settings.convention.interpolation
    }

    /// Meaning of the key point values.
    pub fn representation(&self) -> RateRepresentation {
        self.settings.representation
    }

    /// Key points in date order.
    pub fn key_points(&self) -> &[(Date, f64)] {
        self.curve.key_points()
    }

    /// Tenor labels: one per instrument for calibrated curves, one per key
    /// point otherwise.
    pub fn key_tenors(&self) -> &[String] {
        &self.key_tenors
    }

    /// Calibration instruments, `None` for directly built curves.
    pub fn instruments(&self) -> Option<&[MarketInstrument]> {
        self.instruments.as_deref()
    }

    /// True if the curve was bootstrapped from instruments.
    pub fn is_calibrated(&self) -> bool {
        self.instruments.is_some()
    }

    /// Market the curve was calibrated on top of.
    pub fn base_market(&self) -> Option<&Arc<MarketCondition>> {
        self.settings.base_market.as_ref()
    }

    /// Market slots the curve fills while calibrating.
    pub fn curve_roles(&self) -> &[CurveRole] {
        &self.settings.curve_roles
    }

    /// Spread applied at query time.
    pub fn spread(&self) -> ZeroSpread {
        self.spread
    }

    /// Largest calibration residual, zero for directly built curves.
    pub fn fitting_error(&self) -> f64 {
        self.fitting_error
    }

    /// Raw input rate for a tenor label.
    pub fn input_rate(&self, tenor: &str) -> Option<f64> {
        self.input_rates.get(tenor.trim()).copied()
    }

    /// Underlying interpolated curve of key point values.
    pub fn curve(&self) -> &Curve<Date> {
        &self.curve
    }

    /// Year fraction from the reference date to `date`.
    pub fn time(&self, date: Date) -> f64 {
        self.day_count
            .year_fraction_f64(self.settings.reference_date, date)
    }

    /// Interpolated key point value at time `t`, without spread.
    pub fn value(&self, t: f64) -> CurveResult<f64> {
        self.curve.value_at(t)
    }

    // ---- Queries ----

    /// Growth factor of one unit from today to time `t`.
    ///
    /// Today and the past compound to exactly 1.
    pub fn compounded_rate(&self, t: f64) -> CurveResult<f64> {
        if t < ALMOST_ZERO {
            return Ok(1.0);
        }

        let compounding = self.compounding();
        let spread = self.spread.value(t);

        if self.settings.representation == RateRepresentation::ZeroRate {
            return Ok(compounding.compound_factor(self.curve.value_at(t)? + spread, t));
        }

        let base = match self.settings.representation {
            RateRepresentation::ForwardRate => self.curve.integral_at(t)?.exp(),
            _ => 1.0 / self.curve.value_at(t)?,
        };
        if self.spread.is_zero() {
            return Ok(base);
        }
        let zero = compounding.rate_from_df(1.0 / base, t)?;
        Ok(compounding.compound_factor(zero + spread, t))
    }

    /// Discount factor from today to time `t`.
    pub fn df(&self, t: f64) -> CurveResult<f64> {
        if t < ALMOST_ZERO {
            return Ok(1.0);
        }
        if self.settings.representation == RateRepresentation::DiscountFactor
            && self.spread.is_zero()
        {
            return self.curve.value_at(t);
        }
        Ok(1.0 / self.compounded_rate(t)?)
    }

    /// Discount factor from today to `date`.
    pub fn df_at(&self, date: Date) -> CurveResult<f64> {
        self.df(self.time(date))
    }

    /// Discount factor from `start` to `end`.
    pub fn df_between(&self, start: Date, end: Date) -> CurveResult<f64> {
        Ok(self.df_at(end)? / self.df_at(start)?)
    }

    /// Zero rate to time `t` under the curve's compounding, spread included.
    pub fn spot_rate(&self, t: f64) -> CurveResult<f64> {
        if self.settings.representation == RateRepresentation::ZeroRate {
            return Ok(self.curve.value_at(t)? + self.spread.value(t));
        }
        if t < ALMOST_ZERO {
            return self.forward_rate(0.0, FORWARD_STEP, self.compounding());
        }
        Ok(self.compounding().rate_from_df(self.df(t)?, t)?)
    }

    /// Zero rate to `date` under the curve's compounding.
    pub fn spot_rate_at(&self, date: Date) -> CurveResult<f64> {
        self.spot_rate(self.time(date))
    }

    /// Forward rate over `[t0, t0 + dt]` under `compounding`.
    ///
    /// Horizons shorter than the forward step are widened to it.
    pub fn forward_rate(&self, t0: f64, dt: f64, compounding: Compounding) -> CurveResult<f64> {
        if dt < FORWARD_STEP * 1e-4 {
            return self.forward_rate(t0, FORWARD_STEP, compounding);
        }
        let ratio = self.df(t0 + dt)? / self.df(t0)?;
        Ok(compounding.rate_from_df(ratio, dt)?)
    }

    /// Forward rate over a short step starting at `t`.
    pub fn instantaneous_forward(&self, t: f64, compounding: Compounding) -> CurveResult<f64> {
        self.forward_rate(t, FORWARD_STEP, compounding)
    }

    /// Rate between two dates under `compounding`, accrued with the curve's
    /// day count.
    pub fn zero_rate(&self, start: Date, end: Date, compounding: Compounding) -> CurveResult<f64> {
        let df = self.df_between(start, end)?;
        let tau = self.day_count.year_fraction_f64(start, end);
        Ok(compounding.rate_from_df(df, tau)?)
    }

    /// Forward rate from `start` over `tenor`, the end date rolled on the
    /// curve's calendar.
    pub fn forward_rate_between_dates(
        &self,
        start: Date,
        tenor: Term,
        compounding: Compounding,
    ) -> CurveResult<f64> {
        let end = self.calendar.adjust(
            tenor.add_to(start)?,
            self.settings.convention.business_day_convention,
        )?;
        self.zero_rate(start, end, compounding)
    }

    /// Currency the curve's FX rates are quoted against.
    pub fn base_currency(&self) -> Currency {
        self.settings
            .base_market
            .as_deref()
            .and_then(MarketCondition::foreign_discount_curve)
            .map_or(self.currency(), YieldCurve::currency)
    }

    /// Forward FX rate for `date` implied by the base market's first spot.
    ///
    /// Returns 1 when there is no base market or it has no foreign curve.
    pub fn fx_rate(&self, date: Date) -> CurveResult<f64> {
        let Some(market) = self.settings.base_market.as_deref() else {
            return Ok(1.0);
        };
        let Some(foreign) = market.foreign_discount_curve() else {
            return Ok(1.0);
        };
        let spot = market
            .fx_spots()
            .first()
            .ok_or_else(|| CurveError::missing("fx spot"))?;
        if spot.foreign != foreign.currency() {
            return Err(CurveError::currency_mismatch(foreign.currency(), spot.foreign));
        }

        Ok(spot.rate * self.df_between(date, spot.spot_date)?
            / foreign.df_between(date, spot.spot_date)?)
    }

    // ---- Scenarios ----

    /// Number of addressable bump points: instruments for calibrated curves,
    /// key points otherwise.
    pub fn bump_points(&self) -> usize {
        self.instruments
            .as_ref()
            .map_or(self.curve.key_points().len(), Vec::len)
    }

    /// Parallel shift by `bp` basis points.
    ///
    /// Calibrated curves bump every instrument and its target, then
    /// re-bootstrap. Direct curves add `bp * 1e-4` to every key point.
    pub fn shift(&self, bp: f64) -> CurveResult<Self> {
        match &self.instruments {
            Some(quotes) => self.recalibrate(quotes.iter().map(|q| q.bumped(bp)).collect()),
            None => self.with_values(|_, v| v + bp * 1e-4),
        }
    }

    /// Bumps one key point (or instrument) by `bp` basis points.
    pub fn bump_key_rate(&self, index: usize, bp: f64) -> CurveResult<Self> {
        self.bump_key_rate_range(index, index, index, bp)
    }

    /// Resets one key point (or instrument) to `rate`.
    pub fn bump_key_rate_to(&self, index: usize, rate: f64) -> CurveResult<Self> {
        let len = self.bump_points();
        if index >= len {
            return Err(CurveError::index_out_of_range(index, len));
        }
        match &self.instruments {
            Some(quotes) => {
                let mut quotes = quotes.clone();
                quotes[index] = quotes[index].reset_to(rate);
                self.recalibrate(quotes)
            }
            None => self.with_values(|i, v| if i == index { rate } else { v }),
        }
    }

    /// Triangular bump: zero at `start`, `bp` at `middle`, back to zero at
    /// `end`, linear in time in between.
    pub fn bump_key_rate_range(
        &self,
        start: usize,
        middle: usize,
        end: usize,
        bp: f64,
    ) -> CurveResult<Self> {
        let bump = KeyRateBump::new(start, middle, end, bp);
        bump.validate(self.bump_points())?;

        match &self.instruments {
            Some(quotes) => {
                let times = quotes
                    .iter()
                    .map(|q| Ok(self.time(q.instrument.calibration_date()?)))
                    .collect::<CurveResult<Vec<f64>>>()?;
                let bumped = quotes
                    .iter()
                    .enumerate()
                    .map(|(i, q)| match bump.weight(i, &times) {
                        w if w == 0.0 => q.clone(),
                        w => q.bumped(bp * w),
                    })
                    .collect();
                self.recalibrate(bumped)
            }
            None => {
                let shifts = bump.shifts(&self.curve.times());
                self.with_values(|i, v| v + shifts[i])
            }
        }
    }

    /// Same curve with `spread` applied at query time. Key points and
    /// instruments are kept as they are.
    #[must_use]
    pub fn spreaded_curve(&self, spread: ZeroSpread) -> Self {
        Self {
            spread,
            ..self.clone()
        }
    }

    /// Direct zero-rate curve at `rate` on this curve's key point dates.
    pub fn const_rate_curve(&self, rate: f64) -> CurveResult<Self> {
        let mut settings = self.settings.clone();
        settings.representation = RateRepresentation::ZeroRate;
        settings.convention.interpolation = InterpolationMethod::Linear;
        let key_points = self.key_points().iter().map(|(d, _)| (*d, rate)).collect();
        Self::assemble(settings, key_points, None, None, self.spread, 0.0)
    }

    /// Same key points measured from a new reference date. Nothing is
    /// re-solved; the result is a direct curve.
    pub fn update_reference_date(&self, reference_date: Date) -> CurveResult<Self> {
        let mut settings = self.settings.clone();
        settings.reference_date = reference_date;
        Self::assemble(
            settings,
            self.key_points().to_vec(),
            None,
            None,
            self.spread,
            0.0,
        )
    }

    fn recalibrate(&self, instruments: Vec<MarketInstrument>) -> CurveResult<Self> {
        Self::calibrate(self.settings.clone(), instruments, self.spread)
    }

    fn with_values<F>(&self, f: F) -> CurveResult<Self>
    where
        F: Fn(usize, f64) -> f64,
    {
        let key_points = self
            .key_points()
            .iter()
            .enumerate()
            .map(|(i, (d, v))| (*d, f(i, *v)))
            .collect();
        Self::assemble(
            self.settings.clone(),
            key_points,
            Some(self.key_tenors.clone()),
            None,
            self.spread,
            0.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::YieldCurveBuilder;
    use approx::assert_relative_eq;

    fn reference() -> Date {
        Date::from_ymd(2025, 1, 2).unwrap()
    }

    fn zero_curve(points: &[(i64, f64)]) -> YieldCurve {
        let r = reference();
        YieldCurveBuilder::new("zero", r)
            .from_points(points.iter().map(|(days, v)| (r.add_days(*days), *v)).collect())
            .unwrap()
    }

    #[test]
    fn test_today_and_past_discount_to_one() {
        let curve = zero_curve(&[(0, 0.03), (1825, 0.04)]);
        assert_eq!(curve.df(0.0).unwrap(), 1.0);
        assert_eq!(curve.df(-1.0).unwrap(), 1.0);
        assert_eq!(curve.compounded_rate(1e-14).unwrap(), 1.0);
        assert_eq!(curve.df_at(reference()).unwrap(), 1.0);
    }

    #[test]
    fn test_representations_agree() {
        let r = reference();
        let t = 2.0;
        let rate: f64 = 0.03;

        let zero = zero_curve(&[(0, rate), (1825, rate)]);
        let forward = YieldCurveBuilder::new("fwd", r)
            .with_representation(RateRepresentation::ForwardRate)
            .with_interpolation(InterpolationMethod::ForwardFlat)
            .from_points(vec![(r, rate)])
            .unwrap();
        let discount = YieldCurveBuilder::new("df", r)
            .with_representation(RateRepresentation::DiscountFactor)
            .with_interpolation(InterpolationMethod::LogLinear)
            .from_points(vec![(r, 1.0), (r.add_days(1825), (-rate * 5.0).exp())])
            .unwrap();

        let expected = (-rate * t).exp();
        assert_relative_eq!(zero.df(t).unwrap(), expected, epsilon = 1e-15);
        assert_relative_eq!(forward.df(t).unwrap(), expected, epsilon = 1e-15);
        assert_relative_eq!(discount.df(t).unwrap(), expected, epsilon = 1e-14);
        assert_relative_eq!(discount.spot_rate(t).unwrap(), rate, epsilon = 1e-12);
        assert_relative_eq!(forward.spot_rate(t).unwrap(), rate, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_rate_needs_integral() {
        let r = reference();
        let result = YieldCurveBuilder::new("fwd", r)
            .with_representation(RateRepresentation::ForwardRate)
            .with_interpolation(InterpolationMethod::LogLinear)
            .from_points(vec![(r, 0.02), (r.add_days(365), 0.03)]);
        assert!(matches!(result, Err(CurveError::Construction { .. })));
    }

    #[test]
    fn test_forward_rates() {
        let curve = zero_curve(&[(0, 0.02), (3650, 0.02)]);
        let fwd = curve.forward_rate(1.0, 1.0, Compounding::Continuous).unwrap();
        assert_relative_eq!(fwd, 0.02, epsilon = 1e-12);

        // Zero or negative horizons fall back to the instantaneous forward
        let inst = curve.forward_rate(1.0, 0.0, Compounding::Continuous).unwrap();
        assert_relative_eq!(inst, 0.02, epsilon = 1e-10);
        assert_relative_eq!(
            curve.instantaneous_forward(3.0, Compounding::Simple).unwrap(),
            (0.02 * FORWARD_STEP).exp_m1() / FORWARD_STEP,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_spot_rate_at_zero_for_discount_curve() {
        let r = reference();
        let curve = YieldCurveBuilder::new("df", r)
            .with_representation(RateRepresentation::DiscountFactor)
            .with_interpolation(InterpolationMethod::LogLinear)
            .from_points(vec![(r, 1.0), (r.add_days(365), (-0.05_f64).exp())])
            .unwrap();
        assert_relative_eq!(curve.spot_rate(0.0).unwrap(), 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_rate_between_dates() {
        let r = reference();
        let curve = zero_curve(&[(0, 0.03), (3650, 0.03)]);
        let rate = curve
            .zero_rate(r.add_days(365), r.add_days(730), Compounding::Continuous)
            .unwrap();
        assert_relative_eq!(rate, 0.03, epsilon = 1e-12);
        assert!(curve.zero_rate(r, r, Compounding::Continuous).is_err());
    }

    #[test]
    fn test_forward_rate_between_dates_rolls_end_date() {
        // 2025-01-03 + 1M = 2025-02-03 (Monday), + 1W = 2025-01-10 (Friday)
        let r = reference();
        let curve = zero_curve(&[(0, 0.03), (3650, 0.03)]);
        let start = r.add_days(1);
        let one_month = curve
            .forward_rate_between_dates(start, "1M".parse().unwrap(), Compounding::Continuous)
            .unwrap();
        assert_relative_eq!(one_month, 0.03, epsilon = 1e-12);

        // Saturday 2025-03-01 rolls forward to Monday 2025-03-03
        let saturday_end = curve
            .forward_rate_between_dates(
                Date::from_ymd(2025, 2, 1).unwrap(),
                "1M".parse().unwrap(),
                Compounding::Simple,
            )
            .unwrap();
        let expected = ((0.03 * 30.0 / 365.0_f64).exp() - 1.0) / (30.0 / 365.0);
        assert_relative_eq!(saturday_end, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_spread_applies_to_every_representation() {
        let r = reference();
        let spread = ZeroSpread::from_bp(50.0);

        let zero = zero_curve(&[(0, 0.03), (1825, 0.03)]).spreaded_curve(spread);
        assert_relative_eq!(zero.spot_rate(2.0).unwrap(), 0.035, epsilon = 1e-14);
        assert_relative_eq!(zero.df(2.0).unwrap(), (-0.07_f64).exp(), epsilon = 1e-14);

        let discount = YieldCurveBuilder::new("df", r)
            .with_representation(RateRepresentation::DiscountFactor)
            .with_interpolation(InterpolationMethod::LogLinear)
            .with_spread(spread)
            .from_points(vec![(r, 1.0), (r.add_days(1825), (-0.15_f64).exp())])
            .unwrap();
        assert_relative_eq!(discount.spot_rate(2.0).unwrap(), 0.035, epsilon = 1e-12);

        // Key points are untouched
        assert_eq!(discount.key_points()[1].1, (-0.15_f64).exp());
    }

    #[test]
    fn test_key_tenors_and_input_rates() {
        let curve = zero_curve(&[(0, 0.01), (91, 0.02), (365, 0.03)]);
        assert_eq!(curve.key_tenors(), ["0D", "91D", "365D"]);
        assert_eq!(curve.input_rate("91D"), Some(0.02));
        assert_eq!(curve.input_rate("2Y"), None);
        assert!(!curve.is_calibrated());
        assert_eq!(curve.fitting_error(), 0.0);
    }

    #[test]
    fn test_given_key_tenors_must_match() {
        let r = reference();
        let result = YieldCurveBuilder::new("zero", r)
            .with_key_tenors(vec!["ON".to_string()])
            .from_points(vec![(r, 0.01), (r.add_days(365), 0.02)]);
        assert!(matches!(result, Err(CurveError::Construction { .. })));
    }

    #[test]
    fn test_const_rate_curve() {
        let curve = zero_curve(&[(0, 0.01), (365, 0.02), (1825, 0.05)]);
        let flat = curve.const_rate_curve(0.04).unwrap();

        assert_eq!(flat.key_points().len(), 3);
        assert_relative_eq!(flat.spot_rate(3.0).unwrap(), 0.04);
        assert_eq!(flat.key_points()[2].0, curve.key_points()[2].0);
    }

    #[test]
    fn test_update_reference_date_keeps_key_points() {
        let curve = zero_curve(&[(0, 0.01), (365, 0.02), (730, 0.03)]);
        let later = reference().add_days(365);
        let moved = curve.update_reference_date(later).unwrap();

        assert_eq!(moved.reference_date(), later);
        assert_eq!(moved.key_points(), curve.key_points());
        assert_relative_eq!(moved.value(0.0).unwrap(), 0.02, epsilon = 1e-15);
        assert_eq!(moved.df_at(later).unwrap(), 1.0);
    }

    #[test]
    fn test_bump_index_out_of_range() {
        let curve = zero_curve(&[(0, 0.01), (365, 0.02)]);
        assert!(matches!(
            curve.bump_key_rate(2, 1.0),
            Err(CurveError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(matches!(
            curve.bump_key_rate_to(5, 0.01),
            Err(CurveError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_bump_key_rate_to_direct() {
        let curve = zero_curve(&[(0, 0.01), (365, 0.02), (730, 0.03)]);
        let bumped = curve.bump_key_rate_to(1, 0.025).unwrap();
        assert_eq!(bumped.key_points()[1].1, 0.025);
        assert_eq!(bumped.key_points()[0].1, 0.01);
        assert_eq!(bumped.input_rate("365D"), Some(0.025));
        // Original unchanged
        assert_eq!(curve.key_points()[1].1, 0.02);
    }

    #[test]
    fn test_extrapolation_flag() {
        let r = reference();
        let curve = YieldCurveBuilder::new("bounded", r)
            .with_extrapolation(false)
            .from_points(vec![(r, 0.01), (r.add_days(365), 0.02)])
            .unwrap();
        assert!(curve.df(0.5).is_ok());
        assert!(matches!(
            curve.df(2.0),
            Err(CurveError::ExtrapolationDisallowed { .. })
        ));
    }

    #[test]
    fn test_curve_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<YieldCurve>();
    }
}
