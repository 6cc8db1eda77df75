//! Sequential bootstrap.
//!
//! Solves one key point per instrument, in calibration date order. The curve
//! used to reprice instrument `i` holds the points already solved for
//! instruments `0..i` plus the candidate for `i`, so each solve only moves
//! the newest segment.

use std::cell::RefCell;
use std::sync::Arc;

use curvekit_core::types::Date;
use curvekit_math::interpolation::InterpolationMethod;
use curvekit_math::solvers::brent;
use tracing::{debug, info, warn};

use super::BootstrapConfig;
use crate::error::{CurveError, CurveResult};
use crate::instruments::MarketInstrument;
use crate::market::MarketCondition;
use crate::spread::ZeroSpread;
use crate::yield_curve::{CurveSettings, RateRepresentation, YieldCurve};

const POSITIVE_FLOOR: f64 = 1e-12;

/// Output of a calibration run.
#[derive(Debug, Clone)]
pub(crate) struct Calibration {
    /// Instruments after sorting and duplicate removal.
    pub instruments: Vec<MarketInstrument>,
    /// Key points including the reference date anchor.
    pub key_points: Vec<(Date, f64)>,
    /// Largest |model value - target| over all instruments.
    pub fitting_error: f64,
}

/// How the reference date key point is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Anchor {
    /// Constant value at the reference date (1.0 for discount factors).
    Fixed(f64),
    /// Reference date carries the first instrument's value.
    TrackFirst,
    /// Step forwards: the reference date carries the first value and each
    /// later value starts at the previous instrument's date.
    ForwardFlat,
}

impl Anchor {
    fn for_settings(settings: &CurveSettings) -> Self {
        match settings.representation {
            RateRepresentation::DiscountFactor => Anchor::Fixed(1.0),
            RateRepresentation::ForwardRate
                if settings.convention.interpolation == InterpolationMethod::ForwardFlat =>
            {
                Anchor::ForwardFlat
            }
            _ => Anchor::TrackFirst,
        }
    }
}

/// Calibrates key points so every instrument reprices to its target.
pub(crate) fn calibrate(
    settings: &CurveSettings,
    instruments: Vec<MarketInstrument>,
) -> CurveResult<Calibration> {
    let instruments = sort_and_dedup(instruments)?;
    if instruments.is_empty() {
        return Err(CurveError::construction("no instruments to calibrate"));
    }
    if settings.convention.interpolation.min_points() > 2 {
        return Err(CurveError::construction(format!(
            "{} curves are fitted directly and cannot be bootstrapped",
            settings.convention.interpolation
        )));
    }

    let bootstrapper = SequentialBootstrapper::new(settings, &instruments)?;
    let mut values = Vec::with_capacity(instruments.len());

    for index in 0..instruments.len() {
        values.push(bootstrapper.seed());
        bootstrapper.solve(&mut values, index)?;
    }

    let sweeps = bootstrapper.refine(&mut values)?;
    let (_, fitting_error) = bootstrapper.worst_residual(&values)?;

    info!(
        curve = %settings.name,
        instruments = instruments.len(),
        sweeps,
        fitting_error,
        "Curve calibrated"
    );

    let key_points = bootstrapper.key_points(&values);
    Ok(Calibration {
        instruments,
        key_points,
        fitting_error,
    })
}

/// Sorts by calibration date and keeps the first instrument of each date.
fn sort_and_dedup(instruments: Vec<MarketInstrument>) -> CurveResult<Vec<MarketInstrument>> {
    let mut dated = instruments
        .into_iter()
        .map(|q| Ok((q.instrument.calibration_date()?, q)))
        .collect::<CurveResult<Vec<_>>>()?;
    dated.sort_by_key(|(date, _)| *date);
    dated.dedup_by_key(|(date, _)| *date);
    Ok(dated.into_iter().map(|(_, q)| q).collect())
}

struct SequentialBootstrapper<'a> {
    settings: CurveSettings,
    config: BootstrapConfig,
    instruments: &'a [MarketInstrument],
    dates: Vec<Date>,
    anchor: Anchor,
    base_market: MarketCondition,
}

impl<'a> SequentialBootstrapper<'a> {
    fn new(settings: &CurveSettings, instruments: &'a [MarketInstrument]) -> CurveResult<Self> {
        let reference = settings.reference_date;
        let dates = instruments
            .iter()
            .map(|q| q.instrument.calibration_date())
            .collect::<CurveResult<Vec<Date>>>()?;

        if let Some(index) = dates.iter().position(|d| *d <= reference) {
            return Err(CurveError::calibration_failed(
                instruments[index].instrument.tenor(),
                index,
                format!(
                    "calibration date {} is not after the reference date {reference}",
                    dates[index]
                ),
            ));
        }

        // Trial curves may be probed past their last point by later cash flows
        let mut trial_settings = settings.clone();
        trial_settings.allow_extrapolation = true;

        let base_market = settings
            .base_market
            .as_deref()
            .cloned()
            .unwrap_or_else(|| MarketCondition::new(reference))
            .with_valuation_date(reference);

        Ok(Self {
            config: settings.bootstrap,
            anchor: Anchor::for_settings(settings),
            settings: trial_settings,
            instruments,
            dates,
            base_market,
        })
    }

    /// Placeholder for a point about to be solved.
    fn seed(&self) -> f64 {
        match self.anchor {
            Anchor::Fixed(value) => value,
            _ => 0.0,
        }
    }

    fn bounds(&self) -> (f64, f64) {
        let (lower, upper) = match self.settings.representation {
            RateRepresentation::DiscountFactor => self.config.df_bounds,
            _ => self.config.rate_bounds,
        };
        // Log interpolation needs positive key values
        match self.settings.convention.interpolation {
            InterpolationMethod::LogLinear | InterpolationMethod::LogCubic => {
                (lower.max(POSITIVE_FLOOR), upper)
            }
            _ => (lower, upper),
        }
    }

    /// Key points for the first `values.len()` instruments.
    fn key_points(&self, values: &[f64]) -> Vec<(Date, f64)> {
        let reference = self.settings.reference_date;
        let mut points = Vec::with_capacity(values.len() + 1);

        match self.anchor {
            Anchor::Fixed(value) => {
                points.push((reference, value));
                points.extend(self.dates.iter().copied().zip(values.iter().copied()));
            }
            Anchor::TrackFirst => {
                points.push((reference, values[0]));
                points.extend(self.dates.iter().copied().zip(values.iter().copied()));
            }
            Anchor::ForwardFlat => {
                points.push((reference, values[0]));
                points.extend(
                    self.dates
                        .iter()
                        .copied()
                        .zip(values.iter().skip(1).copied()),
                );
            }
        }
        points
    }

    fn market(&self, values: &[f64]) -> CurveResult<MarketCondition> {
        let curve = YieldCurve::assemble(
            self.settings.clone(),
            self.key_points(values),
            None,
            None,
            ZeroSpread::ZERO,
            0.0,
        )?;
        Ok(self
            .base_market
            .clone()
            .with_roles(&self.settings.curve_roles, &Arc::new(curve)))
    }

    fn residual(&self, values: &[f64], index: usize) -> CurveResult<f64> {
        self.instruments[index].residual(&self.market(values)?)
    }

    /// Solves `values[index]` with every other entry held fixed.
    fn solve(&self, values: &mut [f64], index: usize) -> CurveResult<()> {
        let tenor = self.instruments[index].instrument.tenor();
        let failure: RefCell<Option<CurveError>> = RefCell::new(None);

        let (lower, upper) = self.bounds();
        let result = {
            let fixed: &[f64] = values;
            let objective = |x: f64| {
                let mut trial = fixed.to_vec();
                trial[index] = x;
                match self.residual(&trial, index) {
                    Ok(r) => r,
                    Err(err) => {
                        failure.borrow_mut().get_or_insert(err);
                        f64::NAN
                    }
                }
            };
            brent(objective, lower, upper, &self.config.solver)
        };

        if let Some(err) = failure.into_inner() {
            return Err(err);
        }
        let solution =
            result.map_err(|e| CurveError::calibration_failed(tenor, index, e.to_string()))?;

        values[index] = solution.root;
        debug!(
            tenor,
            value = solution.root,
            iterations = solution.iterations,
            "Solved key point"
        );
        Ok(())
    }

    /// Index and size of the largest residual over all instruments.
    fn worst_residual(&self, values: &[f64]) -> CurveResult<(usize, f64)> {
        let market = self.market(values)?;
        let mut worst = (0, 0.0);
        for (index, quote) in self.instruments.iter().enumerate() {
            let residual = quote.residual(&market)?.abs();
            if residual > worst.1 {
                worst = (index, residual);
            }
        }
        Ok(worst)
    }

    /// Re-solves every point against the full curve until all instruments
    /// reprice. Returns the number of sweeps used.
    fn refine(&self, values: &mut [f64]) -> CurveResult<u32> {
        let tolerance = self.config.residual_tolerance;
        let mut worst = self.worst_residual(values)?;
        if worst.1 <= tolerance {
            return Ok(0);
        }

        for sweep in 1..=self.config.max_sweeps {
            for index in 0..values.len() {
                self.solve(values, index)?;
            }
            worst = self.worst_residual(values)?;
            if worst.1 <= tolerance {
                warn!(
                    curve = %self.settings.name,
                    interpolation = %self.settings.convention.interpolation,
                    sweeps = sweep,
                    "Calibration needed refinement sweeps"
                );
                return Ok(sweep);
            }
        }

        let (index, residual) = worst;
        Err(CurveError::calibration_failed(
            self.instruments[index].instrument.tenor(),
            index,
            format!(
                "residual {residual:.2e} after {} refinement sweeps",
                self.config.max_sweeps
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::YieldCurveBuilder;
    use crate::instruments::{
        CalibMethod, CalibrationInstrument, Deposit, DummyInstrument, InterestRateSwap,
    };
    use approx::assert_relative_eq;
    use curvekit_core::error::CoreError;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn dummy(start: Date, days: i64, rate: f64) -> MarketInstrument {
        MarketInstrument::at_par(Arc::new(DummyInstrument::new(
            start,
            start.add_days(days),
            rate,
        )))
    }

    #[test]
    fn test_sort_and_dedup_keeps_first() {
        let start = d(2025, 1, 2);
        let sorted = sort_and_dedup(vec![
            dummy(start, 730, 0.03),
            dummy(start, 365, 0.02),
            dummy(start, 730, 0.04),
        ])
        .unwrap();

        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].target_value, 0.02);
        assert_eq!(sorted[1].target_value, 0.03);
    }

    /// Instrument whose maturity cannot be rolled to a business day.
    #[derive(Debug)]
    struct Unrollable;

    impl CalibrationInstrument for Unrollable {
        fn tenor(&self) -> &str {
            "1Y"
        }

        fn calibration_date(&self) -> CurveResult<Date> {
            Err(CoreError::invalid_input("no business day near maturity").into())
        }

        fn rate(&self) -> f64 {
            0.03
        }

        fn bump(&self, _bp: f64) -> Arc<dyn CalibrationInstrument> {
            Arc::new(Unrollable)
        }

        fn bump_to(&self, _rate: f64) -> Arc<dyn CalibrationInstrument> {
            Arc::new(Unrollable)
        }

        fn model_value(&self, _market: &MarketCondition, _method: CalibMethod) -> CurveResult<f64> {
            Ok(0.03)
        }
    }

    #[test]
    fn test_date_roll_failure_propagates() {
        let start = d(2025, 1, 2);
        let quotes = vec![
            dummy(start, 365, 0.02),
            MarketInstrument::at_par(Arc::new(Unrollable)),
        ];

        assert!(matches!(sort_and_dedup(quotes.clone()), Err(CurveError::Core(_))));
        assert!(matches!(
            YieldCurveBuilder::new("unrollable", start).from_instruments(quotes),
            Err(CurveError::Core(_))
        ));
    }

    #[test]
    fn test_anchor_layouts() {
        let reference = d(2025, 1, 2);
        let builder = YieldCurveBuilder::new("test", reference);

        let zero = builder.clone().settings();
        assert_eq!(Anchor::for_settings(&zero), Anchor::TrackFirst);

        let df = builder
            .clone()
            .with_representation(RateRepresentation::DiscountFactor)
            .settings();
        assert_eq!(Anchor::for_settings(&df), Anchor::Fixed(1.0));

        let fwd = builder
            .with_representation(RateRepresentation::ForwardRate)
            .with_interpolation(InterpolationMethod::ForwardFlat)
            .settings();
        assert_eq!(Anchor::for_settings(&fwd), Anchor::ForwardFlat);
    }

    #[test]
    fn test_forward_flat_key_points_start_at_previous_maturity() {
        let reference = d(2025, 1, 2);
        let settings = YieldCurveBuilder::new("fwd", reference)
            .with_representation(RateRepresentation::ForwardRate)
            .with_interpolation(InterpolationMethod::ForwardFlat)
            .settings();
        let instruments = vec![dummy(reference, 365, 0.02), dummy(reference, 730, 0.03)];
        let bootstrapper = SequentialBootstrapper::new(&settings, &instruments).unwrap();

        let points = bootstrapper.key_points(&[0.02, 0.04]);
        assert_eq!(points, vec![(reference, 0.02), (reference.add_days(365), 0.04)]);
    }

    #[test]
    fn test_dummy_calibration_reproduces_zero_rates() {
        let reference = d(2025, 1, 2);
        let instruments = vec![
            dummy(reference, 365, 0.02),
            dummy(reference, 730, 0.025),
            dummy(reference, 1825, 0.03),
        ];
        let settings = YieldCurveBuilder::new("zero", reference).settings();

        let calibration = calibrate(&settings, instruments).unwrap();

        // Anchor plus one point per instrument
        assert_eq!(calibration.key_points.len(), 4);
        assert_relative_eq!(calibration.key_points[0].1, 0.02, epsilon = 1e-12);
        assert_relative_eq!(calibration.key_points[2].1, 0.025, epsilon = 1e-12);
        assert_relative_eq!(calibration.key_points[3].1, 0.03, epsilon = 1e-12);
        assert!(calibration.fitting_error < 1e-10);
    }

    #[test]
    fn test_rejects_instrument_on_reference_date() {
        let reference = d(2025, 1, 2);
        let settings = YieldCurveBuilder::new("bad", reference).settings();
        let result = calibrate(&settings, vec![dummy(reference, 0, 0.02)]);

        assert!(matches!(result, Err(CurveError::CalibrationFailure { index: 0, .. })));
    }

    #[test]
    fn test_rejects_empty_and_exponential_spline() {
        let reference = d(2025, 1, 2);
        let settings = YieldCurveBuilder::new("empty", reference).settings();
        assert!(matches!(
            calibrate(&settings, vec![]),
            Err(CurveError::Construction { .. })
        ));

        let settings = YieldCurveBuilder::new("spline", reference)
            .with_interpolation(InterpolationMethod::ExponentialSpline)
            .settings();
        assert!(matches!(
            calibrate(&settings, vec![dummy(reference, 365, 0.02)]),
            Err(CurveError::Construction { .. })
        ));
    }

    #[test]
    fn test_unreachable_target_is_calibration_failure() {
        let reference = d(2025, 1, 2);
        let settings = YieldCurveBuilder::new("bounded", reference)
            .with_bootstrap_config(BootstrapConfig::default().with_rate_bounds(0.0, 0.1))
            .settings();
        let result = calibrate(&settings, vec![dummy(reference, 365, 0.5)]);

        match result {
            Err(CurveError::CalibrationFailure { tenor, index, .. }) => {
                assert_eq!(tenor, "365D");
                assert_eq!(index, 0);
            }
            other => panic!("expected calibration failure, got {other:?}"),
        }
    }

    #[test]
    fn test_non_local_interpolation_refines() {
        let reference = d(2025, 1, 2);
        let instruments = vec![
            MarketInstrument::at_par(Arc::new(
                Deposit::from_tenor(reference, "6M", 0.030).unwrap(),
            )),
            MarketInstrument::at_par(Arc::new(
                InterestRateSwap::from_tenor(reference, "2Y", 0.034).unwrap(),
            )),
            MarketInstrument::at_par(Arc::new(
                InterestRateSwap::from_tenor(reference, "5Y", 0.037).unwrap(),
            )),
            MarketInstrument::at_par(Arc::new(
                InterestRateSwap::from_tenor(reference, "10Y", 0.039).unwrap(),
            )),
        ];
        let settings = YieldCurveBuilder::new("hermite", reference)
            .with_interpolation(InterpolationMethod::CubicHermiteMonotonic)
            .settings();

        let calibration = calibrate(&settings, instruments).unwrap();
        assert!(calibration.fitting_error <= 1e-10);
    }
}
