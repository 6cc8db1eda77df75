//! Integration tests: curve queries, bumps, spreads and FX.

use std::sync::Arc;

use approx::assert_relative_eq;
use curvekit_core::types::{Compounding, Currency, Date};
use curvekit_curves::bumping::key_rate_ladder;
use curvekit_curves::instruments::{DummyInstrument, MarketInstrument};
use curvekit_curves::{
    CurveError, FxSpot, MarketCondition, RateRepresentation, YieldCurve, YieldCurveBuilder,
    ZeroSpread,
};
use curvekit_math::interpolation::InterpolationMethod;
use proptest::prelude::*;

fn spot() -> Date {
    Date::from_ymd(2025, 1, 2).unwrap()
}

fn flat(name: &str, rate: f64) -> YieldCurve {
    let s = spot();
    YieldCurveBuilder::new(name, s)
        .from_points(vec![(s, rate), (s.add_days(1825), rate)])
        .unwrap()
}

/// Five points one year apart under ACT/365F.
fn yearly_points() -> Vec<(Date, f64)> {
    let s = spot();
    (1..=5)
        .map(|k| (s.add_days(365 * k), 0.02 + 0.002 * k as f64))
        .collect()
}

fn yearly_dummies() -> Vec<MarketInstrument> {
    let s = spot();
    yearly_points()
        .into_iter()
        .map(|(date, rate)| MarketInstrument::at_par(Arc::new(DummyInstrument::new(s, date, rate))))
        .collect()
}

#[test]
fn test_flat_curve_queries() {
    let curve = flat("flat", 0.03);

    assert_relative_eq!(curve.spot_rate(2.5).unwrap(), 0.03, epsilon = 1e-15);
    assert_relative_eq!(curve.df(2.5).unwrap(), (-0.075_f64).exp(), epsilon = 1e-15);
    assert_relative_eq!(
        curve.forward_rate(2.0, 0.5, Compounding::Continuous).unwrap(),
        0.03,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        curve.spot_rate_at(spot().add_days(730)).unwrap(),
        0.03,
        epsilon = 1e-15
    );
}

#[test]
fn test_log_linear_discount_factors() {
    let s = spot();
    let curve = YieldCurveBuilder::new("df", s)
        .with_representation(RateRepresentation::DiscountFactor)
        .with_interpolation(InterpolationMethod::LogLinear)
        .from_points(vec![
            (s, 1.0),
            (s.add_days(365), 0.95),
            (s.add_days(730), 0.90),
        ])
        .unwrap();

    // Geometric, not arithmetic, between the pillars
    assert_relative_eq!(
        curve.value(0.5).unwrap(),
        (0.5 * 0.95_f64.ln()).exp(),
        epsilon = 1e-15
    );
    assert_relative_eq!(curve.df(1.5).unwrap(), (0.95_f64 * 0.90).sqrt(), epsilon = 1e-14);
    // Continuous forward between the pillars is flat
    assert_relative_eq!(
        curve.forward_rate(1.2, 0.3, Compounding::Continuous).unwrap(),
        (0.95_f64 / 0.90).ln(),
        epsilon = 1e-12
    );
}

#[test]
fn test_discount_factors_start_at_one_and_decrease() {
    let curve = YieldCurveBuilder::new("bootstrapped", spot())
        .from_instruments(yearly_dummies())
        .unwrap();

    assert_eq!(curve.df_at(spot()).unwrap(), 1.0);
    let dfs: Vec<f64> = (0..=60)
        .map(|m| curve.df(f64::from(m) / 12.0).unwrap())
        .collect();
    assert!(dfs.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn test_zero_shift_is_identity() {
    let direct = YieldCurveBuilder::new("direct", spot())
        .from_points(yearly_points())
        .unwrap();
    assert_eq!(direct.shift(0.0).unwrap().key_points(), direct.key_points());

    let calibrated = YieldCurveBuilder::new("calibrated", spot())
        .from_instruments(yearly_dummies())
        .unwrap();
    assert_eq!(
        calibrated.shift(0.0).unwrap().key_points(),
        calibrated.key_points()
    );
}

#[test]
fn test_parallel_shift_recalibrates() {
    let curve = YieldCurveBuilder::new("calibrated", spot())
        .from_instruments(yearly_dummies())
        .unwrap();
    let shifted = curve.shift(10.0).unwrap();

    for (before, after) in curve
        .instruments()
        .unwrap()
        .iter()
        .zip(shifted.instruments().unwrap())
    {
        assert_relative_eq!(after.target_value, before.target_value + 0.001, epsilon = 1e-15);
        assert_relative_eq!(after.instrument.rate(), before.instrument.rate() + 0.001, epsilon = 1e-15);
    }
    assert_relative_eq!(
        shifted.spot_rate(3.0).unwrap(),
        curve.spot_rate(3.0).unwrap() + 0.001,
        epsilon = 1e-10
    );
    assert!(shifted.fitting_error() <= 1e-10);
}

#[test]
fn test_bump_key_rate_calibrated() {
    let curve = YieldCurveBuilder::new("calibrated", spot())
        .from_instruments(yearly_dummies())
        .unwrap();
    let bumped = curve.bump_key_rate(2, 5.0).unwrap();

    let before = curve.instruments().unwrap();
    let after = bumped.instruments().unwrap();
    for i in 0..5 {
        let expected = if i == 2 {
            before[i].target_value + 0.0005
        } else {
            before[i].target_value
        };
        assert_relative_eq!(after[i].target_value, expected, epsilon = 1e-15);
    }
    assert_relative_eq!(
        bumped.spot_rate(3.0).unwrap(),
        curve.spot_rate(3.0).unwrap() + 0.0005,
        epsilon = 1e-10
    );
    // Neighbouring points are recalibrated to their unchanged quotes
    assert_relative_eq!(
        bumped.spot_rate(2.0).unwrap(),
        curve.spot_rate(2.0).unwrap(),
        epsilon = 1e-10
    );
}

#[test]
fn test_bump_key_rate_to() {
    let curve = YieldCurveBuilder::new("calibrated", spot())
        .from_instruments(yearly_dummies())
        .unwrap();
    let reset = curve.bump_key_rate_to(4, 0.05).unwrap();

    assert_eq!(reset.instruments().unwrap()[4].target_value, 0.05);
    assert_relative_eq!(reset.spot_rate(5.0).unwrap(), 0.05, epsilon = 1e-10);
}

#[test]
fn test_triangular_bump_direct() {
    let curve = YieldCurveBuilder::new("direct", spot())
        .from_points(yearly_points())
        .unwrap();
    let bumped = curve.bump_key_rate_range(0, 2, 4, 100.0).unwrap();

    let expected_shift = [0.0, 0.005, 0.01, 0.005, 0.0];
    for ((base, moved), shift) in curve
        .key_points()
        .iter()
        .zip(bumped.key_points())
        .zip(expected_shift)
    {
        assert_relative_eq!(moved.1, base.1 + shift, epsilon = 1e-15);
    }
}

#[test]
fn test_triangular_bump_calibrated() {
    let curve = YieldCurveBuilder::new("calibrated", spot())
        .from_instruments(yearly_dummies())
        .unwrap();
    let bumped = curve.bump_key_rate_range(0, 2, 4, 100.0).unwrap();

    let expected_shift = [0.0, 0.005, 0.01, 0.005, 0.0];
    for ((before, after), shift) in curve
        .instruments()
        .unwrap()
        .iter()
        .zip(bumped.instruments().unwrap())
        .zip(expected_shift)
    {
        assert_relative_eq!(after.target_value, before.target_value + shift, epsilon = 1e-15);
    }
}

#[test]
fn test_bump_indices_are_checked() {
    let calibrated = YieldCurveBuilder::new("calibrated", spot())
        .from_instruments(yearly_dummies())
        .unwrap();

    assert!(matches!(
        calibrated.bump_key_rate(5, 1.0),
        Err(CurveError::IndexOutOfRange { index: 5, len: 5 })
    ));
    assert!(matches!(
        calibrated.bump_key_rate_range(0, 3, 7, 1.0),
        Err(CurveError::IndexOutOfRange { index: 7, len: 5 })
    ));
    assert!(matches!(
        calibrated.bump_key_rate_range(3, 1, 4, 1.0),
        Err(CurveError::Construction { .. })
    ));
}

#[test]
fn test_ladder_over_calibrated_curve() {
    let curve = YieldCurveBuilder::new("calibrated", spot())
        .from_instruments(yearly_dummies())
        .unwrap();
    let ladder = key_rate_ladder(&curve, 1.0).unwrap();

    assert_eq!(ladder.len(), 5);
    assert_eq!(ladder[0].tenor, "365D");
    for (i, rung) in ladder.iter().enumerate() {
        let t = (i + 1) as f64;
        assert_relative_eq!(
            rung.curve.spot_rate(t).unwrap(),
            curve.spot_rate(t).unwrap() + 1e-4,
            epsilon = 1e-10
        );
    }
}

#[test]
fn test_spreaded_curve() {
    let curve = YieldCurveBuilder::new("calibrated", spot())
        .from_instruments(yearly_dummies())
        .unwrap();
    let spreaded = curve.spreaded_curve(ZeroSpread::from_bp(25.0));

    assert_eq!(spreaded.key_points(), curve.key_points());
    assert_eq!(spreaded.instruments().unwrap().len(), 5);
    assert_relative_eq!(
        spreaded.spot_rate(2.5).unwrap(),
        curve.spot_rate(2.5).unwrap() + 0.0025,
        epsilon = 1e-15
    );
    assert_relative_eq!(
        spreaded.df(2.5).unwrap(),
        curve.df(2.5).unwrap() * (-0.0025_f64 * 2.5).exp(),
        epsilon = 1e-15
    );

    // Replaces rather than stacks
    let respread = spreaded.spreaded_curve(ZeroSpread::from_bp(10.0));
    assert_relative_eq!(respread.spread().spread(), 0.001, epsilon = 1e-18);

    // Bumps keep the spread
    let shifted = spreaded.shift(1.0).unwrap();
    assert_eq!(shifted.spread(), spreaded.spread());
}

#[test]
fn test_update_reference_date_drops_instruments() {
    let curve = YieldCurveBuilder::new("calibrated", spot())
        .from_instruments(yearly_dummies())
        .unwrap();
    let later = spot().add_days(365);
    let moved = curve.update_reference_date(later).unwrap();

    assert!(moved.instruments().is_none());
    assert_eq!(moved.reference_date(), later);
    assert_eq!(moved.key_points(), curve.key_points());
}

#[test]
fn test_fx_forward_from_base_market() {
    let s = spot();
    let eur = YieldCurveBuilder::new("EUR", s)
        .with_currency(Currency::EUR)
        .from_points(vec![(s, 0.02), (s.add_days(3650), 0.02)])
        .unwrap();
    let market = MarketCondition::new(s)
        .with_foreign_discount_curve(Arc::new(eur))
        .with_fx_spot(FxSpot::new(s, 1.10, Currency::USD, Currency::EUR));

    let usd = YieldCurveBuilder::new("USD", s)
        .with_base_market(Arc::new(market))
        .from_points(vec![(s, 0.04), (s.add_days(3650), 0.04)])
        .unwrap();

    assert_eq!(usd.base_currency(), Currency::EUR);
    assert_relative_eq!(usd.fx_rate(s).unwrap(), 1.10, epsilon = 1e-15);

    // Later dates carry the rate differential
    let one_year = s.add_days(365);
    assert_relative_eq!(
        usd.fx_rate(one_year).unwrap(),
        1.10 * (0.02_f64).exp(),
        epsilon = 1e-12
    );
}

#[test]
fn test_fx_rate_edge_cases() {
    let s = spot();
    assert_eq!(flat("lonely", 0.03).fx_rate(s).unwrap(), 1.0);

    let gbp = YieldCurveBuilder::new("GBP", s)
        .with_currency(Currency::GBP)
        .from_points(vec![(s, 0.045)])
        .unwrap();
    let foreign_only = MarketCondition::new(s).with_foreign_discount_curve(Arc::new(gbp));

    let missing = YieldCurveBuilder::new("USD", s)
        .with_base_market(Arc::new(foreign_only.clone()))
        .from_points(vec![(s, 0.04)])
        .unwrap();
    assert!(matches!(
        missing.fx_rate(s),
        Err(CurveError::MissingMarketData { .. })
    ));

    let mismatched = YieldCurveBuilder::new("USD", s)
        .with_base_market(Arc::new(foreign_only.with_fx_spot(FxSpot::new(
            s,
            1.10,
            Currency::USD,
            Currency::EUR,
        ))))
        .from_points(vec![(s, 0.04)])
        .unwrap();
    match mismatched.fx_rate(s) {
        Err(CurveError::CurrencyMismatch { expected, actual }) => {
            assert_eq!(expected, Currency::GBP);
            assert_eq!(actual, Currency::EUR);
        }
        other => panic!("expected currency mismatch, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn prop_flat_curve_discounts_monotonically(
        rate in 0.0f64..0.15,
        t1 in 0.0f64..30.0,
        dt in 0.0f64..10.0,
    ) {
        let curve = flat("prop", rate);
        let df1 = curve.df(t1).unwrap();
        let df2 = curve.df(t1 + dt).unwrap();
        prop_assert!(df1 <= 1.0);
        prop_assert!(df2 <= df1 + 1e-15);
    }
}
