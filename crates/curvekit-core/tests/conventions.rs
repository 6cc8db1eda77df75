//! End-to-end checks that tenors, calendars and day counts compose the way
//! curve construction uses them.

use approx::assert_relative_eq;
use curvekit_core::prelude::*;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

#[test]
fn tenor_then_adjust_then_year_fraction() {
    let reference = d(2025, 1, 31);
    let cal = WeekendCalendar;

    // 1M from Jan 31 lands on Feb 28 (Friday), no roll needed.
    let raw = "1M".parse::<Term>().unwrap().add_to(reference).unwrap();
    assert_eq!(raw, d(2025, 2, 28));
    let adjusted = cal.adjust(raw, BusinessDayConvention::ModifiedFollowing).unwrap();
    assert_eq!(adjusted, raw);

    let t = Act365Fixed.year_fraction_f64(reference, adjusted);
    assert_relative_eq!(t, 28.0 / 365.0, epsilon = 1e-15);
}

#[test]
fn modified_following_stays_in_month() {
    let cal = WeekendCalendar;
    // 2025-08-31 is a Sunday; following would roll into September.
    let adjusted = cal
        .adjust(d(2025, 8, 31), BusinessDayConvention::ModifiedFollowing)
        .unwrap();
    assert_eq!(adjusted, d(2025, 8, 29));
}

#[test]
fn compounding_round_trips_through_discount_factor() {
    let t = 3.25;
    for comp in [
        Compounding::Continuous,
        Compounding::Simple,
        Compounding::Annual,
        Compounding::SemiAnnual,
        Compounding::Quarterly,
        Compounding::Monthly,
    ] {
        let df = comp.discount_factor(0.042, t);
        assert_relative_eq!(comp.rate_from_df(df, t).unwrap(), 0.042, epsilon = 1e-12);
    }
}

#[test]
fn day_count_selector_parses_and_shares() {
    let dc = "ACT/360".parse::<DayCountConvention>().unwrap().to_day_count();
    let yf = dc.year_fraction_f64(d(2025, 1, 1), d(2025, 4, 1));
    assert_relative_eq!(yf, 90.0 / 360.0, epsilon = 1e-15);
}
