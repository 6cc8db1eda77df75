//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Calendar;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// How a date falling on a non-business day is rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// Keep the date as-is.
    Unadjusted,

    /// Roll to the next business day.
    Following,

    /// Roll forward unless that crosses a month end, then roll back.
    #[default]
    ModifiedFollowing,

    /// Roll to the previous business day.
    Preceding,

    /// Roll back unless that crosses a month start, then roll forward.
    ModifiedPreceding,
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BusinessDayConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '_', '-'], "").as_str() {
            "none" | "unadjusted" => Ok(BusinessDayConvention::Unadjusted),
            "following" | "f" => Ok(BusinessDayConvention::Following),
            "modifiedfollowing" | "mf" => Ok(BusinessDayConvention::ModifiedFollowing),
            "preceding" | "p" => Ok(BusinessDayConvention::Preceding),
            "modifiedpreceding" | "mp" => Ok(BusinessDayConvention::ModifiedPreceding),
            _ => Err(CoreError::unknown_convention(s)),
        }
    }
}

/// Adjusts `date` on `calendar` under `convention`.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> CoreResult<Date> {
    if convention == BusinessDayConvention::Unadjusted || calendar.is_business_day(date) {
        return Ok(date);
    }

    let rolled = match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => following(date, calendar)?,
        BusinessDayConvention::Preceding => preceding(date, calendar)?,
        BusinessDayConvention::ModifiedFollowing => {
            let next = following(date, calendar)?;
            if next.month() == date.month() {
                next
            } else {
                preceding(date, calendar)?
            }
        }
        BusinessDayConvention::ModifiedPreceding => {
            let prev = preceding(date, calendar)?;
            if prev.month() == date.month() {
                prev
            } else {
                following(date, calendar)?
            }
        }
    };
    Ok(rolled)
}

/// Longest run of consecutive holidays tolerated before giving up.
const MAX_ROLL_DAYS: i64 = 366;

fn roll<C: Calendar + ?Sized>(date: Date, step: i64, calendar: &C) -> CoreResult<Date> {
    let mut current = date;
    for _ in 0..MAX_ROLL_DAYS {
        if calendar.is_business_day(current) {
            return Ok(current);
        }
        current = current.add_days(step);
    }
    Err(CoreError::invalid_input(format!(
        "no business day within {MAX_ROLL_DAYS} days of {date} on {}",
        calendar.name()
    )))
}

fn following<C: Calendar + ?Sized>(date: Date, calendar: &C) -> CoreResult<Date> {
    roll(date, 1, calendar)
}

fn preceding<C: Calendar + ?Sized>(date: Date, calendar: &C) -> CoreResult<Date> {
    roll(date, -1, calendar)
}
