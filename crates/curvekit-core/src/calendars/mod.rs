//! Business day calendars and conventions.
//!
//! - [`WeekendCalendar`]: Saturdays and Sundays are holidays
//! - [`NullCalendar`]: every day is a business day
//! - [`HolidayCalendar`]: weekends plus an explicit holiday list

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

mod conventions;

pub use conventions::{adjust, BusinessDayConvention};

use crate::error::CoreResult;
use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync + fmt::Debug {
    /// Name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> CoreResult<Date> {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a signed number of business days.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let step: i64 = if days >= 0 { 1 } else { -1 };
        let mut remaining = days.unsigned_abs();
        let mut result = date;

        while remaining > 0 {
            result = result.add_days(step);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }
        result
    }
}

/// Weekend-only calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Calendar where every day is a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// Weekends plus a fixed set of holidays.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from a list of holiday dates.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}

/// Serializable selector for the built-in calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CalendarId {
    /// [`WeekendCalendar`]
    #[default]
    Weekend,
    /// [`NullCalendar`]
    Null,
}

impl CalendarId {
    /// Shared implementation of the calendar.
    #[must_use]
    pub fn to_calendar(&self) -> Arc<dyn Calendar> {
        match self {
            CalendarId::Weekend => Arc::new(WeekendCalendar),
            CalendarId::Null => Arc::new(NullCalendar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(d(2025, 1, 6)));
        assert!(!cal.is_business_day(d(2025, 1, 4)));
        assert!(cal.is_holiday(d(2025, 1, 5)));
    }

    #[test]
    fn test_add_business_days_skips_weekend() {
        let cal = WeekendCalendar;
        assert_eq!(cal.add_business_days(d(2025, 1, 3), 1), d(2025, 1, 6));
        assert_eq!(cal.add_business_days(d(2025, 1, 6), -1), d(2025, 1, 3));
        assert_eq!(cal.add_business_days(d(2025, 1, 6), 0), d(2025, 1, 6));
    }

    #[test]
    fn test_holiday_calendar() {
        let cal = HolidayCalendar::new("Test", [d(2025, 1, 1)]);
        assert!(!cal.is_business_day(d(2025, 1, 1)));
        assert_eq!(
            cal.adjust(d(2025, 1, 1), BusinessDayConvention::Following).unwrap(),
            d(2025, 1, 2)
        );
        assert_eq!(cal.name(), "Test");
    }

    #[test]
    fn test_null_calendar_never_rolls() {
        let cal = CalendarId::Null.to_calendar();
        let saturday = d(2025, 1, 4);
        assert_eq!(cal.adjust(saturday, BusinessDayConvention::Following).unwrap(), saturday);
    }
}
