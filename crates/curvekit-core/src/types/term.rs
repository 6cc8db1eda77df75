//! Tenor strings such as `3M`, `10Y` or `91D`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// Unit of a [`Term`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// Calendar days.
    Day,
    /// Weeks of seven days.
    Week,
    /// Calendar months.
    Month,
    /// Calendar years.
    Year,
}

impl Period {
    fn suffix(self) -> char {
        match self {
            Period::Day => 'D',
            Period::Week => 'W',
            Period::Month => 'M',
            Period::Year => 'Y',
        }
    }
}

/// A length of time expressed in a calendar unit.
///
/// ```rust
/// use curvekit_core::types::{Date, Term};
///
/// let term: Term = "6M".parse().unwrap();
/// let start = Date::from_ymd(2025, 1, 15).unwrap();
/// assert_eq!(term.add_to(start).unwrap(), Date::from_ymd(2025, 7, 15).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    length: i32,
    period: Period,
}

impl Term {
    /// Creates a term.
    #[must_use]
    pub const fn new(length: i32, period: Period) -> Self {
        Self { length, period }
    }

    /// A term of `days` calendar days.
    #[must_use]
    pub const fn days(days: i32) -> Self {
        Self::new(days, Period::Day)
    }

    /// Term covering the calendar days between two dates.
    pub fn between(start: Date, end: Date) -> CoreResult<Self> {
        let days = i32::try_from(start.days_between(&end))
            .map_err(|_| CoreError::invalid_term(format!("{start} to {end}")))?;
        Ok(Self::days(days))
    }

    /// Number of units.
    #[must_use]
    pub fn length(&self) -> i32 {
        self.length
    }

    /// Unit.
    #[must_use]
    pub fn period(&self) -> Period {
        self.period
    }

    /// Rolls `date` forward by this term (backward for negative lengths).
    pub fn add_to(&self, date: Date) -> CoreResult<Date> {
        match self.period {
            Period::Day => Ok(date.add_days(i64::from(self.length))),
            Period::Week => Ok(date.add_days(7 * i64::from(self.length))),
            Period::Month => date.add_months(self.length),
            Period::Year => date.add_years(self.length),
        }
    }

    /// Rough length in years, used only for ordering and display.
    #[must_use]
    pub fn approx_years(&self) -> f64 {
        let n = f64::from(self.length);
        match self.period {
            Period::Day => n / 365.0,
            Period::Week => n * 7.0 / 365.0,
            Period::Month => n / 12.0,
            Period::Year => n,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.period.suffix())
    }
}

impl FromStr for Term {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_uppercase();
        match s.as_str() {
            "ON" | "O/N" => return Ok(Self::days(1)),
            "TN" | "T/N" => return Ok(Self::days(2)),
            _ => {}
        }

        let unit = s
            .chars()
            .last()
            .ok_or_else(|| CoreError::invalid_term("empty tenor"))?;
        let period = match unit {
            'D' => Period::Day,
            'W' => Period::Week,
            'M' => Period::Month,
            'Y' => Period::Year,
            _ => return Err(CoreError::invalid_term(s.clone())),
        };
        let length = s[..s.len() - 1]
            .parse::<i32>()
            .map_err(|_| CoreError::invalid_term(s.clone()))?;

        Ok(Self::new(length, period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!("3M".parse::<Term>().unwrap(), Term::new(3, Period::Month));
        assert_eq!("10y".parse::<Term>().unwrap(), Term::new(10, Period::Year));
        assert_eq!("2W".parse::<Term>().unwrap(), Term::new(2, Period::Week));
        assert_eq!("O/N".parse::<Term>().unwrap(), Term::days(1));
        assert!("3X".parse::<Term>().is_err());
        assert!("".parse::<Term>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let term = Term::days(91);
        assert_eq!(term.to_string(), "91D");
        assert_eq!(term.to_string().parse::<Term>().unwrap(), term);
    }

    #[test]
    fn test_add_to_dates() {
        let d = Date::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(
            "1M".parse::<Term>().unwrap().add_to(d).unwrap(),
            Date::from_ymd(2024, 2, 29).unwrap()
        );
        assert_eq!(
            "1W".parse::<Term>().unwrap().add_to(d).unwrap(),
            Date::from_ymd(2024, 2, 7).unwrap()
        );
    }

    #[test]
    fn test_between() {
        let a = Date::from_ymd(2025, 1, 1).unwrap();
        let b = Date::from_ymd(2025, 4, 1).unwrap();
        assert_eq!(Term::between(a, b).unwrap().to_string(), "90D");
    }
}
