//! # Curvekit Core
//!
//! Primitives consumed by the curve engine:
//!
//! - **Types**: `Date`, `Term` tenors, `Currency`, `Frequency`, `Compounding`
//! - **Day Count Conventions**: year fractions between dates
//! - **Business Day Calendars**: holiday calendars and date adjustment
//!
//! ## Example
//!
//! ```rust
//! use curvekit_core::prelude::*;
//!
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = "2Y".parse::<Term>().unwrap().add_to(start).unwrap();
//! let t = Act365Fixed.year_fraction_f64(start, end);
//! let df = Compounding::Continuous.discount_factor(0.03, t);
//! assert!(df < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::similar_names)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::uninlined_format_args)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessDayConvention, Calendar, CalendarId, HolidayCalendar, NullCalendar,
        WeekendCalendar,
    };
    pub use crate::daycounts::{
        Act360, Act365Fixed, ActActIsda, DayCount, DayCountConvention, Thirty360US,
    };
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Compounding, Currency, Date, Frequency, Period, Term};
}
