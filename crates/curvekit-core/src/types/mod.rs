//! Domain types shared by the curve engine.
//!
//! - [`Date`]: calendar date
//! - [`Term`]: tenor such as `3M` or `10Y`
//! - [`Currency`]: ISO currency codes
//! - [`Frequency`]: payment frequency
//! - [`Compounding`]: interest compounding convention

mod currency;
mod date;
mod frequency;
mod term;

pub use currency::Currency;
pub use date::{days_in_month, Date};
pub use frequency::{Compounding, Frequency};
pub use term::{Period, Term};
