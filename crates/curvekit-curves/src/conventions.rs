//! Curve conventions and a name-keyed registry.
//!
//! A [`CurveConvention`] bundles the settings every yield curve needs besides
//! its data: currency, calendar and roll rule, day count, compounding and
//! interpolation. Conventions are plain values; a [`ConventionRegistry`] maps
//! names such as `"USD"` or `"CNY-REPO"` onto them for hosts that configure
//! curves by name.
//!
//! # Example
//!
//! ```rust
//! use curvekit_curves::conventions::ConventionRegistry;
//! use curvekit_core::daycounts::DayCountConvention;
//!
//! let registry = ConventionRegistry::with_defaults();
//! let eur = registry.get("EUR").unwrap();
//! assert_eq!(eur.day_count, DayCountConvention::Act360);
//! ```

use std::collections::BTreeMap;

use curvekit_core::calendars::{BusinessDayConvention, CalendarId};
use curvekit_core::daycounts::DayCountConvention;
use curvekit_core::error::CoreError;
use curvekit_core::types::{Compounding, Currency};
use curvekit_math::interpolation::InterpolationMethod;
use serde::{Deserialize, Serialize};

use crate::error::CurveResult;

/// Settings shared by a curve and the instruments calibrated against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveConvention {
    /// Currency of the curve.
    pub currency: Currency,
    /// Roll rule for dates derived from tenors.
    pub business_day_convention: BusinessDayConvention,
    /// Holiday calendar.
    pub calendar: CalendarId,
    /// Day count mapping dates onto curve time.
    pub day_count: DayCountConvention,
    /// Compounding of the curve's zero rates.
    pub compounding: Compounding,
    /// Interpolation between key points.
    pub interpolation: InterpolationMethod,
}

impl Default for CurveConvention {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
            calendar: CalendarId::Weekend,
            day_count: DayCountConvention::Act365Fixed,
            compounding: Compounding::Continuous,
            interpolation: InterpolationMethod::Linear,
        }
    }
}

impl CurveConvention {
    /// USD discounting: ACT/360, continuous, log-linear discount factors.
    #[must_use]
    pub fn usd() -> Self {
        Self {
            currency: Currency::USD,
            day_count: DayCountConvention::Act360,
            interpolation: InterpolationMethod::LogLinear,
            ..Self::default()
        }
    }

    /// EUR discounting: ACT/360, continuous, log-linear discount factors.
    #[must_use]
    pub fn eur() -> Self {
        Self {
            currency: Currency::EUR,
            ..Self::usd()
        }
    }

    /// GBP discounting: ACT/365F, continuous, log-linear discount factors.
    #[must_use]
    pub fn gbp() -> Self {
        Self {
            currency: Currency::GBP,
            day_count: DayCountConvention::Act365Fixed,
            interpolation: InterpolationMethod::LogLinear,
            ..Self::default()
        }
    }

    /// CNY repo curve: ACT/365F, annual compounding, linear zero rates.
    #[must_use]
    pub fn cny_repo() -> Self {
        Self {
            currency: Currency::CNY,
            compounding: Compounding::Annual,
            ..Self::default()
        }
    }

    /// Returns the convention with another currency.
    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Returns the convention with another interpolation method.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: InterpolationMethod) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Returns the convention with another compounding.
    #[must_use]
    pub fn with_compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Returns the convention with another day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }
}

/// Name to [`CurveConvention`] lookup passed to builders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConventionRegistry {
    conventions: BTreeMap<String, CurveConvention>,
}

impl ConventionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in conventions.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("USD", CurveConvention::usd());
        registry.register("EUR", CurveConvention::eur());
        registry.register("GBP", CurveConvention::gbp());
        registry.register("CNY-REPO", CurveConvention::cny_repo());
        registry
    }

    /// Adds or replaces a convention. Names are case-insensitive.
    pub fn register(&mut self, name: impl AsRef<str>, convention: CurveConvention) {
        self.conventions
            .insert(Self::key(name.as_ref()), convention);
    }

    /// Looks up a convention by name.
    pub fn get(&self, name: &str) -> CurveResult<&CurveConvention> {
        self.conventions
            .get(&Self::key(name))
            .ok_or_else(|| CoreError::unknown_convention(name).into())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.conventions.keys().map(String::as_str)
    }

    /// Number of registered conventions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conventions.len()
    }

    /// True if no conventions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conventions.is_empty()
    }

    fn key(name: &str) -> String {
        name.trim().to_ascii_uppercase()
    }
}
