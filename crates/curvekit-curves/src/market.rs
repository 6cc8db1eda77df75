//! Market condition snapshots used to value calibration instruments.
//!
//! A [`MarketCondition`] is an immutable bundle of the curves and FX spots an
//! instrument needs. The bootstrap builds a fresh one for every trial curve,
//! placing the curve under calibration into the slots named by its
//! [`CurveRole`]s.

use std::sync::Arc;

use curvekit_core::types::{Currency, Date};
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::yield_curve::YieldCurve;

/// Slot of a [`MarketCondition`] a curve can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveRole {
    /// Curve used to discount cash flows.
    Discount,
    /// Curve used to project floating-rate fixings.
    Fixing,
    /// Discount curve of the foreign currency in an FX pair.
    ForeignDiscount,
}

impl CurveRole {
    /// Roles a calibrated curve fills unless told otherwise.
    pub const DEFAULT: [CurveRole; 2] = [CurveRole::Discount, CurveRole::Fixing];
}

/// FX spot quote: `rate` units of `domestic` per unit of `foreign`, for
/// settlement on `spot_date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FxSpot {
    /// Settlement date of the spot.
    pub spot_date: Date,
    /// Domestic units per foreign unit.
    pub rate: f64,
    /// Quote currency.
    pub domestic: Currency,
    /// Base currency.
    pub foreign: Currency,
}

impl FxSpot {
    /// Creates an FX spot quote.
    #[must_use]
    pub fn new(spot_date: Date, rate: f64, domestic: Currency, foreign: Currency) -> Self {
        Self {
            spot_date,
            rate,
            domestic,
            foreign,
        }
    }
}

/// Read-only snapshot of the market used for instrument valuation.
#[derive(Debug, Clone)]
pub struct MarketCondition {
    valuation_date: Date,
    discount_curve: Option<Arc<YieldCurve>>,
    fixing_curve: Option<Arc<YieldCurve>>,
    foreign_discount_curve: Option<Arc<YieldCurve>>,
    fx_spots: Vec<FxSpot>,
}

impl MarketCondition {
    /// Creates an empty market as of `valuation_date`.
    #[must_use]
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            discount_curve: None,
            fixing_curve: None,
            foreign_discount_curve: None,
            fx_spots: Vec::new(),
        }
    }

    /// Returns the market re-dated to `valuation_date`.
    #[must_use]
    pub fn with_valuation_date(mut self, valuation_date: Date) -> Self {
        self.valuation_date = valuation_date;
        self
    }

    /// Sets the discount curve.
    #[must_use]
    pub fn with_discount_curve(self, curve: Arc<YieldCurve>) -> Self {
        self.with_curve(CurveRole::Discount, curve)
    }

    /// Sets the fixing curve.
    #[must_use]
    pub fn with_fixing_curve(self, curve: Arc<YieldCurve>) -> Self {
        self.with_curve(CurveRole::Fixing, curve)
    }

    /// Sets the foreign discount curve.
    #[must_use]
    pub fn with_foreign_discount_curve(self, curve: Arc<YieldCurve>) -> Self {
        self.with_curve(CurveRole::ForeignDiscount, curve)
    }

    /// Adds an FX spot quote.
    #[must_use]
    pub fn with_fx_spot(mut self, spot: FxSpot) -> Self {
        self.fx_spots.push(spot);
        self
    }

    /// Places `curve` into the slot for `role`.
    #[must_use]
    pub fn with_curve(mut self, role: CurveRole, curve: Arc<YieldCurve>) -> Self {
        match role {
            CurveRole::Discount => self.discount_curve = Some(curve),
            CurveRole::Fixing => self.fixing_curve = Some(curve),
            CurveRole::ForeignDiscount => self.foreign_discount_curve = Some(curve),
        }
        self
    }

    /// Places `curve` into every slot in `roles`.
    #[must_use]
    pub fn with_roles(self, roles: &[CurveRole], curve: &Arc<YieldCurve>) -> Self {
        roles
            .iter()
            .fold(self, |market, role| market.with_curve(*role, Arc::clone(curve)))
    }

    /// Valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Curve in the slot for `role`, if any.
    #[must_use]
    pub fn curve(&self, role: CurveRole) -> Option<&Arc<YieldCurve>> {
        match role {
            CurveRole::Discount => self.discount_curve.as_ref(),
            CurveRole::Fixing => self.fixing_curve.as_ref(),
            CurveRole::ForeignDiscount => self.foreign_discount_curve.as_ref(),
        }
    }

    /// Discount curve, or an error if the slot is empty.
    pub fn discount_curve(&self) -> CurveResult<&YieldCurve> {
        self.require(CurveRole::Discount, "discount curve")
    }

    /// Fixing curve, or an error if the slot is empty.
    pub fn fixing_curve(&self) -> CurveResult<&YieldCurve> {
        self.require(CurveRole::Fixing, "fixing curve")
    }

    /// Foreign discount curve, if any.
    #[must_use]
    pub fn foreign_discount_curve(&self) -> Option<&YieldCurve> {
        self.foreign_discount_curve.as_deref()
    }

    /// FX spot quotes in insertion order.
    #[must_use]
    pub fn fx_spots(&self) -> &[FxSpot] {
        &self.fx_spots
    }

    fn require(&self, role: CurveRole, item: &str) -> CurveResult<&YieldCurve> {
        self.curve(role)
            .map(AsRef::as_ref)
            .ok_or_else(|| CurveError::missing(item))
    }
}
