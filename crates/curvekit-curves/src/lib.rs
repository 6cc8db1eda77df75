//! # Curvekit Curves
//!
//! Yield curves for the Curvekit term structure engine.
//!
//! - **Yield curves**: [`YieldCurve`] over dated key points, holding zero
//!   rates, instantaneous forwards or discount factors
//! - **Bootstrap**: sequential calibration so every instrument reprices to
//!   its quote
//! - **Instruments**: deposits, swaps, zero coupon bonds and pass-through
//!   quotes behind the [`CalibrationInstrument`] trait
//! - **Market**: [`MarketCondition`] bundles the curves and FX spots an
//!   instrument prices against
//! - **Bumping**: parallel, key-rate and triangular bumps producing new
//!   curves
//! - **Conventions**: per-market defaults and a named registry
//!
//! ## Quick Start
//!
//! ```rust
//! use curvekit_core::types::{Compounding, Date};
//! use curvekit_curves::YieldCurveBuilder;
//!
//! let today = Date::from_ymd(2025, 1, 2).unwrap();
//! let curve = YieldCurveBuilder::new("flat", today)
//!     .from_points(vec![(today, 0.03), (today.add_days(1825), 0.03)])
//!     .unwrap();
//!
//! let df = curve.df(2.5).unwrap();
//! assert!((df - (-0.075_f64).exp()).abs() < 1e-14);
//!
//! let fwd = curve.forward_rate(1.0, 1.0, Compounding::Continuous).unwrap();
//! assert!((fwd - 0.03).abs() < 1e-12);
//!
//! let bumped = curve.shift(1.0).unwrap();
//! assert!((bumped.spot_rate(2.5).unwrap() - 0.0301).abs() < 1e-14);
//! ```
//!
//! [`CalibrationInstrument`]: instruments::CalibrationInstrument

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::needless_pass_by_value)]

pub mod bootstrap;
pub mod builder;
pub mod bumping;
pub mod conventions;
pub mod curve;
pub mod error;
pub mod instruments;
pub mod market;
pub mod spread;
pub mod yield_curve;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::BootstrapConfig;
    pub use crate::builder::YieldCurveBuilder;
    pub use crate::bumping::{key_rate_ladder, KeyRateBump, LadderPoint};
    pub use crate::conventions::{ConventionRegistry, CurveConvention};
    pub use crate::curve::Curve;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{
        CalibMethod, CalibrationInstrument, Deposit, DummyInstrument, InterestRateSwap,
        MarketInstrument, ZeroCouponBond,
    };
    pub use crate::market::{CurveRole, FxSpot, MarketCondition};
    pub use crate::spread::ZeroSpread;
    pub use crate::yield_curve::{RateRepresentation, YieldCurve};
}

pub use builder::YieldCurveBuilder;
pub use curve::Curve;
pub use error::{CurveError, CurveResult};
pub use market::{CurveRole, FxSpot, MarketCondition};
pub use spread::ZeroSpread;
pub use yield_curve::{RateRepresentation, YieldCurve};
