//! Curve bumping for sensitivity analysis.
//!
//! Bumps are applied through [`YieldCurve`](crate::YieldCurve) methods and
//! always produce a new curve:
//!
//! - [`YieldCurve::shift`](crate::YieldCurve::shift): parallel shift
//! - [`YieldCurve::bump_key_rate`](crate::YieldCurve::bump_key_rate): one point
//! - [`YieldCurve::bump_key_rate_range`](crate::YieldCurve::bump_key_rate_range):
//!   triangular bump described by a [`KeyRateBump`]
//!
//! A curve bootstrapped from instruments is bumped through its instrument
//! quotes and recalibrated. A curve built from key points is bumped in place
//! of its key point values.
//!
//! # Example: key-rate DV01 ladder
//!
//! ```rust,ignore
//! use curvekit_curves::bumping::key_rate_ladder;
//!
//! for rung in key_rate_ladder(&curve, 1.0)? {
//!     let dv01 = pv(&curve)? - pv(&rung.curve)?;
//!     println!("{}: {dv01}", rung.tenor);
//! }
//! ```

mod key_rate;
mod ladder;

pub use key_rate::KeyRateBump;
pub use ladder::{key_rate_ladder, LadderPoint};
