//! Constant zero-rate spread.

use serde::{Deserialize, Serialize};

/// A constant spread added to a curve's zero rates.
///
/// The spread is applied under the curve's own compounding convention, so a
/// curve with spread `s` reports `spot_rate(t) = base_spot_rate(t) + s`.
///
/// ```rust
/// use curvekit_curves::ZeroSpread;
///
/// let spread = ZeroSpread::new(0.001).bump_bp(5.0);
/// assert!((spread.value(3.0) - 0.0015).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZeroSpread(f64);

impl ZeroSpread {
    /// No spread.
    pub const ZERO: Self = Self(0.0);

    /// Creates a spread from a decimal rate (0.001 = 10bp).
    #[must_use]
    pub const fn new(spread: f64) -> Self {
        Self(spread)
    }

    /// Creates a spread from basis points.
    #[must_use]
    pub fn from_bp(bp: f64) -> Self {
        Self(bp * 1e-4)
    }

    /// Spread as a decimal rate.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.0
    }

    /// Spread applying at time `t`. Constant in `t`.
    #[must_use]
    pub fn value(&self, _t: f64) -> f64 {
        self.0
    }

    /// Returns the spread moved by `ds` (decimal).
    #[must_use]
    pub fn bump(&self, ds: f64) -> Self {
        Self(self.0 + ds)
    }

    /// Returns the spread moved by `bp` basis points.
    #[must_use]
    pub fn bump_bp(&self, bp: f64) -> Self {
        self.bump(bp * 1e-4)
    }

    /// True when the spread is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for ZeroSpread {
    fn from(spread: f64) -> Self {
        Self(spread)
    }
}
