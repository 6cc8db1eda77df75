//! Error types for curve operations.
//!
//! Covers curve construction, queries outside a curve's domain, market data
//! lookups, instrument valuation and bootstrap calibration.

use curvekit_core::error::CoreError;
use curvekit_core::types::Currency;
use curvekit_math::error::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Key points or settings cannot form a curve.
    #[error("Curve construction failed: {reason}")]
    Construction {
        /// Description of the problem.
        reason: String,
    },

    /// Query outside the key point range of a curve that forbids extrapolation.
    #[error("Extrapolation disallowed: {x:.6} is outside [{min:.6}, {max:.6}]")]
    ExtrapolationDisallowed {
        /// The query time.
        x: f64,
        /// First key point time.
        min: f64,
        /// Last key point time.
        max: f64,
    },

    /// Two pieces of market data disagree on a currency.
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        /// Currency the curve expects.
        expected: Currency,
        /// Currency that was supplied.
        actual: Currency,
    },

    /// Instrument cannot be valued the requested way.
    #[error("Unrecognized instrument {instrument}: {reason}")]
    UnrecognizedInstrument {
        /// Instrument description.
        instrument: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Key point or instrument index out of bounds.
    #[error("Index {index} out of range for {len} key points")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of addressable entries.
        len: usize,
    },

    /// The root finder could not match an instrument.
    #[error("Calibration failed at {tenor} (instrument {index}): {reason}")]
    CalibrationFailure {
        /// Tenor of the failing instrument.
        tenor: String,
        /// Position of the instrument after sorting.
        index: usize,
        /// Underlying cause.
        reason: String,
    },

    /// A market condition slot needed by a valuation is empty.
    #[error("Missing market data: {item}")]
    MissingMarketData {
        /// Which slot was empty (e.g. "discount curve").
        item: String,
    },

    /// Interpolation or root-finding error.
    #[error(transparent)]
    Math(MathError),

    /// Date, tenor or convention error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CurveError {
    /// Creates a construction error.
    #[must_use]
    pub fn construction(reason: impl Into<String>) -> Self {
        Self::Construction {
            reason: reason.into(),
        }
    }

    /// Creates a currency mismatch error.
    #[must_use]
    pub fn currency_mismatch(expected: Currency, actual: Currency) -> Self {
        Self::CurrencyMismatch { expected, actual }
    }

    /// Creates an unrecognized instrument error.
    #[must_use]
    pub fn unrecognized_instrument(
        instrument: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnrecognizedInstrument {
            instrument: instrument.into(),
            reason: reason.into(),
        }
    }

    /// Creates an index out of range error.
    #[must_use]
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Creates a calibration failure.
    #[must_use]
    pub fn calibration_failed(
        tenor: impl Into<String>,
        index: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::CalibrationFailure {
            tenor: tenor.into(),
            index,
            reason: reason.into(),
        }
    }

    /// Creates a missing market data error.
    #[must_use]
    pub fn missing(item: impl Into<String>) -> Self {
        Self::MissingMarketData { item: item.into() }
    }
}

impl From<MathError> for CurveError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::ExtrapolationNotAllowed { x, min, max } => {
                Self::ExtrapolationDisallowed { x, min, max }
            }
            MathError::InsufficientData { required, actual } => Self::construction(format!(
                "need at least {required} key points, got {actual}"
            )),
            other => Self::Math(other),
        }
    }
}
