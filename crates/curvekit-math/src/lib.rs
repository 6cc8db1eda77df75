//! # Curvekit Math
//!
//! Numerical building blocks for the Curvekit term structure engine.
//!
//! - **Interpolation**: one-dimensional interpolators over ordered knots,
//!   from linear to Hagan-West convex monotone, behind the [`Interpolator`]
//!   trait and the [`InterpolationMethod`] selector
//! - **2D interpolation**: (maturity, strike) grid surfaces, optionally in
//!   total variance
//! - **Solvers**: Brent's bracketing root finder used by curve calibration
//!
//! Everything is immutable once built; queries take `&self` and are safe to
//! share across threads.
//!
//! [`Interpolator`]: interpolation::Interpolator
//! [`InterpolationMethod`]: interpolation::InterpolationMethod

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod interpolation;
pub mod interpolation2d;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{
        ConvexMonotoneConfig, ConvexMonotoneInterpolator, CubicHermiteFdInterpolator,
        CubicHermiteMonotonicInterpolator, ExponentialSplineInterpolator, Extrapolation,
        ForwardFlatInterpolator, Interpolant, InterpolationMethod, Interpolator,
        LinearInterpolator, LogCubicInterpolator, LogLinearInterpolator,
    };
    pub use crate::interpolation2d::{
        BiCubicSplineInterpolator, BiLinearInterpolator, Interpolation2DMethod, Interpolator2D,
        VarianceInterpolator,
    };
    pub use crate::solvers::{brent, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
