//! Curve bootstrap.
//!
//! Turns a list of [`MarketInstrument`](crate::instruments::MarketInstrument)
//! quotes into key points by solving one key point per instrument, in
//! calibration date order, against a curve that grows by one point each step.
//! Interpolators whose segments depend on later points (cubic Hermite,
//! convex monotone) get refinement sweeps over the full curve afterwards.
//!
//! Bootstrapping is reached through
//! [`YieldCurveBuilder::from_instruments`](crate::builder::YieldCurveBuilder::from_instruments)
//! and re-run by every instrument-mode bump.

mod sequential;

pub(crate) use sequential::calibrate;

use curvekit_math::solvers::SolverConfig;
use serde::{Deserialize, Serialize};

/// Settings for the sequential bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Root finder settings used for every key point.
    pub solver: SolverConfig,
    /// Search bracket for rate-valued key points.
    pub rate_bounds: (f64, f64),
    /// Search bracket for discount-factor key points.
    pub df_bounds: (f64, f64),
    /// Largest acceptable |model value - target| after calibration.
    pub residual_tolerance: f64,
    /// Refinement sweeps allowed before calibration fails.
    pub max_sweeps: u32,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::new(1e-14, 100),
            rate_bounds: (-0.5, 1.0),
            df_bounds: (1e-64, 1.0),
            residual_tolerance: 1e-10,
            max_sweeps: 50,
        }
    }
}

impl BootstrapConfig {
    /// Sets the root finder settings.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the bracket for rate-valued key points.
    #[must_use]
    pub fn with_rate_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.rate_bounds = (lower, upper);
        self
    }

    /// Sets the bracket for discount-factor key points.
    #[must_use]
    pub fn with_df_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.df_bounds = (lower, upper);
        self
    }

    /// Sets the residual tolerance.
    #[must_use]
    pub fn with_residual_tolerance(mut self, tolerance: f64) -> Self {
        self.residual_tolerance = tolerance;
        self
    }

    /// Sets the refinement sweep limit.
    #[must_use]
    pub fn with_max_sweeps(mut self, max_sweeps: u32) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }
}
