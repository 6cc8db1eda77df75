//! Root finding.
//!
//! Bootstrap calibration solves one unknown per instrument, always inside a
//! known bracket, so the crate ships a single bracketing solver:
//!
//! - [`brent`]: inverse quadratic interpolation with a bisection safeguard
//!
//! ```rust
//! use curvekit_math::solvers::{brent, SolverConfig};
//!
//! // Continuously compounded rate that gives a 2y discount factor of 0.94
//! let f = |r: f64| (-r * 2.0).exp() - 0.94;
//! let result = brent(f, -0.5, 1.0, &SolverConfig::default()).unwrap();
//! assert!((result.root + 0.94_f64.ln() / 2.0).abs() < 1e-10);
//! ```

mod brent;

pub use brent::brent;

use serde::{Deserialize, Serialize};

/// Default tolerance for root finding.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root finding.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Tolerance on both the residual and the bracket width.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
}
