//! Solver configuration, iterate and result types.

use std::fmt;

use nalgebra::Vector3;

use crate::field::Sample;

/// Newton solver configuration (tolerances and iteration budget).
#[derive(Clone, Copy, Debug)]
pub struct NewtonCfg {
    pub max_iter: usize,
    /// Stop when the largest residual component drops below this.
    pub residual_tol: f64,
    /// Stop when the largest step component drops below this.
    pub step_tol: f64,
    /// Post-hoc acceptance threshold for every residual component.
    pub success_tol: f64,
    /// Take a least-squares step when the Jacobian is singular.
    pub least_squares_fallback: bool,
    /// Singular values at or below this are treated as zero in the fallback.
    pub eps_singular: f64,
}

impl Default for NewtonCfg {
    fn default() -> Self {
        Self {
            max_iter: 30,
            residual_tol: 1e-8,
            step_tol: 1e-8,
            success_tol: 1e-5,
            least_squares_fallback: true,
            eps_singular: 1e-12,
        }
    }
}

/// Current Newton iterate `(x, y, λ)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptimizationState {
    pub x: f64,
    pub y: f64,
    pub lambda: f64,
}

impl OptimizationState {
    #[inline]
    pub fn new(x: f64, y: f64, lambda: f64) -> Self {
        Self { x, y, lambda }
    }
    #[inline]
    pub fn apply(&mut self, delta: &Vector3<f64>) {
        self.x += delta[0];
        self.y += delta[1];
        self.lambda += delta[2];
    }
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.lambda.is_finite()
    }
}

/// Why the iteration stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Residual or step fell below the internal tolerance.
    Converged,
    /// A derivative was undefined or the Newton system could not be solved.
    Stalled,
    /// The iteration budget ran out.
    Exhausted,
    /// The iterate left the finite reals.
    Diverged,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Termination::Converged => "converged",
            Termination::Stalled => "stalled",
            Termination::Exhausted => "exhausted",
            Termination::Diverged => "diverged",
        };
        f.write_str(s)
    }
}

/// Final iterate plus an independently computed success flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptimizationResult {
    pub x: f64,
    pub y: f64,
    pub lambda: f64,
    /// `f(x, y)` at the final iterate.
    pub value: Sample,
    pub termination: Termination,
    /// Iterations started (1-based count of loop passes).
    pub iterations: usize,
    /// Stationarity residual at the final iterate, if it could be evaluated.
    pub residual: Option<Vector3<f64>>,
    pub success: bool,
}
