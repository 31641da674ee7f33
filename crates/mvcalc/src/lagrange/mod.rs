//! Lagrange multipliers by Newton's method on the stationarity system.
//!
//! Purpose
//! - Find a stationary point of f subject to g(x, y) = 0 by solving
//!   `F(x, y, λ) = [fx − λ·gx, fy − λ·gy, g] = 0` with Newton steps on the
//!   3×3 Jacobian built from exact (or approximated) second partials.
//!
//! Tolerances (two tiers)
//! - Iteration stops on a tight test: residual or step below 1e-8.
//! - The caller-visible `success` flag uses a looser test on a freshly
//!   recomputed residual (all components below 1e-5), independent of why the
//!   loop stopped. A step-size stop can fire on a stalled, inaccurate iterate.
//!
//! Singular Jacobians
//! - The LU solve is tried first. When it fails, a minimum-norm least-squares
//!   step (SVD) is taken instead unless `NewtonCfg::least_squares_fallback`
//!   is off, in which case the solve stalls right away. With λ = 0 and a linear
//!   objective the Jacobian is singular at every point, so the fallback is what
//!   lets such starts make progress.
//!
//! Code cross-refs: `field::ScalarField`, `field::Jet2`.

mod solve;
mod types;

pub use solve::{solve_lagrange, solve_lagrange_with, stationarity_residual};
pub use types::{NewtonCfg, OptimizationResult, OptimizationState, Termination};
