//! Newton iteration for the Lagrange stationarity system.

use nalgebra::{Matrix3, Vector2, Vector3, SVD};

use crate::field::{DomainError, ScalarField, Var};

use super::types::{NewtonCfg, OptimizationResult, OptimizationState, Termination};

/// Derivatives of f and g needed for one Newton step.
#[derive(Clone, Copy, Debug)]
struct LocalModel {
    fx: f64,
    fy: f64,
    fxx: f64,
    fxy: f64,
    fyy: f64,
    g: f64,
    gx: f64,
    gy: f64,
    gxx: f64,
    gxy: f64,
    gyy: f64,
}

impl LocalModel {
    fn eval<F, G>(f: &F, g: &G, x: f64, y: f64) -> Result<Self, DomainError>
    where
        F: ScalarField + ?Sized,
        G: ScalarField + ?Sized,
    {
        Ok(Self {
            fx: f.partial(Var::X, x, y)?,
            fy: f.partial(Var::Y, x, y)?,
            fxx: f.second_partial(Var::X, Var::X, x, y)?,
            fxy: f.second_partial(Var::X, Var::Y, x, y)?,
            fyy: f.second_partial(Var::Y, Var::Y, x, y)?,
            g: g.value(x, y)?,
            gx: g.partial(Var::X, x, y)?,
            gy: g.partial(Var::Y, x, y)?,
            gxx: g.second_partial(Var::X, Var::X, x, y)?,
            gxy: g.second_partial(Var::X, Var::Y, x, y)?,
            gyy: g.second_partial(Var::Y, Var::Y, x, y)?,
        })
    }

    #[inline]
    fn residual(&self, lambda: f64) -> Vector3<f64> {
        Vector3::new(
            self.fx - lambda * self.gx,
            self.fy - lambda * self.gy,
            self.g,
        )
    }

    /// ∂F/∂(x, y, λ).
    #[inline]
    #[rustfmt::skip]
    fn jacobian(&self, lambda: f64) -> Matrix3<f64> {
        let hxy = self.fxy - lambda * self.gxy;
        Matrix3::new(
            self.fxx - lambda * self.gxx, hxy, -self.gx,
            hxy, self.fyy - lambda * self.gyy, -self.gy,
            self.gx, self.gy, 0.0,
        )
    }
}

/// `(fx − λ·gx, fy − λ·gy, g)` at `(x, y, λ)`; first-order quantities only.
pub fn stationarity_residual<F, G>(
    f: &F,
    g: &G,
    x: f64,
    y: f64,
    lambda: f64,
) -> Result<Vector3<f64>, DomainError>
where
    F: ScalarField + ?Sized,
    G: ScalarField + ?Sized,
{
    let fxy = f.gradient(x, y)?;
    let gxy = g.gradient(x, y)?;
    Ok(Vector3::new(
        fxy.x - lambda * gxy.x,
        fxy.y - lambda * gxy.y,
        g.value(x, y)?,
    ))
}

#[inline]
fn all_finite(v: &Vector3<f64>) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Solve `J·Δ = −F`: LU first, then (optionally) a minimum-norm least-squares step.
fn newton_step(cfg: &NewtonCfg, jac: &Matrix3<f64>, res: &Vector3<f64>) -> Option<Vector3<f64>> {
    let rhs = -*res;
    if let Some(delta) = jac.lu().solve(&rhs) {
        if all_finite(&delta) {
            return Some(delta);
        }
    }
    if !cfg.least_squares_fallback {
        return None;
    }
    tracing::debug!("singular Jacobian; taking least-squares step");
    let delta = SVD::new(*jac, true, true)
        .solve(&rhs, cfg.eps_singular)
        .ok()?;
    all_finite(&delta).then_some(delta)
}

/// Stationary point of f subject to g = 0 with default tolerances.
pub fn solve_lagrange<F, G>(f: &F, g: &G, start: Vector2<f64>, lambda0: f64) -> OptimizationResult
where
    F: ScalarField + ?Sized,
    G: ScalarField + ?Sized,
{
    solve_lagrange_with(&NewtonCfg::default(), f, g, start, lambda0)
}

/// Stationary point of f subject to g = 0.
///
/// Never fails: every terminal state yields the last iterate, and `success`
/// is decided by recomputing the residual against `cfg.success_tol`.
pub fn solve_lagrange_with<F, G>(
    cfg: &NewtonCfg,
    f: &F,
    g: &G,
    start: Vector2<f64>,
    lambda0: f64,
) -> OptimizationResult
where
    F: ScalarField + ?Sized,
    G: ScalarField + ?Sized,
{
    let mut state = OptimizationState::new(start.x, start.y, lambda0);
    let mut iterations = 0;
    let termination = loop {
        if iterations == cfg.max_iter {
            break Termination::Exhausted;
        }
        iterations += 1;
        let Ok(model) = LocalModel::eval(f, g, state.x, state.y) else {
            tracing::debug!(iterations, x = state.x, y = state.y, "derivative undefined");
            break Termination::Stalled;
        };
        let res = model.residual(state.lambda);
        let res_max = res.amax();
        if res_max < cfg.residual_tol {
            break Termination::Converged;
        }
        let Some(delta) = newton_step(cfg, &model.jacobian(state.lambda), &res) else {
            tracing::debug!(iterations, res_max, "Newton system unsolvable");
            break Termination::Stalled;
        };
        state.apply(&delta);
        let step_max = delta.amax();
        tracing::debug!(
            iterations,
            x = state.x,
            y = state.y,
            lambda = state.lambda,
            res_max,
            step_max,
            "newton step"
        );
        if !state.is_finite() {
            break Termination::Diverged;
        }
        if step_max < cfg.step_tol {
            break Termination::Converged;
        }
    };

    let residual = stationarity_residual(f, g, state.x, state.y, state.lambda).ok();
    let success = residual.is_some_and(|r| r.amax() < cfg.success_tol);
    tracing::debug!(%termination, iterations, success, "lagrange solve finished");
    OptimizationResult {
        x: state.x,
        y: state.y,
        lambda: state.lambda,
        value: f.value(state.x, state.y),
        termination,
        iterations,
        residual,
        success,
    }
}
