//! Central finite differences for plain closures.
//!
//! Steps scale with `max(1, |t|)`; defaults are ≈ ε^(1/3) for first partials
//! and ≈ ε^(1/4) for second partials. Every stencil point must be finite,
//! as must the center value.

use super::{finite, Sample, ScalarField, Var};

/// Adapter giving a bare `Fn(f64, f64) -> f64` the full `ScalarField` surface.
#[derive(Clone, Copy, Debug)]
pub struct FiniteDiff<F> {
    f: F,
    h1: f64,
    h2: f64,
}

impl<F: Fn(f64, f64) -> f64> FiniteDiff<F> {
    pub fn new(f: F) -> Self {
        Self::with_steps(f, 6e-6, 1.2e-4)
    }

    /// Custom relative steps for first (`h1`) and second (`h2`) partials.
    pub fn with_steps(f: F, h1: f64, h2: f64) -> Self {
        Self { f, h1, h2 }
    }

    #[inline]
    fn eval(&self, x: f64, y: f64) -> Sample {
        finite((self.f)(x, y))
    }
}

#[inline]
fn scaled(h: f64, t: f64) -> f64 {
    h * t.abs().max(1.0)
}

impl<F: Fn(f64, f64) -> f64> ScalarField for FiniteDiff<F> {
    fn value(&self, x: f64, y: f64) -> Sample {
        self.eval(x, y)
    }

    fn partial(&self, var: Var, x: f64, y: f64) -> Sample {
        self.eval(x, y)?;
        let (hx, hy) = match var {
            Var::X => (scaled(self.h1, x), 0.0),
            Var::Y => (0.0, scaled(self.h1, y)),
        };
        let fp = self.eval(x + hx, y + hy)?;
        let fm = self.eval(x - hx, y - hy)?;
        finite((fp - fm) / (2.0 * (hx + hy)))
    }

    fn second_partial(&self, v1: Var, v2: Var, x: f64, y: f64) -> Sample {
        let f0 = self.eval(x, y)?;
        let hx = scaled(self.h2, x);
        let hy = scaled(self.h2, y);
        match (v1, v2) {
            (Var::X, Var::X) => {
                let fp = self.eval(x + hx, y)?;
                let fm = self.eval(x - hx, y)?;
                finite((fp - 2.0 * f0 + fm) / (hx * hx))
            }
            (Var::Y, Var::Y) => {
                let fp = self.eval(x, y + hy)?;
                let fm = self.eval(x, y - hy)?;
                finite((fp - 2.0 * f0 + fm) / (hy * hy))
            }
            _ => {
                let fpp = self.eval(x + hx, y + hy)?;
                let fpm = self.eval(x + hx, y - hy)?;
                let fmp = self.eval(x - hx, y + hy)?;
                let fmm = self.eval(x - hx, y - hy)?;
                finite((fpp - fpm - fmp + fmm) / (4.0 * hx * hy))
            }
        }
    }
}
