//! Second-order forward-mode autodiff in two variables.
//!
//! A `Jet2` carries f together with ∂f/∂x, ∂f/∂y and the three distinct
//! second partials. Closed-form fields written once over `Jet2` get exact
//! gradients and Hessians, which is what the Lagrange solver needs.
//!
//! Hessian layout:
//! ```text
//! H = [dxx  dxy]
//!     [dxy  dyy]
//! ```

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::{finite, Sample, ScalarField, Var};

/// Value, gradient and Hessian of an expression at one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jet2 {
    pub val: f64,
    pub dx: f64,
    pub dy: f64,
    pub dxx: f64,
    pub dxy: f64,
    pub dyy: f64,
}

impl Jet2 {
    /// Seed for the x variable.
    #[inline]
    pub fn x(val: f64) -> Self {
        Self {
            dx: 1.0,
            ..Self::constant(val)
        }
    }

    /// Seed for the y variable.
    #[inline]
    pub fn y(val: f64) -> Self {
        Self {
            dy: 1.0,
            ..Self::constant(val)
        }
    }

    #[inline]
    pub fn constant(val: f64) -> Self {
        Self {
            val,
            dx: 0.0,
            dy: 0.0,
            dxx: 0.0,
            dxy: 0.0,
            dyy: 0.0,
        }
    }

    /// Compose with a scalar function given its value and first two derivatives
    /// at `self.val`.
    #[inline]
    fn chain(self, g0: f64, g1: f64, g2: f64) -> Self {
        Self {
            val: g0,
            dx: g1 * self.dx,
            dy: g1 * self.dy,
            dxx: g2 * self.dx * self.dx + g1 * self.dxx,
            dxy: g2 * self.dx * self.dy + g1 * self.dxy,
            dyy: g2 * self.dy * self.dy + g1 * self.dyy,
        }
    }

    pub fn recip(self) -> Self {
        let r = 1.0 / self.val;
        self.chain(r, -r * r, 2.0 * r * r * r)
    }

    pub fn exp(self) -> Self {
        let e = self.val.exp();
        self.chain(e, e, e)
    }

    pub fn ln(self) -> Self {
        let r = 1.0 / self.val;
        self.chain(self.val.ln(), r, -r * r)
    }

    pub fn sqrt(self) -> Self {
        let s = self.val.sqrt();
        self.chain(s, 0.5 / s, -0.25 / (s * s * s))
    }

    pub fn sin(self) -> Self {
        let (s, c) = self.val.sin_cos();
        self.chain(s, c, -s)
    }

    pub fn cos(self) -> Self {
        let (s, c) = self.val.sin_cos();
        self.chain(c, -s, -c)
    }

    pub fn powi(self, n: i32) -> Self {
        match n {
            0 => Self::constant(1.0),
            1 => self,
            _ => {
                let nf = f64::from(n);
                self.chain(
                    self.val.powi(n),
                    nf * self.val.powi(n - 1),
                    nf * (nf - 1.0) * self.val.powi(n - 2),
                )
            }
        }
    }

    /// Second partial by variable pair (order-insensitive).
    #[inline]
    pub fn second(&self, v1: Var, v2: Var) -> f64 {
        match (v1, v2) {
            (Var::X, Var::X) => self.dxx,
            (Var::Y, Var::Y) => self.dyy,
            _ => self.dxy,
        }
    }

    #[inline]
    pub fn first(&self, var: Var) -> f64 {
        match var {
            Var::X => self.dx,
            Var::Y => self.dy,
        }
    }
}

impl Add for Jet2 {
    type Output = Jet2;
    #[inline]
    fn add(self, rhs: Jet2) -> Jet2 {
        Jet2 {
            val: self.val + rhs.val,
            dx: self.dx + rhs.dx,
            dy: self.dy + rhs.dy,
            dxx: self.dxx + rhs.dxx,
            dxy: self.dxy + rhs.dxy,
            dyy: self.dyy + rhs.dyy,
        }
    }
}

impl Sub for Jet2 {
    type Output = Jet2;
    #[inline]
    fn sub(self, rhs: Jet2) -> Jet2 {
        self + (-rhs)
    }
}

impl Neg for Jet2 {
    type Output = Jet2;
    #[inline]
    fn neg(self) -> Jet2 {
        self * -1.0
    }
}

/// Product rule through second order.
impl Mul for Jet2 {
    type Output = Jet2;
    #[inline]
    fn mul(self, rhs: Jet2) -> Jet2 {
        let (a, b) = (self, rhs);
        Jet2 {
            val: a.val * b.val,
            dx: a.dx * b.val + a.val * b.dx,
            dy: a.dy * b.val + a.val * b.dy,
            dxx: a.dxx * b.val + 2.0 * a.dx * b.dx + a.val * b.dxx,
            dxy: a.dxy * b.val + a.dx * b.dy + a.dy * b.dx + a.val * b.dxy,
            dyy: a.dyy * b.val + 2.0 * a.dy * b.dy + a.val * b.dyy,
        }
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Div for Jet2 {
    type Output = Jet2;
    #[inline]
    fn div(self, rhs: Jet2) -> Jet2 {
        self * rhs.recip()
    }
}

impl Add<f64> for Jet2 {
    type Output = Jet2;
    #[inline]
    fn add(self, rhs: f64) -> Jet2 {
        Jet2 {
            val: self.val + rhs,
            ..self
        }
    }
}

impl Sub<f64> for Jet2 {
    type Output = Jet2;
    #[inline]
    fn sub(self, rhs: f64) -> Jet2 {
        self + (-rhs)
    }
}

impl Mul<f64> for Jet2 {
    type Output = Jet2;
    #[inline]
    fn mul(self, rhs: f64) -> Jet2 {
        Jet2 {
            val: self.val * rhs,
            dx: self.dx * rhs,
            dy: self.dy * rhs,
            dxx: self.dxx * rhs,
            dxy: self.dxy * rhs,
            dyy: self.dyy * rhs,
        }
    }
}

impl Mul<Jet2> for f64 {
    type Output = Jet2;
    #[inline]
    fn mul(self, rhs: Jet2) -> Jet2 {
        rhs * self
    }
}

/// A closed-form field `f(x, y)` evaluated over jets.
///
/// Derivatives are reported only where the value itself is finite, so e.g.
/// `ln` at a negative argument fails for the partials as well.
#[derive(Clone, Copy, Debug)]
pub struct JetField {
    f: fn(Jet2, Jet2) -> Jet2,
}

impl JetField {
    pub const fn new(f: fn(Jet2, Jet2) -> Jet2) -> Self {
        Self { f }
    }

    #[inline]
    pub fn jet(&self, x: f64, y: f64) -> Jet2 {
        (self.f)(Jet2::x(x), Jet2::y(y))
    }

    #[inline]
    fn checked(&self, x: f64, y: f64) -> Result<Jet2, super::DomainError> {
        let j = self.jet(x, y);
        finite(j.val)?;
        Ok(j)
    }
}

impl ScalarField for JetField {
    fn value(&self, x: f64, y: f64) -> Sample {
        finite(self.jet(x, y).val)
    }

    fn partial(&self, var: Var, x: f64, y: f64) -> Sample {
        finite(self.checked(x, y)?.first(var))
    }

    fn second_partial(&self, v1: Var, v2: Var, x: f64, y: f64) -> Sample {
        finite(self.checked(x, y)?.second(v1, v2))
    }
}
