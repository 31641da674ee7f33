//! Evaluator capability consumed by every kernel algorithm.
//!
//! Purpose
//! - Decouple the numerics from how f(x, y) and its derivatives are produced.
//!   A symbolic engine, dual numbers (`Jet2`), or finite differences
//!   (`FiniteDiff`) all plug in through `ScalarField`.
//! - Replace NaN sentinels with an explicit `Result<f64, DomainError>`; an
//!   evaluator never hands a non-finite number to the algorithms.
//!
//! Expressions
//! - `Expression` is an opaque string. The kernel never parses it; a
//!   `FieldCompiler` (the built-in one is `Catalog`) turns it into a field.

mod catalog;
mod fd;
mod jet;

use std::fmt;

use nalgebra::Vector2;

pub use catalog::{Catalog, CatalogEntry, Focus};
pub use fd::FiniteDiff;
pub use jet::{Jet2, JetField};

/// Differentiation variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Var {
    X,
    Y,
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Var::X => write!(f, "x"),
            Var::Y => write!(f, "y"),
        }
    }
}

/// The field (or one of its derivatives) is undefined or non-finite at a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DomainError;

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point lies outside the domain of the field")
    }
}

impl std::error::Error for DomainError {}

/// Result of one evaluation: a finite real or a domain failure.
pub type Sample = Result<f64, DomainError>;

/// Map a raw float to a `Sample` (NaN and ±∞ become `DomainError`).
#[inline]
pub fn finite(v: f64) -> Sample {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DomainError)
    }
}

/// Scalar field f(x, y) with first and second partials.
///
/// Implementations must be pure and total: same input, same output, and no
/// panics. Every failure is reported as `DomainError`.
pub trait ScalarField {
    fn value(&self, x: f64, y: f64) -> Sample;
    fn partial(&self, var: Var, x: f64, y: f64) -> Sample;
    fn second_partial(&self, v1: Var, v2: Var, x: f64, y: f64) -> Sample;

    /// `(∂f/∂x, ∂f/∂y)`; fails if either partial fails.
    fn gradient(&self, x: f64, y: f64) -> Result<Vector2<f64>, DomainError> {
        Ok(Vector2::new(
            self.partial(Var::X, x, y)?,
            self.partial(Var::Y, x, y)?,
        ))
    }
}

impl<T: ScalarField + ?Sized> ScalarField for &T {
    fn value(&self, x: f64, y: f64) -> Sample {
        (**self).value(x, y)
    }
    fn partial(&self, var: Var, x: f64, y: f64) -> Sample {
        (**self).partial(var, x, y)
    }
    fn second_partial(&self, v1: Var, v2: Var, x: f64, y: f64) -> Sample {
        (**self).second_partial(v1, v2, x, y)
    }
}

impl<T: ScalarField + ?Sized> ScalarField for Box<T> {
    fn value(&self, x: f64, y: f64) -> Sample {
        (**self).value(x, y)
    }
    fn partial(&self, var: Var, x: f64, y: f64) -> Sample {
        (**self).partial(var, x, y)
    }
    fn second_partial(&self, v1: Var, v2: Var, x: f64, y: f64) -> Sample {
        (**self).second_partial(v1, v2, x, y)
    }
}

/// Opaque expression text naming f(x, y) or a constraint g(x, y).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Expression(String);

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-insensitive key used for lookups.
    pub(crate) fn key(&self) -> String {
        self.0.chars().filter(|c| !c.is_whitespace()).collect()
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Expression {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns expression text into an evaluator. `None` means the compiler does not
/// understand the expression.
pub trait FieldCompiler {
    fn compile(&self, expr: &Expression) -> Option<Box<dyn ScalarField>>;
}

#[cfg(test)]
mod tests;
