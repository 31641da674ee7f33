//! Boundary validation errors.
//!
//! Only malformed caller input ends up here. Evaluation failures inside the
//! algorithms are values (`DomainError`, `Integral::Undefined`, ...).

use std::fmt;

/// Rejected input at the kernel boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputError {
    /// A bound is NaN or infinite.
    NonFiniteBound { name: &'static str, value: f64 },
    /// Sampling regions need `lo < hi` on both axes.
    EmptyInterval { axis: &'static str, lo: f64, hi: f64 },
    /// Integration regions need a nonzero width on both axes.
    ZeroWidth { axis: &'static str, at: f64 },
    /// Approach or start point with a NaN/infinite coordinate.
    NonFinitePoint { x: f64, y: f64 },
    /// Limit base epsilon is NaN or infinite.
    NonFiniteEpsilon { value: f64 },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NonFiniteBound { name, value } => {
                write!(f, "bound {name} must be finite (got {value})")
            }
            InputError::EmptyInterval { axis, lo, hi } => {
                write!(f, "{axis} interval [{lo}, {hi}] is empty (need {axis}min < {axis}max)")
            }
            InputError::ZeroWidth { axis, at } => {
                write!(f, "{axis} integration interval collapses to the single value {at}")
            }
            InputError::NonFinitePoint { x, y } => {
                write!(f, "point ({x}, {y}) must have finite coordinates")
            }
            InputError::NonFiniteEpsilon { value } => {
                write!(f, "epsilon must be finite (got {value})")
            }
        }
    }
}

impl std::error::Error for InputError {}

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NonFiniteBound { name, value })
    }
}

pub(crate) fn check_point(x: f64, y: f64) -> Result<(), InputError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(InputError::NonFinitePoint { x, y })
    }
}
