//! Multi-path limit heuristics near a target point.
//!
//! Paths
//! - both axes: `(x0, y0+e)`, `(x0+e, y0)`;
//! - lines through the target: `(x0+e, y0+m·e)` for m ∈ {0.5, 1, 2, −0.5, −1.5}.
//!
//! Scales: ε, ε/2, ε/4, ε/8 (ε floored at 1e-6).
//!
//! Interpretation is left to the caller. A spread that shrinks with ε is
//! evidence that the limit exists; a spread that stays large suggests the
//! value depends on the path. Neither is a proof: finitely many paths and
//! scales cannot rule out other behavior.

use nalgebra::Vector2;

use crate::cfg::MIN_EPSILON;
use crate::error::{check_point, InputError};
use crate::field::{Sample, ScalarField};

/// Slopes of the straight-line approach paths.
pub const PATH_SLOPES: [f64; 5] = [0.5, 1.0, 2.0, -0.5, -1.5];
/// Scale divisors applied to the base epsilon, largest scale first.
pub const SCALE_DIVISORS: [f64; 4] = [1.0, 2.0, 4.0, 8.0];
/// Samples per scale: two axis paths plus one per slope.
pub const PATHS: usize = 2 + PATH_SLOPES.len();

/// Offsets `(dx, dy)` from the target at scale `e`, in path order.
pub fn approach_offsets(e: f64) -> [(f64, f64); PATHS] {
    let mut out = [(0.0, e), (e, 0.0), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0)];
    for (slot, m) in out[2..].iter_mut().zip(PATH_SLOPES) {
        *slot = (e, m * e);
    }
    out
}

/// Path samples at one scale.
#[derive(Clone, Debug, PartialEq)]
pub struct LimitTrial {
    pub epsilon: f64,
    /// One sample per path, in `approach_offsets` order.
    pub values: Vec<Sample>,
    /// Mean of the finite samples; `None` when there are none.
    pub mean: Option<f64>,
    /// `max − min` of the finite samples; `None` when there are none.
    pub spread: Option<f64>,
}

impl LimitTrial {
    fn from_values(epsilon: f64, values: Vec<Sample>) -> Self {
        let finite: Vec<f64> = values.iter().filter_map(|v| v.ok()).collect();
        let (mean, spread) = if finite.is_empty() {
            (None, None)
        } else {
            let mean = finite.iter().sum::<f64>() / finite.len() as f64;
            let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (Some(mean), Some(hi - lo))
        };
        Self {
            epsilon,
            values,
            mean,
            spread,
        }
    }

    /// Number of paths that produced a finite value.
    pub fn finite_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_ok()).count()
    }
}

/// Trials for every scale, largest epsilon first.
#[derive(Clone, Debug, PartialEq)]
pub struct LimitEstimate {
    pub target: Vector2<f64>,
    pub trials: Vec<LimitTrial>,
}

impl LimitEstimate {
    /// True when every scale has a spread and the spreads never grow.
    pub fn spread_shrinks(&self) -> bool {
        let spreads: Option<Vec<f64>> = self.trials.iter().map(|t| t.spread).collect();
        match spreads {
            Some(s) => s.windows(2).all(|w| w[1] <= w[0]),
            None => false,
        }
    }

    /// Trial at the smallest epsilon.
    pub fn finest(&self) -> Option<&LimitTrial> {
        self.trials.last()
    }
}

/// Sample `field` along the approach paths towards `target`.
pub fn estimate_limit<F: ScalarField + ?Sized>(
    field: &F,
    target: Vector2<f64>,
    epsilon: f64,
) -> Result<LimitEstimate, InputError> {
    check_point(target.x, target.y)?;
    if !epsilon.is_finite() {
        return Err(InputError::NonFiniteEpsilon { value: epsilon });
    }
    let base = epsilon.max(MIN_EPSILON);
    let trials = SCALE_DIVISORS
        .iter()
        .map(|d| {
            let e = base / d;
            let values = approach_offsets(e)
                .iter()
                .map(|(dx, dy)| field.value(target.x + dx, target.y + dy))
                .collect();
            LimitTrial::from_values(e, values)
        })
        .collect();
    Ok(LimitEstimate { target, trials })
}
