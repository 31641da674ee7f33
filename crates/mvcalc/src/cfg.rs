//! Fixed numeric defaults shared by the samplers (internal).
//!
//! Policy
//! - These mirror the behavior callers rely on (clamps, scales, floors) and are
//!   not meant to be tuned per call. Solver tolerances live in `NewtonCfg`.

/// Grid resolution clamp (points per axis).
pub(crate) const MIN_RESOLUTION: usize = 10;
pub(crate) const MAX_RESOLUTION: usize = 200;
/// Gradient overlay lattice clamp (points per axis).
pub(crate) const MIN_OVERLAY: usize = 8;
pub(crate) const MAX_OVERLAY: usize = 25;
/// Overlay segment length as a fraction of the larger lattice spacing.
pub(crate) const OVERLAY_SCALE: f64 = 0.15;
/// Floor for the base epsilon of the limit estimator.
pub(crate) const MIN_EPSILON: f64 = 1e-6;
/// Minimum Simpson subdivisions per axis.
pub(crate) const MIN_SUBDIVISIONS: usize = 10;
