//! Curated surface for the rendering/UI side.
//!
//! One entry point per exposed kernel operation; everything here is a re-export
//! so the operations can also be reached through their home modules.

// Sampling and summaries
pub use crate::grid::{estimate_range, sample_grid, Grid, ObservedRange, RangeSummary};
// Gradient overlay
pub use crate::gradient::{
    gradient_field, point_report, unit_gradient, GradientSegment, PointReport,
};
// Limits
pub use crate::limit::{estimate_limit, LimitEstimate, LimitTrial};
// Quadrature
pub use crate::integrate::{integrate, simpson_subdivisions, Integral};
// Constrained optimization
pub use crate::lagrange::{
    solve_lagrange, solve_lagrange_with, NewtonCfg, OptimizationResult, Termination,
};
// Inputs and evaluators
pub use crate::field::{Catalog, Expression, FieldCompiler, ScalarField};
pub use crate::region::{IntegrationRegion, Region};
