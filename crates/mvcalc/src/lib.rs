//! Numerical kernel for exploring scalar fields f(x, y) over rectangles.
//!
//! Components (leaves first)
//! - `field`: evaluator capability (`ScalarField`) plus the built-in evaluators
//!   (`Jet2` autodiff, `FiniteDiff`, named `Catalog`).
//! - `grid`: lattice sampling and domain/range summaries.
//! - `gradient`: normalized gradient overlay and point reports.
//! - `limit`: multi-path limit heuristics.
//! - `integrate`: composite 2D Simpson quadrature.
//! - `lagrange`: Newton solver for the Lagrange stationarity system.
//!
//! API Policy
//! - Every operation is synchronous and total: domain failures come back as
//!   values (`DomainError`, `Integral::Undefined`, `Termination`), never panics.
//! - Malformed inputs (empty intervals, non-finite points) are rejected when the
//!   input types are constructed, see `InputError`.

pub mod api;
pub(crate) mod cfg;
pub mod error;
pub mod field;
pub mod gradient;
pub mod grid;
pub mod integrate;
pub mod lagrange;
pub mod limit;
pub mod region;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::InputError;
pub use field::{DomainError, Sample, ScalarField, Var};
pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};
pub use region::{IntegrationRegion, Region};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::field::{
        Catalog, CatalogEntry, DomainError, Expression, FieldCompiler, FiniteDiff, Focus, Jet2,
        JetField, Sample, ScalarField, Var,
    };
    pub use crate::gradient::{gradient_field, point_report, unit_gradient, GradientSegment};
    pub use crate::grid::{estimate_range, sample_grid, Grid, ObservedRange, RangeSummary};
    pub use crate::integrate::{integrate, Integral};
    pub use crate::lagrange::{solve_lagrange, solve_lagrange_with, NewtonCfg, Termination};
    pub use crate::limit::{estimate_limit, LimitEstimate, LimitTrial};
    pub use crate::region::{IntegrationRegion, Region};
    pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};
}
