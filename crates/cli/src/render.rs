//! JSON views of kernel results for stdout.

use mvcalc::field::{CatalogEntry, Sample};
use mvcalc::gradient::PointReport;
use mvcalc::grid::{ObservedRange, RangeSummary};
use mvcalc::integrate::Integral;
use mvcalc::lagrange::OptimizationResult;
use mvcalc::limit::{LimitEstimate, LimitTrial};
use serde::Serialize;

fn opt(s: &Sample) -> Option<f64> {
    s.as_ref().ok().copied()
}

#[derive(Serialize)]
pub struct RegionView {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl From<&mvcalc::Region> for RegionView {
    fn from(r: &mvcalc::Region) -> Self {
        Self {
            xmin: r.xmin(),
            xmax: r.xmax(),
            ymin: r.ymin(),
            ymax: r.ymax(),
        }
    }
}

#[derive(Serialize)]
pub struct RangeView {
    pub domain: RegionView,
    /// `[zmin, zmax]`, absent when no cell was finite.
    pub range: Option<[f64; 2]>,
    pub valid: usize,
    pub total: usize,
}

impl From<&RangeSummary> for RangeView {
    fn from(s: &RangeSummary) -> Self {
        let range = match s.range {
            ObservedRange::Observed { zmin, zmax } => Some([zmin, zmax]),
            ObservedRange::NoValidSamples => None,
        };
        Self {
            domain: RegionView::from(&s.domain),
            range,
            valid: s.valid,
            total: s.total,
        }
    }
}

#[derive(Serialize)]
pub struct PointView {
    pub x: f64,
    pub y: f64,
    pub value: Option<f64>,
    pub gradient: [Option<f64>; 2],
}

impl From<&PointReport> for PointView {
    fn from(r: &PointReport) -> Self {
        Self {
            x: r.x,
            y: r.y,
            value: opt(&r.value),
            gradient: [opt(&r.dfdx), opt(&r.dfdy)],
        }
    }
}

#[derive(Serialize)]
pub struct TrialView {
    pub epsilon: f64,
    pub values: Vec<Option<f64>>,
    pub mean: Option<f64>,
    pub spread: Option<f64>,
}

impl From<&LimitTrial> for TrialView {
    fn from(t: &LimitTrial) -> Self {
        Self {
            epsilon: t.epsilon,
            values: t.values.iter().map(opt).collect(),
            mean: t.mean,
            spread: t.spread,
        }
    }
}

#[derive(Serialize)]
pub struct LimitView {
    pub target: [f64; 2],
    pub trials: Vec<TrialView>,
    pub spread_shrinks: bool,
}

impl From<&LimitEstimate> for LimitView {
    fn from(e: &LimitEstimate) -> Self {
        Self {
            target: [e.target.x, e.target.y],
            trials: e.trials.iter().map(TrialView::from).collect(),
            spread_shrinks: e.spread_shrinks(),
        }
    }
}

#[derive(Serialize)]
pub struct IntegralView {
    pub value: Option<f64>,
    /// First node where the integrand was undefined.
    pub undefined_at: Option<[f64; 2]>,
    pub subdivisions: usize,
}

impl IntegralView {
    pub fn new(integral: &Integral, subdivisions: usize) -> Self {
        let undefined_at = match integral {
            Integral::Value(_) => None,
            Integral::Undefined { at } => Some([at.x, at.y]),
        };
        Self {
            value: integral.value(),
            undefined_at,
            subdivisions,
        }
    }
}

#[derive(Serialize)]
pub struct OptimizationView {
    pub x: f64,
    pub y: f64,
    pub lambda: f64,
    pub value: Option<f64>,
    pub termination: String,
    pub iterations: usize,
    pub residual: Option<[f64; 3]>,
    pub success: bool,
}

impl From<&OptimizationResult> for OptimizationView {
    fn from(r: &OptimizationResult) -> Self {
        Self {
            x: r.x,
            y: r.y,
            lambda: r.lambda,
            value: opt(&r.value),
            termination: r.termination.to_string(),
            iterations: r.iterations,
            residual: r.residual.map(|v| [v.x, v.y, v.z]),
            success: r.success,
        }
    }
}

#[derive(Serialize)]
pub struct EntryView {
    pub label: &'static str,
    pub expr: &'static str,
    pub focus: String,
    pub region: RegionView,
    pub point: Option<(f64, f64)>,
}

impl From<&CatalogEntry> for EntryView {
    fn from(e: &CatalogEntry) -> Self {
        Self {
            label: e.label,
            expr: e.expr,
            focus: e.focus.to_string(),
            region: RegionView::from(&e.region),
            point: e.point,
        }
    }
}
