//! Lattice sampling of f over a region, and domain/range summaries.
//!
//! Layout
//! - `xs`, `ys`: n endpoint-inclusive samples per axis, `t_i = min + (max-min)·i/(n-1)`.
//! - `cells`: n×n values, row-major by y then x (`cells[j*n + i] = f(xs[i], ys[j])`).
//!   Domain failures are stored as `None`.
//!
//! The resolution is clamped to [10, 200], so a grid always has n ≥ 2.

use std::fmt;

use crate::cfg::{MAX_RESOLUTION, MIN_RESOLUTION};
use crate::field::ScalarField;
use crate::region::Region;

/// Clamp a requested resolution to the supported range.
#[inline]
pub fn clamp_resolution(requested: usize) -> usize {
    requested.clamp(MIN_RESOLUTION, MAX_RESOLUTION)
}

/// `n` equally spaced points over `[lo, hi]`, both endpoints included (n ≥ 2).
pub(crate) fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    debug_assert!(n >= 2, "linspace needs at least two points");
    let last = (n - 1) as f64;
    (0..n).map(|i| lo + (hi - lo) * (i as f64 / last)).collect()
}

/// Sampled surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    xs: Vec<f64>,
    ys: Vec<f64>,
    cells: Vec<Option<f64>>,
    valid: usize,
}

impl Grid {
    /// Points per axis.
    #[inline]
    pub fn n(&self) -> usize {
        self.xs.len()
    }
    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }
    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }
    /// Row-major cells (y outer, x inner).
    #[inline]
    pub fn cells(&self) -> &[Option<f64>] {
        &self.cells
    }
    /// Value at x-index `i`, y-index `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.n();
        if i < n && j < n {
            self.cells[j * n + i]
        } else {
            None
        }
    }
    /// One row per y-sample.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<f64>]> {
        self.cells.chunks(self.n())
    }
    /// Finite cells counted during sampling.
    #[inline]
    pub fn valid(&self) -> usize {
        self.valid
    }
    #[inline]
    pub fn total(&self) -> usize {
        self.cells.len()
    }
    /// `(x, y, z)` triples in row-major order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, Option<f64>)> + '_ {
        let n = self.n();
        self.cells
            .iter()
            .enumerate()
            .map(move |(k, z)| (self.xs[k % n], self.ys[k / n], *z))
    }
}

/// Evaluate `field` on an n×n lattice over `region` (n = clamped `resolution`).
pub fn sample_grid<F: ScalarField + ?Sized>(field: &F, region: &Region, resolution: usize) -> Grid {
    let n = clamp_resolution(resolution);
    let xs = linspace(region.xmin(), region.xmax(), n);
    let ys = linspace(region.ymin(), region.ymax(), n);
    let mut cells = Vec::with_capacity(n * n);
    let mut valid = 0;
    for &y in &ys {
        for &x in &xs {
            let z = field.value(x, y).ok();
            if z.is_some() {
                valid += 1;
            }
            cells.push(z);
        }
    }
    tracing::trace!(n, valid, "sampled grid");
    Grid {
        xs,
        ys,
        cells,
        valid,
    }
}

/// Observed value range over the finite cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ObservedRange {
    Observed { zmin: f64, zmax: f64 },
    /// No cell was finite; there is no interval to report.
    NoValidSamples,
}

impl fmt::Display for ObservedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservedRange::Observed { zmin, zmax } => write!(f, "f ∈ [{zmin:.5}, {zmax:.5}]"),
            ObservedRange::NoValidSamples => write!(f, "no valid samples"),
        }
    }
}

/// Domain/range estimate derived from a grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeSummary {
    /// Literal sampled bounds, regardless of how many cells are finite.
    pub domain: Region,
    pub range: ObservedRange,
    pub valid: usize,
    pub total: usize,
}

impl fmt::Display for RangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "domain: {}; range: {}; valid: {}/{}",
            self.domain, self.range, self.valid, self.total
        )
    }
}

pub fn estimate_range(grid: &Grid) -> RangeSummary {
    let n = grid.n();
    let domain = Region::from_bounds(grid.xs[0], grid.xs[n - 1], grid.ys[0], grid.ys[n - 1]);
    let mut zmin = f64::INFINITY;
    let mut zmax = f64::NEG_INFINITY;
    let mut valid = 0;
    for z in grid.cells.iter().flatten() {
        zmin = zmin.min(*z);
        zmax = zmax.max(*z);
        valid += 1;
    }
    debug_assert_eq!(valid, grid.valid);
    let range = if valid > 0 {
        ObservedRange::Observed { zmin, zmax }
    } else {
        ObservedRange::NoValidSamples
    };
    RangeSummary {
        domain,
        range,
        valid,
        total: grid.total(),
    }
}
