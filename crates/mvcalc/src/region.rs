//! Rectangular inputs: sampling regions and integration regions.
//!
//! Both types validate on construction, so the algorithms downstream can rely
//! on finite bounds and non-degenerate intervals.

use std::fmt;

use crate::error::{check_finite, InputError};
use crate::integrate::simpson_subdivisions;

/// Sampling rectangle `[xmin, xmax] × [ymin, ymax]` with `xmin < xmax`, `ymin < ymax`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

impl Region {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, InputError> {
        let xmin = check_finite("xmin", xmin)?;
        let xmax = check_finite("xmax", xmax)?;
        let ymin = check_finite("ymin", ymin)?;
        let ymax = check_finite("ymax", ymax)?;
        if xmin >= xmax {
            return Err(InputError::EmptyInterval {
                axis: "x",
                lo: xmin,
                hi: xmax,
            });
        }
        if ymin >= ymax {
            return Err(InputError::EmptyInterval {
                axis: "y",
                lo: ymin,
                hi: ymax,
            });
        }
        Ok(Self {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Square `[-half, half]²`.
    pub fn centered(half: f64) -> Result<Self, InputError> {
        Self::new(-half, half, -half, half)
    }

    /// Trusted constructor for literals and bounds taken from an existing lattice.
    pub(crate) const fn from_bounds(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }
    #[inline]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }
    #[inline]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }
    #[inline]
    pub fn ymax(&self) -> f64 {
        self.ymax
    }
    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.xmin..=self.xmax).contains(&x) && (self.ymin..=self.ymax).contains(&y)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x ∈ [{:.2}, {:.2}], y ∈ [{:.2}, {:.2}]",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}

/// Integration rectangle with its (already coerced) Simpson subdivision count.
///
/// Bounds may be given in either order; a reversed axis flips the sign of the
/// integral. Only a zero-width axis is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegrationRegion {
    ax: f64,
    bx: f64,
    ay: f64,
    by: f64,
    n: usize,
}

impl IntegrationRegion {
    /// `requested` is coerced to an even count of at least 10.
    pub fn new(ax: f64, bx: f64, ay: f64, by: f64, requested: usize) -> Result<Self, InputError> {
        let ax = check_finite("ax", ax)?;
        let bx = check_finite("bx", bx)?;
        let ay = check_finite("ay", ay)?;
        let by = check_finite("by", by)?;
        if ax == bx {
            return Err(InputError::ZeroWidth { axis: "x", at: ax });
        }
        if ay == by {
            return Err(InputError::ZeroWidth { axis: "y", at: ay });
        }
        Ok(Self {
            ax,
            bx,
            ay,
            by,
            n: simpson_subdivisions(requested),
        })
    }

    /// Integrate over a sampling region.
    pub fn over(region: &Region, requested: usize) -> Self {
        Self {
            ax: region.xmin,
            bx: region.xmax,
            ay: region.ymin,
            by: region.ymax,
            n: simpson_subdivisions(requested),
        }
    }

    #[inline]
    pub fn x_bounds(&self) -> (f64, f64) {
        (self.ax, self.bx)
    }
    #[inline]
    pub fn y_bounds(&self) -> (f64, f64) {
        (self.ay, self.by)
    }
    /// Subdivisions per axis (even, ≥ 10).
    #[inline]
    pub fn subdivisions(&self) -> usize {
        self.n
    }
}
