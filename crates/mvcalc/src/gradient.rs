//! Gradient overlay and point reports.
//!
//! The overlay lattice is coarser than the surface grid:
//! `m = clamp(floor(n/3), 8, 25)` points per axis, endpoint-inclusive. Each
//! emitted segment starts at a lattice point and follows the unit gradient,
//! scaled to `0.15 · max(width/m, height/m)` so segments never dominate the plot.

use nalgebra::Vector2;

use crate::cfg::{MAX_OVERLAY, MIN_OVERLAY, OVERLAY_SCALE};
use crate::field::{Sample, ScalarField, Var};
use crate::grid::{clamp_resolution, linspace};
use crate::region::Region;

/// Direction segment `start → end` for the contour overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientSegment {
    pub start: Vector2<f64>,
    pub end: Vector2<f64>,
}

impl GradientSegment {
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.end - self.start
    }
}

/// Overlay lattice size for a (raw) grid resolution.
#[inline]
pub fn overlay_size(resolution: usize) -> usize {
    (clamp_resolution(resolution) / 3).clamp(MIN_OVERLAY, MAX_OVERLAY)
}

/// Normalized gradient at a point; `None` if a partial fails or the gradient
/// is exactly zero.
///
/// The gradient is divided by its largest component before normalizing, so
/// finite partials near the limits of `f64` neither underflow nor overflow.
pub fn unit_gradient<F: ScalarField + ?Sized>(field: &F, x: f64, y: f64) -> Option<Vector2<f64>> {
    let g = field.gradient(x, y).ok()?;
    let scale = g.amax();
    if scale == 0.0 {
        return None;
    }
    let s = g / scale;
    Some(s / s.norm())
}

/// Row-major (y outer, x inner) overlay segments over `region`.
pub fn gradient_field<F: ScalarField + ?Sized>(
    field: &F,
    region: &Region,
    resolution: usize,
) -> Vec<GradientSegment> {
    let m = overlay_size(resolution);
    let len = OVERLAY_SCALE * (region.width() / m as f64).max(region.height() / m as f64);
    let xs = linspace(region.xmin(), region.xmax(), m);
    let ys = linspace(region.ymin(), region.ymax(), m);
    let mut out = Vec::with_capacity(m * m);
    for &y in &ys {
        for &x in &xs {
            if let Some(u) = unit_gradient(field, x, y) {
                let start = Vector2::new(x, y);
                out.push(GradientSegment {
                    start,
                    end: start + u * len,
                });
            }
        }
    }
    tracing::trace!(m, emitted = out.len(), "gradient overlay");
    out
}

/// Value and raw gradient at a single point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointReport {
    pub x: f64,
    pub y: f64,
    pub value: Sample,
    pub dfdx: Sample,
    pub dfdy: Sample,
}

pub fn point_report<F: ScalarField + ?Sized>(field: &F, x: f64, y: f64) -> PointReport {
    PointReport {
        x,
        y,
        value: field.value(x, y),
        dfdx: field.partial(Var::X, x, y),
        dfdy: field.partial(Var::Y, x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FiniteDiff, JetField};
    use std::f64::consts::FRAC_1_SQRT_2;

    fn paraboloid() -> JetField {
        JetField::new(|x, y| x.powi(2) + y.powi(2))
    }

    #[test]
    fn paraboloid_direction_at_one_one() {
        let u = unit_gradient(&paraboloid(), 1.0, 1.0).unwrap();
        assert!((u.x - FRAC_1_SQRT_2).abs() < 1e-15);
        assert!((u.y - FRAC_1_SQRT_2).abs() < 1e-15);
        // Same answer from a finite-difference evaluator.
        let fd = FiniteDiff::new(|x: f64, y: f64| x * x + y * y);
        let v = unit_gradient(&fd, 1.0, 1.0).unwrap();
        assert!((u - v).norm() < 1e-8);
    }

    #[test]
    fn overlay_size_clamps() {
        assert_eq!(overlay_size(0), 8); // n clamps to 10 → 3 → 8
        assert_eq!(overlay_size(30), 10);
        assert_eq!(overlay_size(60), 20);
        assert_eq!(overlay_size(200), 25);
    }

    #[test]
    fn zero_gradient_point_is_skipped() {
        // m = 9 on [-4,4] puts a lattice point exactly at the origin.
        let region = Region::centered(4.0).unwrap();
        let segs = gradient_field(&paraboloid(), &region, 27);
        assert_eq!(overlay_size(27), 9);
        assert_eq!(segs.len(), 9 * 9 - 1);
        assert!(segs.iter().all(|s| s.start != Vector2::zeros()));
    }

    #[test]
    fn segments_have_fixed_length_and_row_major_order() {
        let region = Region::new(0.0, 6.0, -1.0, 1.0).unwrap();
        let field = JetField::new(|x, y| x.sin() + y.cos());
        let segs = gradient_field(&field, &region, 60);
        let m = 20.0;
        let expect = 0.15 * (6.0 / m);
        for s in &segs {
            assert!((s.direction().norm() - expect).abs() < 1e-12);
        }
        for w in segs.windows(2) {
            let (a, b) = (w[0].start, w[1].start);
            assert!(a.y < b.y || (a.y == b.y && a.x < b.x));
        }
    }

    #[test]
    fn non_finite_partials_are_skipped() {
        // sqrt(x^2+y^2) has no derivative at the origin.
        let field = JetField::new(|x, y| (x.powi(2) + y.powi(2)).sqrt());
        let region = Region::centered(4.0).unwrap();
        let segs = gradient_field(&field, &region, 27);
        assert_eq!(segs.len(), 80);
    }

    #[test]
    fn extreme_but_finite_gradients_still_emit_segments() {
        let region = Region::centered(1.0).unwrap();
        let tiny = JetField::new(|x, y| (x + y) * 1e-200);
        let huge = JetField::new(|x, y| (x + y) * 1e200);
        for field in [tiny, huge] {
            let u = unit_gradient(&field, 0.3, 0.4).unwrap();
            assert!((u.x - FRAC_1_SQRT_2).abs() < 1e-15);
            assert!((u.y - FRAC_1_SQRT_2).abs() < 1e-15);
            let segs = gradient_field(&field, &region, 30);
            assert_eq!(segs.len(), 10 * 10);
            let expect = 0.15 * (2.0 / 10.0);
            assert!(segs
                .iter()
                .all(|s| (s.direction().norm() - expect).abs() < 1e-12));
        }
    }

    #[test]
    fn point_report_matches_partials() {
        let field = JetField::new(|x, y| x * y);
        let r = point_report(&field, 2.0, -1.0);
        assert_eq!(r.value, Ok(-2.0));
        assert_eq!(r.dfdx, Ok(-1.0));
        assert_eq!(r.dfdy, Ok(2.0));
        let log_r = JetField::new(|x, y| (x.powi(2) + y.powi(2)).ln());
        assert!(point_report(&log_r, 0.0, 0.0).value.is_err());
    }
}
