//! Composite Simpson quadrature over a rectangle.
//!
//! Weights per axis are 1 at both ends, 4 at odd and 2 at even interior
//! indices; the 2D weight is their product and the sum is scaled by
//! `hx·hy/9`. Exact for polynomials up to degree 3 in each variable.
//!
//! Failure policy is strict: a single non-finite node anywhere makes the
//! whole integral `Undefined`. No partial sum is returned.

use std::fmt;

use nalgebra::Vector2;

use crate::cfg::MIN_SUBDIVISIONS;
use crate::field::ScalarField;
use crate::region::IntegrationRegion;

/// Quadrature outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Integral {
    Value(f64),
    /// The integrand failed at node `at` (first failure in row-major order).
    Undefined { at: Vector2<f64> },
}

impl Integral {
    pub fn value(&self) -> Option<f64> {
        match self {
            Integral::Value(v) => Some(*v),
            Integral::Undefined { .. } => None,
        }
    }
}

impl fmt::Display for Integral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integral::Value(v) => write!(f, "{v}"),
            Integral::Undefined { at } => write!(
                f,
                "undefined: integrand is not finite at ({}, {})",
                at.x, at.y
            ),
        }
    }
}

/// Coerce a requested subdivision count to an even number ≥ 10.
///
/// Odd counts round up, except `usize::MAX`, which rounds down.
#[inline]
pub fn simpson_subdivisions(requested: usize) -> usize {
    let n = requested.max(MIN_SUBDIVISIONS);
    if n % 2 == 1 {
        n.checked_add(1).unwrap_or(n - 1)
    } else {
        n
    }
}

#[inline]
fn simpson_weight(i: usize, n: usize) -> f64 {
    if i == 0 || i == n {
        1.0
    } else if i % 2 == 1 {
        4.0
    } else {
        2.0
    }
}

/// ∬ f dx dy over `region` by composite Simpson.
pub fn integrate<F: ScalarField + ?Sized>(field: &F, region: &IntegrationRegion) -> Integral {
    let n = region.subdivisions();
    let (ax, bx) = region.x_bounds();
    let (ay, by) = region.y_bounds();
    let hx = (bx - ax) / n as f64;
    let hy = (by - ay) / n as f64;
    let mut sum = 0.0;
    for j in 0..=n {
        let y = ay + j as f64 * hy;
        let wy = simpson_weight(j, n);
        for i in 0..=n {
            let x = ax + i as f64 * hx;
            let wx = simpson_weight(i, n);
            match field.value(x, y) {
                Ok(v) => sum += wx * wy * v,
                Err(_) => {
                    tracing::debug!(x, y, n, "integrand not finite; integral undefined");
                    return Integral::Undefined {
                        at: Vector2::new(x, y),
                    };
                }
            }
        }
    }
    Integral::Value((hx * hy / 9.0) * sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FiniteDiff, Jet2, JetField};
    use crate::region::Region;
    use proptest::prelude::*;

    fn unit_square(n: usize) -> IntegrationRegion {
        IntegrationRegion::new(0.0, 1.0, 0.0, 1.0, n).unwrap()
    }

    #[test]
    fn subdivision_coercion() {
        assert_eq!(simpson_subdivisions(0), 10);
        assert_eq!(simpson_subdivisions(9), 10);
        assert_eq!(simpson_subdivisions(10), 10);
        assert_eq!(simpson_subdivisions(11), 12);
        assert_eq!(simpson_subdivisions(64), 64);
        assert_eq!(unit_square(13).subdivisions(), 14);
    }

    #[test]
    fn subdivision_coercion_at_usize_max() {
        assert_eq!(simpson_subdivisions(usize::MAX), usize::MAX - 1);
        assert_eq!(simpson_subdivisions(usize::MAX - 1), usize::MAX - 1);
    }

    #[test]
    fn constant_is_exact() {
        let one = JetField::new(|_, _| Jet2::constant(1.0));
        let v = integrate(&one, &unit_square(10)).value().unwrap();
        assert!((v - 1.0).abs() < 1e-14, "v={v}");
    }

    #[test]
    fn paraboloid_converges_to_two_thirds() {
        let f = JetField::new(|x, y| x.powi(2) + y.powi(2));
        for n in [10, 20, 50] {
            let v = integrate(&f, &unit_square(n)).value().unwrap();
            assert!((v - 2.0 / 3.0).abs() < 1e-12, "n={n} v={v}");
        }
    }

    #[test]
    fn reversed_axis_flips_sign() {
        let f = JetField::new(|x, y| x * y + 1.0);
        let fwd = IntegrationRegion::new(0.0, 2.0, 0.0, 1.0, 10).unwrap();
        let rev = IntegrationRegion::new(2.0, 0.0, 0.0, 1.0, 10).unwrap();
        let a = integrate(&f, &fwd).value().unwrap();
        let b = integrate(&f, &rev).value().unwrap();
        assert!((a - 3.0).abs() < 1e-12);
        assert!((a + b).abs() < 1e-12);
    }

    #[test]
    fn single_bad_node_makes_integral_undefined() {
        // log(x^2 + y^2) is undefined only at the origin corner.
        let f = JetField::new(|x, y| (x.powi(2) + y.powi(2)).ln());
        let out = integrate(&f, &unit_square(10));
        assert_eq!(
            out,
            Integral::Undefined {
                at: Vector2::zeros()
            }
        );
        assert!(out.value().is_none());
        // Shifted off the origin it is fine.
        let shifted = IntegrationRegion::new(1.0, 2.0, 1.0, 2.0, 10).unwrap();
        assert!(integrate(&f, &shifted).value().is_some());
    }

    #[test]
    fn over_region_matches_explicit_bounds() {
        let r = Region::new(-1.0, 1.0, 0.0, 3.0).unwrap();
        let a = IntegrationRegion::over(&r, 11);
        let b = IntegrationRegion::new(-1.0, 1.0, 0.0, 3.0, 12).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(IntegrationRegion::new(1.0, 1.0, 0.0, 1.0, 10).is_err());
        assert!(IntegrationRegion::new(0.0, 1.0, f64::NAN, 1.0, 10).is_err());
    }

    proptest! {
        #[test]
        fn cubic_polynomials_are_integrated_exactly(
            c in proptest::array::uniform4(-3.0f64..3.0),
            n in 10usize..40,
        ) {
            // f = c0 + c1 x^3 + c2 x y^2 + c3 y^3 over [0,1]^2
            let f = move |x: f64, y: f64| {
                c[0] + c[1] * x.powi(3) + c[2] * x * y.powi(2) + c[3] * y.powi(3)
            };
            let exact = c[0] + c[1] / 4.0 + c[2] / 6.0 + c[3] / 4.0;
            let field = FiniteDiff::new(f);
            let v = integrate(&field, &unit_square(n)).value().unwrap();
            prop_assert!((v - exact).abs() < 1e-11, "v={} exact={}", v, exact);
        }
    }
}
