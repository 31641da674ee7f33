use super::*;
use crate::region::Region;

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn jet_product_and_quotient_rules() {
    // f = x^2 y / (x^2 + y^2) at (1, 2): analytic values below.
    let f = |x: Jet2, y: Jet2| (x.powi(2) * y) / (x.powi(2) + y.powi(2));
    let j = f(Jet2::x(1.0), Jet2::y(2.0));
    assert!(close(j.val, 0.4, 1e-15));
    // fx = 2xy^3 / r^4 = 16/25, fy = x^2 (x^2 - y^2) / r^4 = -3/25
    assert!(close(j.dx, 16.0 / 25.0, 1e-14));
    assert!(close(j.dy, -3.0 / 25.0, 1e-14));
}

#[test]
fn jet_hessian_matches_closed_form() {
    // f = exp(x y): fxx = y^2 e, fxy = (1 + x y) e, fyy = x^2 e
    let field = JetField::new(|x, y| (x * y).exp());
    let (x, y) = (0.5f64, -0.5f64);
    let e = (x * y).exp();
    let fxx = field.second_partial(Var::X, Var::X, x, y).unwrap();
    let fxy = field.second_partial(Var::X, Var::Y, x, y).unwrap();
    let fyx = field.second_partial(Var::Y, Var::X, x, y).unwrap();
    let fyy = field.second_partial(Var::Y, Var::Y, x, y).unwrap();
    assert!(close(fxx, y * y * e, 1e-14));
    assert!(close(fxy, (1.0 + x * y) * e, 1e-14));
    assert_eq!(fxy, fyx);
    assert!(close(fyy, x * x * e, 1e-14));
}

#[test]
fn jet_unary_rules() {
    let x = Jet2::x(0.3);
    let s = x.sin();
    assert!(close(s.dx, 0.3f64.cos(), 1e-15));
    assert!(close(s.dxx, -0.3f64.sin(), 1e-15));
    let c = x.cos();
    assert!(close(c.dx, -0.3f64.sin(), 1e-15));
    let l = x.ln();
    assert!(close(l.dx, 1.0 / 0.3, 1e-12));
    assert!(close(l.dxx, -1.0 / 0.09, 1e-10));
    let r = x.sqrt();
    assert!(close(r.dx, 0.5 / 0.3f64.sqrt(), 1e-14));
    assert_eq!(x.powi(0), Jet2::constant(1.0));
    assert_eq!(x.powi(1), x);
}

#[test]
fn domain_failures_are_errors_not_nan() {
    let log_r = JetField::new(|x, y| (x.powi(2) + y.powi(2)).ln());
    assert_eq!(log_r.value(0.0, 0.0), Err(DomainError));
    assert_eq!(log_r.partial(Var::X, 0.0, 0.0), Err(DomainError));
    assert!(log_r.value(1.0, 0.0).is_ok());

    // ln of a negative argument has a finite formal derivative; it must still fail.
    let ln_x = JetField::new(|x, _| x.ln());
    assert_eq!(ln_x.partial(Var::X, -1.0, 0.0), Err(DomainError));

    let pole = JetField::new(|x, y| (x.powi(2) + y.powi(2) - 1.0).recip());
    assert_eq!(pole.value(1.0, 0.0), Err(DomainError));
}

#[test]
fn finite_diff_tracks_analytic_partials() {
    let fd = FiniteDiff::new(|x: f64, y: f64| x.sin() * y.cos());
    let (x, y) = (0.7f64, -1.3f64);
    let gx = fd.partial(Var::X, x, y).unwrap();
    let gy = fd.partial(Var::Y, x, y).unwrap();
    assert!(close(gx, x.cos() * y.cos(), 1e-8));
    assert!(close(gy, -x.sin() * y.sin(), 1e-8));
    let hxx = fd.second_partial(Var::X, Var::X, x, y).unwrap();
    let hxy = fd.second_partial(Var::X, Var::Y, x, y).unwrap();
    assert!(close(hxx, -x.sin() * y.cos(), 1e-5));
    assert!(close(hxy, -x.cos() * y.sin(), 1e-5));
}

#[test]
fn finite_diff_reports_domain_failure_in_stencil() {
    let fd = FiniteDiff::new(|x: f64, _y: f64| x.sqrt());
    assert!(fd.value(0.0, 0.0).is_ok());
    // Left stencil point is negative.
    assert_eq!(fd.partial(Var::X, 0.0, 0.0), Err(DomainError));
}

#[test]
fn gradient_default_combines_partials() {
    let field = JetField::new(|x, y| x.powi(2) + y.powi(2));
    let g = field.gradient(1.0, 1.0).unwrap();
    assert_eq!(g, nalgebra::Vector2::new(2.0, 2.0));
    // Through a reference and a box as well.
    let boxed: Box<dyn ScalarField> = Box::new(field);
    assert_eq!((&boxed).gradient(1.0, 1.0).unwrap(), g);
}

#[test]
fn catalog_resolves_whitespace_insensitively() {
    let cat = Catalog;
    let e = cat.lookup(&Expression::from("x^2+y^2")).expect("paraboloid");
    assert_eq!(e.expr, "x^2 + y^2");
    assert_eq!(e.focus, Focus::Gradient);
    assert!(cat.lookup(&Expression::from("x^3")).is_none());
    let f = cat.compile(&Expression::from(" x  +  y ")).expect("plane");
    assert_eq!(f.value(1.0, 2.0), Ok(3.0));
    assert_eq!(f.partial(Var::Y, 1.0, 2.0), Ok(1.0));
}

#[test]
fn catalog_entries_have_valid_regions_and_points() {
    let cat = Catalog;
    assert!(cat.with_focus(Focus::Limit).count() >= 3);
    for e in cat.entries() {
        let r = e.region;
        assert!(Region::new(r.xmin(), r.xmax(), r.ymin(), r.ymax()).is_ok(), "{}", e.label);
        if let Some((x, y)) = e.point {
            assert!(r.contains(x, y), "{}", e.label);
        }
    }
}
