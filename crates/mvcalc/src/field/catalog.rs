//! Built-in named fields with suggested regions and focus points.
//!
//! The catalog doubles as a tiny `FieldCompiler`: an expression resolves when
//! it matches an entry's text up to whitespace. Anything richer belongs to an
//! external expression engine.

use std::fmt;

use super::{Expression, FieldCompiler, Jet2, JetField, ScalarField};
use crate::region::Region;

/// What an entry is meant to demonstrate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Focus {
    Surface,
    Domain,
    Gradient,
    Limit,
    Objective,
    Constraint,
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Focus::Surface => "surface",
            Focus::Domain => "domain",
            Focus::Gradient => "gradient",
            Focus::Limit => "limit",
            Focus::Objective => "objective",
            Focus::Constraint => "constraint",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CatalogEntry {
    pub label: &'static str,
    pub expr: &'static str,
    pub region: Region,
    /// Point of interest (limit target, gradient probe, solver start).
    pub point: Option<(f64, f64)>,
    pub focus: Focus,
    pub field: JetField,
}

fn sq(t: Jet2) -> Jet2 {
    t.powi(2)
}

fn sin_x_cos_y(x: Jet2, y: Jet2) -> Jet2 {
    x.sin() * y.cos()
}
fn gaussian(x: Jet2, y: Jet2) -> Jet2 {
    (-(sq(x) + sq(y))).exp()
}
fn paraboloid(x: Jet2, y: Jet2) -> Jet2 {
    sq(x) + sq(y)
}
fn saddle(x: Jet2, y: Jet2) -> Jet2 {
    sq(x) - sq(y)
}
fn log_radius(x: Jet2, y: Jet2) -> Jet2 {
    (sq(x) + sq(y)).ln()
}
fn unit_circle_pole(x: Jet2, y: Jet2) -> Jet2 {
    (sq(x) + sq(y) - 1.0).recip()
}
fn radius(x: Jet2, y: Jet2) -> Jet2 {
    (sq(x) + sq(y)).sqrt()
}
fn x2y_over_r2(x: Jet2, y: Jet2) -> Jet2 {
    (sq(x) * y) / (sq(x) + sq(y))
}
fn xy_over_r2(x: Jet2, y: Jet2) -> Jet2 {
    (x * y) / (sq(x) + sq(y))
}
fn diff_over_r2(x: Jet2, y: Jet2) -> Jet2 {
    (sq(x) - sq(y)) / (sq(x) + sq(y))
}
fn product(x: Jet2, y: Jet2) -> Jet2 {
    x * y
}
fn sin_x_plus_cos_y(x: Jet2, y: Jet2) -> Jet2 {
    x.sin() + y.cos()
}
fn exp_product(x: Jet2, y: Jet2) -> Jet2 {
    (x * y).exp()
}
fn plane_sum(x: Jet2, y: Jet2) -> Jet2 {
    x + y
}
fn unit_circle(x: Jet2, y: Jet2) -> Jet2 {
    sq(x) + sq(y) - 1.0
}

const fn entry(
    label: &'static str,
    expr: &'static str,
    lo: f64,
    hi: f64,
    point: Option<(f64, f64)>,
    focus: Focus,
    f: fn(Jet2, Jet2) -> Jet2,
) -> CatalogEntry {
    CatalogEntry {
        label,
        expr,
        region: Region::from_bounds(lo, hi, lo, hi),
        point,
        focus,
        field: JetField::new(f),
    }
}

const ORIGIN: Option<(f64, f64)> = Some((0.0, 0.0));

static ENTRIES: &[CatalogEntry] = &[
    entry("sin(x)*cos(y)", "sin(x)*cos(y)", -5.0, 5.0, None, Focus::Surface, sin_x_cos_y),
    entry("exp(-(x^2+y^2))", "exp(-(x^2 + y^2))", -4.0, 4.0, None, Focus::Surface, gaussian),
    entry("x^2 - y^2", "x^2 - y^2", -4.0, 4.0, None, Focus::Surface, saddle),
    entry("x^2 + y^2 (∇f=(2x,2y))", "x^2 + y^2", -4.0, 4.0, Some((1.0, 1.0)), Focus::Gradient, paraboloid),
    entry("x*y (∇f=(y,x))", "x*y", -4.0, 4.0, Some((2.0, -1.0)), Focus::Gradient, product),
    entry("sin(x)+cos(y)", "sin(x) + cos(y)", -6.0, 6.0, ORIGIN, Focus::Gradient, sin_x_plus_cos_y),
    entry("exp(x*y)", "exp(x*y)", -3.0, 3.0, Some((0.5, -0.5)), Focus::Gradient, exp_product),
    entry("log(x^2 + y^2)", "log(x^2 + y^2)", -4.0, 4.0, None, Focus::Domain, log_radius),
    entry("1 / (x^2 + y^2 - 1)", "1 / (x^2 + y^2 - 1)", -3.0, 3.0, None, Focus::Domain, unit_circle_pole),
    entry("sqrt(x^2 + y^2)", "sqrt(x^2 + y^2)", -4.0, 4.0, None, Focus::Domain, radius),
    entry("(x^2*y)/(x^2+y^2) at (0,0)", "(x^2*y)/(x^2 + y^2)", -2.0, 2.0, ORIGIN, Focus::Limit, x2y_over_r2),
    entry("(x*y)/(x^2+y^2) at (0,0)", "(x*y)/(x^2 + y^2)", -2.0, 2.0, ORIGIN, Focus::Limit, xy_over_r2),
    entry("(x^2 - y^2)/(x^2 + y^2) at (0,0)", "(x^2 - y^2)/(x^2 + y^2)", -2.0, 2.0, ORIGIN, Focus::Limit, diff_over_r2),
    entry("x + y (objective)", "x + y", -2.0, 2.0, Some((1.0, 1.0)), Focus::Objective, plane_sum),
    entry("x^2 + y^2 - 1 (unit circle)", "x^2 + y^2 - 1", -2.0, 2.0, None, Focus::Constraint, unit_circle),
];

/// The built-in example catalog.
#[derive(Clone, Copy, Debug, Default)]
pub struct Catalog;

impl Catalog {
    pub fn entries(&self) -> &'static [CatalogEntry] {
        ENTRIES
    }

    /// First entry whose expression matches `expr` up to whitespace.
    pub fn lookup(&self, expr: &Expression) -> Option<&'static CatalogEntry> {
        let key = expr.key();
        ENTRIES
            .iter()
            .find(|e| Expression::from(e.expr).key() == key)
    }

    pub fn with_focus(&self, focus: Focus) -> impl Iterator<Item = &'static CatalogEntry> {
        ENTRIES.iter().filter(move |e| e.focus == focus)
    }
}

impl FieldCompiler for Catalog {
    fn compile(&self, expr: &Expression) -> Option<Box<dyn ScalarField>> {
        self.lookup(expr)
            .map(|e| Box::new(e.field) as Box<dyn ScalarField>)
    }
}
