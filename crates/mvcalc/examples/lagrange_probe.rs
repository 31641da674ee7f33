//! Timing probe for the Lagrange–Newton solve and Simpson quadrature.
//!
//! Purpose
//! - Give a reproducible data point for "how many Newton steps and how many
//!   microseconds does a circle-constrained solve take?"
//! - Show the two-tier outcome (stop reason vs. post-hoc success) side by
//!   side for the strict and least-squares policies.
//!
//! Run with `cargo run -p mvcalc --example lagrange_probe`.

use std::time::Instant;

use mvcalc::prelude::*;

fn main() {
    let f = Catalog
        .compile(&Expression::from("x + y"))
        .expect("objective in catalog");
    let g = Catalog
        .compile(&Expression::from("x^2 + y^2 - 1"))
        .expect("constraint in catalog");

    for (label, cfg) in [
        ("least_squares", NewtonCfg::default()),
        (
            "strict",
            NewtonCfg {
                least_squares_fallback: false,
                ..NewtonCfg::default()
            },
        ),
    ] {
        let start = Instant::now();
        let res = solve_lagrange_with(&cfg, f.as_ref(), g.as_ref(), Vec2::new(1.0, 1.0), 0.0);
        let elapsed_us = start.elapsed().as_secs_f64() * 1e6;
        println!(
            "policy={label} termination={} success={} iterations={} x={:.9} y={:.9} lambda={:.9}",
            res.termination, res.success, res.iterations, res.x, res.y, res.lambda
        );
        println!("policy={label} solve_time_us={elapsed_us:.1}");
    }

    let gaussian = Catalog
        .compile(&Expression::from("exp(-(x^2+y^2))"))
        .expect("gaussian in catalog");
    for n in [10, 50, 200] {
        let rect = IntegrationRegion::new(-3.0, 3.0, -3.0, 3.0, n).expect("rectangle");
        let start = Instant::now();
        let v = integrate(gaussian.as_ref(), &rect);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
        println!("simpson n={n} integral={v} time_ms={elapsed_ms:.3}");
    }
}
