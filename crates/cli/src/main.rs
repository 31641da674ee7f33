use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use mvcalc::api::{
    estimate_limit, estimate_range, gradient_field, integrate, point_report, sample_grid,
    solve_lagrange_with, Catalog, Expression, IntegrationRegion, NewtonCfg, Region,
};
use mvcalc::field::CatalogEntry;
use mvcalc::Vec2;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod render;
mod table;

use provenance::{current_git_rev, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Sample, differentiate, integrate and optimize built-in scalar fields")]
struct Cmd {
    /// Optional run tag; propagated to outputs and logs
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

/// Rectangle overrides; unset bounds fall back to the catalog entry's region.
#[derive(Args, Debug, Clone, Copy, Default)]
struct Bounds {
    #[arg(long, allow_negative_numbers = true)]
    xmin: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    xmax: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    ymin: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    ymax: Option<f64>,
}

impl Bounds {
    fn resolve(&self, fallback: &Region) -> Result<Region> {
        Region::new(
            self.xmin.unwrap_or(fallback.xmin()),
            self.xmax.unwrap_or(fallback.xmax()),
            self.ymin.unwrap_or(fallback.ymin()),
            self.ymax.unwrap_or(fallback.ymax()),
        )
        .context("invalid region")
    }
}

#[derive(Subcommand)]
enum Action {
    /// Sample a field on a lattice and write it as a table (.parquet or .csv)
    Grid {
        #[arg(long)]
        expr: String,
        #[command(flatten)]
        bounds: Bounds,
        #[arg(long, default_value_t = 50)]
        resolution: usize,
        #[arg(long)]
        out: PathBuf,
        /// Also write the gradient overlay segments here
        #[arg(long)]
        gradient_out: Option<PathBuf>,
    },
    /// Value and gradient at one point
    Point {
        #[arg(long)]
        expr: String,
        #[arg(long, allow_negative_numbers = true)]
        x: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        y: Option<f64>,
    },
    /// Multi-path limit estimate near a point
    Limit {
        #[arg(long)]
        expr: String,
        #[arg(long, allow_negative_numbers = true)]
        x: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        y: Option<f64>,
        #[arg(long, default_value_t = 0.1)]
        epsilon: f64,
    },
    /// Composite Simpson integral over a rectangle
    Integrate {
        #[arg(long)]
        expr: String,
        #[command(flatten)]
        bounds: Bounds,
        #[arg(long, default_value_t = 100)]
        subdivisions: usize,
    },
    /// Stationary point of an objective subject to constraint = 0
    Lagrange {
        #[arg(long)]
        objective: String,
        #[arg(long)]
        constraint: String,
        #[arg(long, allow_negative_numbers = true)]
        x0: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        y0: Option<f64>,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        lambda0: f64,
        #[arg(long, default_value_t = 30)]
        max_iter: usize,
        /// Stall on a singular Jacobian instead of taking a least-squares step
        #[arg(long)]
        strict: bool,
    },
    /// List the built-in fields
    Examples,
    /// Print a small provenance JSON block
    Report,
}

/// Logs go to stderr; stdout carries only the JSON document of each command.
fn init_logging() {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cmd = Cmd::parse();
    let tag = cmd.tag;
    let doc = match cmd.action {
        Action::Grid {
            expr,
            bounds,
            resolution,
            out,
            gradient_out,
        } => grid(expr, bounds, resolution, out, gradient_out, tag),
        Action::Point { expr, x, y } => point(expr, x, y, tag),
        Action::Limit { expr, x, y, epsilon } => limit(expr, x, y, epsilon, tag),
        Action::Integrate {
            expr,
            bounds,
            subdivisions,
        } => integral(expr, bounds, subdivisions, tag),
        Action::Lagrange {
            objective,
            constraint,
            x0,
            y0,
            lambda0,
            max_iter,
            strict,
        } => {
            let cfg = NewtonCfg {
                max_iter,
                least_squares_fallback: !strict,
                ..NewtonCfg::default()
            };
            lagrange(objective, constraint, (x0, y0), lambda0, cfg, tag)
        }
        Action::Examples => examples(),
        Action::Report => report(tag),
    }?;
    println!("{doc}");
    Ok(())
}

fn lookup(expr: &str) -> Result<&'static CatalogEntry> {
    match Catalog.lookup(&Expression::from(expr)) {
        Some(entry) => Ok(entry),
        None => bail!("no built-in field matches `{expr}`; run `cli examples` for the list"),
    }
}

/// Explicit coordinates win; otherwise use the entry's point of interest.
fn point_or_default(entry: &CatalogEntry, x: Option<f64>, y: Option<f64>) -> Result<Vec2<f64>> {
    match (x, y, entry.point) {
        (Some(x), Some(y), _) => Ok(Vec2::new(x, y)),
        (x, y, Some((px, py))) => Ok(Vec2::new(x.unwrap_or(px), y.unwrap_or(py))),
        _ => bail!("`{}` has no default point; pass --x and --y", entry.expr),
    }
}

fn to_json<T: Serialize>(doc: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

fn grid(
    expr: String,
    bounds: Bounds,
    resolution: usize,
    out: PathBuf,
    gradient_out: Option<PathBuf>,
    tag: Option<String>,
) -> Result<String> {
    let entry = lookup(&expr)?;
    let region = bounds.resolve(&entry.region)?;
    tracing::info!(expr, resolution, region = %region, tag = ?tag, "grid");

    let grid = sample_grid(&entry.field, &region, resolution);
    let summary = estimate_range(&grid);
    tracing::info!(n = grid.n(), summary = %summary, "sampled");
    if summary.valid < summary.total {
        tracing::warn!(
            undefined = summary.total - summary.valid,
            "field undefined at some lattice points"
        );
    }

    let mut df = table::grid_frame(&grid)?;
    table::write_frame(&mut df, &out)?;

    let mut payload = Payload::new(serde_json::json!({
        "expr": entry.expr,
        "region": render::RegionView::from(&region),
        "resolution": grid.n(),
        "summary": render::RangeView::from(&summary),
    }))
    .tagged(tag);
    if let Some(path) = gradient_out {
        let segments = gradient_field(&entry.field, &region, resolution);
        let mut seg_df = table::segment_frame(&segments)?;
        table::write_frame(&mut seg_df, &path)?;
        payload = payload.with_output(path);
    }
    let prov = write_sidecar(&out, payload)?;
    tracing::info!(provenance = %prov.display(), "done");
    to_json(&render::RangeView::from(&summary))
}

fn point(expr: String, x: Option<f64>, y: Option<f64>, tag: Option<String>) -> Result<String> {
    let entry = lookup(&expr)?;
    let p = point_or_default(entry, x, y)?;
    tracing::info!(expr, x = p.x, y = p.y, tag = ?tag, "point");
    to_json(&render::PointView::from(&point_report(&entry.field, p.x, p.y)))
}

fn limit(
    expr: String,
    x: Option<f64>,
    y: Option<f64>,
    epsilon: f64,
    tag: Option<String>,
) -> Result<String> {
    let entry = lookup(&expr)?;
    let target = point_or_default(entry, x, y)?;
    tracing::info!(expr, x = target.x, y = target.y, epsilon, tag = ?tag, "limit");
    let est = estimate_limit(&entry.field, target, epsilon).context("invalid limit request")?;
    to_json(&render::LimitView::from(&est))
}

fn integral(
    expr: String,
    bounds: Bounds,
    subdivisions: usize,
    tag: Option<String>,
) -> Result<String> {
    let entry = lookup(&expr)?;
    let region = bounds.resolve(&entry.region)?;
    let rect = IntegrationRegion::over(&region, subdivisions);
    tracing::info!(expr, region = %region, n = rect.subdivisions(), tag = ?tag, "integrate");
    let value = integrate(&entry.field, &rect);
    to_json(&render::IntegralView::new(&value, rect.subdivisions()))
}

fn lagrange(
    objective: String,
    constraint: String,
    start: (Option<f64>, Option<f64>),
    lambda0: f64,
    cfg: NewtonCfg,
    tag: Option<String>,
) -> Result<String> {
    let f = lookup(&objective)?;
    let g = lookup(&constraint)?;
    let start = point_or_default(f, start.0, start.1)?;
    tracing::info!(objective, constraint, x0 = start.x, y0 = start.y, lambda0, tag = ?tag, "lagrange");
    let res = solve_lagrange_with(&cfg, &f.field, &g.field, start, lambda0);
    if !res.success {
        tracing::warn!(termination = %res.termination, "solver did not reach the success tolerance");
    }
    to_json(&render::OptimizationView::from(&res))
}

fn examples() -> Result<String> {
    let entries: Vec<render::EntryView> = Catalog
        .entries()
        .iter()
        .map(render::EntryView::from)
        .collect();
    to_json(&entries)
}

fn report(tag: Option<String>) -> Result<String> {
    let obj = serde_json::json!({
        "code_rev": current_git_rev(),
        "kernel_version": mvcalc::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    to_json(&obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{LazyCsvReader, LazyFileListReader};
    use serde_json::Value;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_negative_bounds_and_global_tag() {
        let cmd = Cmd::try_parse_from([
            "cli", "grid", "--expr", "x*y", "--xmin", "-2", "--xmax", "3", "--out", "g.csv",
            "--tag", "demo",
        ])
        .unwrap();
        assert_eq!(cmd.tag.as_deref(), Some("demo"));
        let Action::Grid { bounds, resolution, .. } = cmd.action else {
            panic!("expected grid");
        };
        assert_eq!(bounds.xmin, Some(-2.0));
        assert_eq!(bounds.ymin, None);
        assert_eq!(resolution, 50);
    }

    #[test]
    fn bounds_fall_back_to_entry_region() {
        let entry = lookup("x * y").unwrap();
        let bounds = Bounds {
            xmax: Some(1.0),
            ..Bounds::default()
        };
        let r = bounds.resolve(&entry.region).unwrap();
        assert_eq!((r.xmin(), r.xmax(), r.ymin(), r.ymax()), (-4.0, 1.0, -4.0, 4.0));
        let bad = Bounds {
            xmin: Some(5.0),
            ..Bounds::default()
        };
        assert!(bad.resolve(&entry.region).is_err());
    }

    #[test]
    fn command_output_is_a_single_json_document() {
        let docs = [
            limit("(x*y)/(x^2+y^2)".into(), None, None, 0.1, None).unwrap(),
            point("x*y".into(), None, None, Some("t".into())).unwrap(),
            integral("x^2 + y^2".into(), Bounds::default(), 10, None).unwrap(),
            lagrange(
                "x + y".into(),
                "x^2 + y^2 - 1".into(),
                (None, None),
                0.0,
                NewtonCfg::default(),
                None,
            )
            .unwrap(),
            examples().unwrap(),
            report(None).unwrap(),
        ];
        for doc in &docs {
            serde_json::from_str::<Value>(doc).unwrap();
        }
        let lim: Value = serde_json::from_str(&docs[0]).unwrap();
        assert_eq!(lim["trials"].as_array().unwrap().len(), 4);
        let opt: Value = serde_json::from_str(&docs[3]).unwrap();
        assert_eq!(opt["success"], true);
    }

    #[test]
    fn grid_writes_table_segments_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("runs").join("surface.csv");
        let arrows = dir.path().join("runs").join("arrows.parquet");
        let doc = grid(
            "log(x^2 + y^2)".into(),
            Bounds {
                xmin: Some(-1.0),
                xmax: Some(1.0),
                ymin: Some(-1.0),
                ymax: Some(1.0),
            },
            11,
            out.clone(),
            Some(arrows.clone()),
            Some("e2e".into()),
        )
        .unwrap();
        let summary: Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(summary["total"], 121);
        assert_eq!(summary["valid"], 120);

        let table = LazyCsvReader::new(&out)
            .with_infer_schema_length(Some(200))
            .finish()
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(table.shape(), (121, 3));
        assert!(arrows.exists());

        let sidecar = dir.path().join("runs").join("surface.provenance.json");
        let prov: Value = serde_json::from_slice(&fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(prov["tag"], "e2e");
        assert_eq!(prov["params"]["resolution"], 11);
        assert_eq!(prov["outputs"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn unknown_expression_is_an_error() {
        assert!(lookup("tan(x)").is_err());
    }

    #[test]
    fn default_points_come_from_the_catalog() {
        let entry = lookup("x*y").unwrap();
        assert_eq!(point_or_default(entry, None, None).unwrap(), Vec2::new(2.0, -1.0));
        assert_eq!(point_or_default(entry, Some(0.5), None).unwrap(), Vec2::new(0.5, -1.0));
        let no_point = lookup("x^2 - y^2").unwrap();
        assert!(point_or_default(no_point, None, None).is_err());
        assert!(point_or_default(no_point, Some(1.0), Some(1.0)).is_ok());
    }
}
