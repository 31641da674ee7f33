//! Tabular exports of sampled grids and gradient overlays.
//!
//! Grids are written long-form, one row per lattice point in row-major
//! order, with `z` null where the field is undefined. The format follows the
//! file extension: `.parquet` or `.csv`.

use anyhow::{bail, Context, Result};
use mvcalc::gradient::GradientSegment;
use mvcalc::grid::Grid;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

pub fn grid_frame(grid: &Grid) -> PolarsResult<DataFrame> {
    let total = grid.total();
    let mut xs = Vec::with_capacity(total);
    let mut ys = Vec::with_capacity(total);
    let mut zs = Vec::with_capacity(total);
    for (x, y, z) in grid.points() {
        xs.push(x);
        ys.push(y);
        zs.push(z);
    }
    df!("x" => xs, "y" => ys, "z" => zs)
}

pub fn segment_frame(segments: &[GradientSegment]) -> PolarsResult<DataFrame> {
    let x0: Vec<f64> = segments.iter().map(|s| s.start.x).collect();
    let y0: Vec<f64> = segments.iter().map(|s| s.start.y).collect();
    let x1: Vec<f64> = segments.iter().map(|s| s.end.x).collect();
    let y1: Vec<f64> = segments.iter().map(|s| s.end.y).collect();
    df!("x0" => x0, "y0" => y0, "x1" => x1, "y1" => y1)
}

enum Format {
    Parquet,
    Csv,
}

fn format_for(path: &Path) -> Result<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => Ok(Format::Parquet),
        Some("csv") => Ok(Format::Csv),
        other => bail!(
            "unsupported output extension {:?} for {} (expected .parquet or .csv)",
            other.unwrap_or(""),
            path.display()
        ),
    }
}

/// Write `df` to `path`, creating parent directories as needed.
pub fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    let format = format_for(path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match format {
        Format::Parquet => {
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("writing parquet {}", path.display()))?;
        }
        Format::Csv => {
            CsvWriter::new(file)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("writing csv {}", path.display()))?;
        }
    }
    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        cols = df.width(),
        "wrote table"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvcalc::field::JetField;
    use mvcalc::gradient::gradient_field;
    use mvcalc::grid::sample_grid;
    use mvcalc::Region;
    use tempfile::tempdir;

    fn log_radius_grid() -> Grid {
        let field = JetField::new(|x, y| (x.powi(2) + y.powi(2)).ln());
        // n = 11 on [-1, 1] hits the origin exactly once.
        sample_grid(&field, &Region::centered(1.0).unwrap(), 11)
    }

    #[test]
    fn grid_frame_is_long_form_with_nulls() {
        let grid = log_radius_grid();
        let df = grid_frame(&grid).unwrap();
        assert_eq!(df.shape(), (121, 3));
        assert_eq!(df.column("z").unwrap().null_count(), 1);
        assert_eq!(df.column("x").unwrap().null_count(), 0);
    }

    #[test]
    fn csv_round_trip_keeps_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("grid.csv");
        let mut df = grid_frame(&log_radius_grid()).unwrap();
        write_frame(&mut df, &path).unwrap();
        let back = LazyCsvReader::new(&path)
            .with_infer_schema_length(Some(200))
            .finish()
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(back.shape(), (121, 3));
        assert_eq!(back.column("z").unwrap().null_count(), 1);
    }

    #[test]
    fn parquet_segments_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("arrows.parquet");
        let field = JetField::new(|x, y| x * y);
        let segs = gradient_field(&field, &Region::centered(2.0).unwrap(), 30);
        let mut df = segment_frame(&segs).unwrap();
        write_frame(&mut df, &path).unwrap();
        let back = ParquetReader::new(File::open(&path).unwrap())
            .finish()
            .unwrap();
        assert_eq!(back.height(), segs.len());
        assert_eq!(back.width(), 4);
    }

    #[test]
    fn unknown_extension_is_rejected_before_writing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.xlsx");
        let mut df = grid_frame(&log_radius_grid()).unwrap();
        assert!(write_frame(&mut df, &path).is_err());
        assert!(!path.exists());
    }
}
