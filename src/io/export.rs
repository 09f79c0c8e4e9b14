//! Result export: raw matrix, row-oriented CSV or record-oriented JSON.
//!
//! The format is chosen by tag. An unknown tag is reported as
//! [`ComfortError::UnsupportedFormat`] before anything touches the disk.

use itertools::Itertools;
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use strum::{Display, EnumString};
use tracing::{info, warn};

use crate::error::{ComfortError, Result};
use crate::metrics::MetricsReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Whitespace-separated rows in scientific notation
    Matrix,
    /// Header of point indices, one row per timestep
    Csv,
    /// Array of per-timestep records keyed by point index
    Json,
}

impl ExportFormat {
    pub fn parse_tag(tag: &str) -> Result<Self> {
        Self::from_str(tag.trim()).map_err(|_| ComfortError::UnsupportedFormat(tag.to_string()))
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Matrix => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write a grid to `path` in the format named by `tag`.
pub fn export_grid(grid: &ArrayView2<'_, f64>, tag: &str, path: &Path) -> Result<()> {
    let format = match ExportFormat::parse_tag(tag) {
        Ok(format) => format,
        Err(e) => {
            warn!(tag, path = %path.display(), "unsupported export format, skipping");
            return Err(e);
        }
    };

    let mut writer = BufWriter::new(File::create(path)?);
    write_grid(grid, format, &mut writer)?;
    writer.flush()?;

    info!(%format, path = %path.display(), rows = grid.nrows(), "grid exported");
    Ok(())
}

pub fn write_grid<W: Write>(grid: &ArrayView2<'_, f64>, format: ExportFormat, writer: W) -> Result<()> {
    match format {
        ExportFormat::Matrix => write_matrix(grid, writer),
        ExportFormat::Csv => write_csv(grid, writer),
        ExportFormat::Json => write_records(grid, writer),
    }
}

/// Pretty JSON dump of a metrics report.
pub fn export_report(report: &MetricsReport, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    info!(path = %path.display(), "metrics report exported");
    Ok(())
}

fn write_matrix<W: Write>(grid: &ArrayView2<'_, f64>, mut writer: W) -> Result<()> {
    for row in grid.rows() {
        writeln!(writer, "{}", row.iter().map(|&v| scientific(v)).join(" "))?;
    }
    Ok(())
}

fn write_csv<W: Write>(grid: &ArrayView2<'_, f64>, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record((0..grid.ncols()).map(|p| p.to_string()))?;
    for row in grid.rows() {
        wtr.serialize(row.to_vec())?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_records<W: Write>(grid: &ArrayView2<'_, f64>, writer: W) -> Result<()> {
    let records: Vec<Map<String, Value>> = grid
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(p, &v)| (p.to_string(), Value::from(v)))
                .collect()
        })
        .collect();
    serde_json::to_writer(writer, &records)?;
    Ok(())
}

/// `%.18e` as printed by C: signed, at least two exponent digits.
fn scientific(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{v:.18e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => formatted,
    }
}
