//! CSV transport for the worksheet and grid contracts, plus JSON report
//! export. The spreadsheet front-end proper lives outside this crate; here
//! the tables travel as plain cell matrices.

use crate::model::Worksheet;
use crate::solver::{Mark, Solution, SolveStatus};
use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads a raw cell table: headerless CSV, ragged rows allowed.
pub fn read_table<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Vec<String>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(&path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        out.push(rec.iter().map(str::to_string).collect());
    }
    Ok(out)
}

/// Writes the assignment grid as CSV, atomically (write-then-rename).
pub fn write_grid<P: AsRef<Path>>(path: P, grid: &[Vec<String>]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).context("creating temp file")?;
    {
        let mut w = WriterBuilder::new().flexible(true).from_writer(&mut tmp);
        for row in grid {
            w.write_record(row)?;
        }
        w.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).context("atomic rename")?;
    Ok(())
}

/// Reads a previously written grid back into marks, validating its shape
/// against the sheet.
pub fn read_grid<P: AsRef<Path>>(path: P, sheet: &Worksheet) -> anyhow::Result<Vec<Vec<Mark>>> {
    let rows = read_table(path)?;
    let header_rows = sheet.header.len();
    let expected = header_rows + sheet.people.len();
    if rows.len() != expected {
        bail!("grid has {} rows, expected {}", rows.len(), expected);
    }
    let width = sheet.current_count();
    rows[header_rows..]
        .iter()
        .enumerate()
        .map(|(p, row)| {
            if row.len() != width {
                bail!(
                    "grid row for {} has {} columns, expected {}",
                    sheet.people[p].name,
                    row.len(),
                    width
                );
            }
            Ok(row.iter().map(|cell| Mark::from_cell(cell)).collect())
        })
        .collect()
}

/// Machine-readable solve report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub status: SolveStatus,
    pub objective: i64,
    pub covered_count: i64,
    pub pref_sum: i64,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    pub fn new(solution: &Solution, generated_at: DateTime<Utc>) -> Self {
        Self {
            status: solution.status,
            objective: solution.objective,
            covered_count: solution.covered_count,
            pref_sum: solution.pref_sum,
            generated_at,
        }
    }
}

/// JSON export of the solve report (pretty-printed).
pub fn export_report_json<P: AsRef<Path>>(path: P, report: &Report) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(report)?;
    fs::write(path, s)?;
    Ok(())
}
