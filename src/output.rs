//! Output formatting for analysis results (CSV report, summary CSV, JSON, console).

use crate::models::{AnalysisParams, AnalysisResult, ReportRow, SummaryRow};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write report rows as CSV with header
/// `Verse,Book,Count,PersonID,PersonName,ZhName,File`.
pub fn write_report_csv<W: Write>(rows: &[ReportRow], writer: W) -> Result<(), OutputError> {
    write_rows(rows, writer)
}

pub fn write_report_csv_file(rows: &[ReportRow], path: &Path) -> Result<(), OutputError> {
    let file = std::fs::File::create(path)?;
    write_report_csv(rows, file)
}

/// Write summary rows as CSV with header `PersonID,PersonName,File,Count`.
pub fn write_summary_csv<W: Write>(rows: &[SummaryRow], writer: W) -> Result<(), OutputError> {
    write_rows(rows, writer)
}

pub fn write_summary_csv_file(rows: &[SummaryRow], path: &Path) -> Result<(), OutputError> {
    let file = std::fs::File::create(path)?;
    write_summary_csv(rows, file)
}

fn write_rows<T: serde::Serialize, W: Write>(rows: &[T], writer: W) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Path of the companion summary file: `results.csv` → `results_summary.csv`.
pub fn summary_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!("{}_summary.{}", stem, ext.to_string_lossy()),
        None => format!("{}_summary", stem),
    };
    output.with_file_name(name)
}

/// Write the full analysis result as JSON.
pub fn write_json<W: Write>(result: &AnalysisResult, writer: &mut W) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(result)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write the full analysis result as JSON to a file.
pub fn write_json_file(result: &AnalysisResult, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_json(result, &mut file)
}

/// Files written by [`write_outputs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub report: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Write the report CSV, the summary CSV (if enabled) and the optional JSON dump.
///
/// CSVs are skipped when there are no report rows. The JSON dump is written
/// last, so a JSON failure leaves the CSVs in place.
pub fn write_outputs(
    result: &AnalysisResult,
    params: &AnalysisParams,
    json: Option<&Path>,
) -> Result<WrittenOutputs, OutputError> {
    let mut written = WrittenOutputs::default();

    if !result.rows.is_empty() {
        write_report_csv_file(&result.rows, &params.output_path)?;
        written.report = Some(params.output_path.clone());

        if params.write_summary {
            let summary_file = summary_path(&params.output_path);
            write_summary_csv_file(&result.person_summary, &summary_file)?;
            written.summary = Some(summary_file);
        }
    }

    if let Some(path) = json {
        write_json_file(result, path)?;
        written.json = Some(path.to_path_buf());
    }

    Ok(written)
}

/// Write a summary report to stdout.
pub fn print_summary(result: &AnalysisResult) {
    println!("\n=== Analysis Summary ===");
    println!("Version: {}", result.version);
    println!("Language: {}", result.language);
    println!();
    println!("Files:");
    println!("  Scanned: {}", result.summary.files_scanned);
    println!("  Failed: {}", result.summary.files_failed);
    println!();
    println!("Citations:");
    println!("  Total: {}", result.summary.total_citations);
    println!("  Unique: {}", result.summary.unique_citations);
    println!("  Matched to persons: {}", result.summary.matched_citations);
    println!();
    println!("Results:");
    println!("  Report rows: {}", result.summary.report_rows);
    println!("  Summary rows: {}", result.summary.summary_rows);

    for failed in &result.failed_files {
        println!("  Failed: {} ({})", failed.file, failed.error);
    }
}

/// Format a report row as a human-readable line.
pub fn format_row(row: &ReportRow) -> String {
    let name = if row.localized_name.is_empty() {
        row.person_name.clone()
    } else {
        format!("{} / {}", row.person_name, row.localized_name)
    };
    format!(
        "{:<16} x{:<3} {} [{}] in {}",
        row.citation, row.count, name, row.person_id, row.source_file
    )
}

/// Print report rows in a human-readable format.
pub fn print_rows(rows: &[ReportRow], limit: Option<usize>) {
    let to_print = match limit {
        Some(n) => &rows[..n.min(rows.len())],
        None => rows,
    };

    for row in to_print {
        println!("{}", format_row(row));
    }

    if let Some(n) = limit {
        if rows.len() > n {
            println!("... and {} more rows", rows.len() - n);
        }
    }
}
