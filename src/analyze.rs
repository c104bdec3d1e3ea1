//! Corpus analysis orchestration.
//!
//! This module coordinates the full pipeline: article discovery, citation
//! extraction, counting, joining against the person index, and aggregation.
//! Files are independent; with `parallel` enabled they are extracted on the
//! rayon pool and merged back in path order.

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::count::count_citations;
use crate::extract::{CitationExtractor, ExtractError};
use crate::index::{load_person_index, IndexError, PersonIndex};
use crate::models::*;
use crate::report::{join_counts, ReportBuilder};
use crate::scan::discover_articles;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Article directory not found: {0}")]
    MissingInputDir(PathBuf),
    #[error("Reference table error: {0}")]
    Index(#[from] IndexError),
}

/// Outcome of processing one article
enum FileOutcome {
    Done {
        counts: FileCitationCounts,
        rows: Vec<ReportRow>,
    },
    Failed(FailedFile),
}

/// Run the full pipeline: load the reference table, then analyze the article directory.
pub fn analyze_corpus(
    params: &AnalysisParams,
    show_progress: bool,
) -> Result<AnalysisResult, AnalyzeError> {
    // Checked before the reference table is loaded
    ensure_article_dir(&params.article_dir)?;
    let index = load_person_index(&params.reference_path)?;
    Ok(analyze_dir(params, &index, show_progress))
}

/// Analyze the article directory against an already-loaded person index.
pub fn analyze_with_index(
    params: &AnalysisParams,
    index: &PersonIndex,
    show_progress: bool,
) -> Result<AnalysisResult, AnalyzeError> {
    ensure_article_dir(&params.article_dir)?;
    Ok(analyze_dir(params, index, show_progress))
}

/// Discover and analyze articles; the directory must already exist.
fn analyze_dir(params: &AnalysisParams, index: &PersonIndex, show_progress: bool) -> AnalysisResult {
    let files = discover_articles(&params.article_dir, &params.extensions);
    info!(
        "Found {} article files in {}",
        files.len(),
        params.article_dir.display()
    );

    let extractor = CitationExtractor::new(params.language);
    analyze_files(&files, &extractor, index, params.parallel, show_progress)
}

fn ensure_article_dir(dir: &Path) -> Result<(), AnalyzeError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(AnalyzeError::MissingInputDir(dir.to_path_buf()))
    }
}

/// Analyze a list of files. Per-file failures are recorded and skipped.
pub fn analyze_files(
    files: &[PathBuf],
    extractor: &CitationExtractor,
    index: &PersonIndex,
    parallel: bool,
    show_progress: bool,
) -> AnalysisResult {
    let progress = if show_progress && !files.is_empty() {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let process = |path: &PathBuf| {
        let outcome = process_file(path, extractor, index);
        if let Some(ref pb) = progress {
            pb.inc(1);
        }
        outcome
    };

    // Both branches preserve input order
    let outcomes: Vec<FileOutcome> = if parallel {
        files.par_iter().map(process).collect()
    } else {
        files.iter().map(process).collect()
    };

    if let Some(pb) = progress {
        pb.finish_with_message("Done");
    }

    let mut builder = ReportBuilder::new();
    let mut file_counts = Vec::new();
    let mut failed_files = Vec::new();

    for outcome in outcomes {
        match outcome {
            FileOutcome::Done { counts, rows } => {
                builder.extend(rows);
                file_counts.push(counts);
            }
            FileOutcome::Failed(failed) => failed_files.push(failed),
        }
    }

    let person_summary = builder.summarize();
    let rows = builder.into_rows();

    let summary = AnalysisSummary {
        files_scanned: files.len(),
        files_failed: failed_files.len(),
        total_citations: file_counts.iter().map(|f| f.total_citations).sum(),
        unique_citations: {
            let mut all: Vec<&Citation> = file_counts.iter().flat_map(|f| f.counts.keys()).collect();
            all.sort_unstable();
            all.dedup();
            all.len()
        },
        matched_citations: file_counts
            .iter()
            .map(|f| f.counts.keys().filter(|c| !index.lookup(c).is_empty()).count())
            .sum(),
        report_rows: rows.len(),
        summary_rows: person_summary.len(),
    };

    info!(
        "Processed {} files ({} failed): {} citations, {} report rows",
        summary.files_scanned, summary.files_failed, summary.total_citations, summary.report_rows
    );

    AnalysisResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        language: extractor.language(),
        summary,
        file_counts,
        failed_files,
        rows,
        person_summary,
    }
}

fn process_file(path: &Path, extractor: &CitationExtractor, index: &PersonIndex) -> FileOutcome {
    let file = path.display().to_string();

    let citations = match extractor.extract_file(path) {
        Ok(c) => c,
        Err(ExtractError::Io(err)) => {
            warn!("Error processing file {}: {}", file, err);
            return FileOutcome::Failed(FailedFile {
                file,
                error: err.to_string(),
            });
        }
    };

    let counts = count_citations(&citations);
    let rows = join_counts(&file, &counts, index);
    debug!(
        "{}: {} citations ({} unique), {} report rows",
        file,
        citations.len(),
        counts.len(),
        rows.len()
    );

    FileOutcome::Done {
        counts: FileCitationCounts {
            file,
            total_citations: citations.len(),
            counts,
        },
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::person_index_from_csv;
    use std::fs;

    fn index() -> PersonIndex {
        person_index_from_csv(
            "PersonID,Name,ZhName,Verses\n1,Jesus,耶穌,John 3:16\n".as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_input_dir() {
        let params = AnalysisParams {
            article_dir: PathBuf::from("/nonexistent/articles"),
            ..Default::default()
        };
        let result = analyze_with_index(&params, &index(), false);
        assert!(matches!(result, Err(AnalyzeError::MissingInputDir(_))));
    }

    #[test]
    fn test_failed_file_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.html");
        fs::write(&good, "<p>約3:16 創1:1</p>").unwrap();
        let missing = dir.path().join("missing.html");

        let extractor = CitationExtractor::new(Language::Zh);
        let result = analyze_files(&[good, missing], &extractor, &index(), false, false);

        assert_eq!(result.summary.files_scanned, 2);
        assert_eq!(result.failed_files.len(), 1);
        assert!(result.failed_files[0].file.ends_with("missing.html"));
        assert_eq!(result.file_counts.len(), 1);
        assert_eq!(result.summary.total_citations, 2);
        assert_eq!(result.summary.unique_citations, 2);
        assert_eq!(result.summary.matched_citations, 1);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.person_summary.len(), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = Vec::new();
        for i in 0..8 {
            let path = dir.path().join(format!("{i}.html"));
            fs::write(&path, "<p>約翰福音3:16；約3:16</p>".repeat(i + 1)).unwrap();
            files.push(path);
        }

        let extractor = CitationExtractor::new(Language::Zh);
        let sequential = analyze_files(&files, &extractor, &index(), false, false);
        let parallel = analyze_files(&files, &extractor, &index(), true, false);

        assert_eq!(sequential.rows, parallel.rows);
        assert_eq!(sequential.person_summary, parallel.person_summary);
        assert_eq!(parallel.rows[7].count, 16);
    }
}
