//! Integration tests for verse-xref.
//!
//! These tests drive the whole pipeline against temporary article directories
//! and reference tables.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use verse_xref::analyze::{analyze_corpus, AnalyzeError};
use verse_xref::models::{AnalysisParams, AnalysisResult, Citation, Language};
use verse_xref::output::{summary_path, write_report_csv_file, write_summary_csv_file};

const REFERENCE: &str = "\
PersonID,Name,ZhName,Verses
1,Jesus,耶穌,John 3:16;John 1:1
2,Nicodemus,尼哥底母,john 3:1; John 3:16
3,Adam,亞當,Gen 1:27
";

/// Helper to lay out an article tree and reference table under a temp dir.
fn create_corpus(articles: &[(&str, &[u8])]) -> (TempDir, AnalysisParams) {
    let dir = tempfile::tempdir().unwrap();
    let article_dir = dir.path().join("articles");
    fs::create_dir_all(&article_dir).unwrap();

    for (name, content) in articles {
        let path = article_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    let reference_path = dir.path().join("tPerson.csv");
    fs::write(&reference_path, REFERENCE).unwrap();

    let params = AnalysisParams {
        article_dir,
        reference_path,
        output_path: dir.path().join("verse_analysis_results.csv"),
        ..Default::default()
    };
    (dir, params)
}

fn chinese_corpus() -> (TempDir, AnalysisParams) {
    create_corpus(&[
        (
            "a.html",
            "<html><body><p>約翰福音3:16說神愛世人。</p>\
             <p>參《創世記》1章1節與約3:16。</p>\
             <script>var ref = '約1:1';</script></body></html>"
                .as_bytes(),
        ),
        ("b.htm", "<p>約翰福音三章1節</p>".as_bytes()),
        ("sub/c.html", "<p>創1:1</p>".as_bytes()),
        ("notes.txt", "約翰福音3:16".as_bytes()),
    ])
}

fn file_name(path: &str) -> &str {
    Path::new(path).file_name().and_then(|n| n.to_str()).unwrap_or("")
}

fn row_tuples(result: &AnalysisResult) -> Vec<(String, String, usize, String)> {
    result
        .rows
        .iter()
        .map(|r| {
            (
                r.citation.clone(),
                r.person_name.clone(),
                r.count,
                file_name(&r.source_file).to_string(),
            )
        })
        .collect()
}

#[test]
fn test_end_to_end_chinese() {
    let (_dir, params) = chinese_corpus();
    let result = analyze_corpus(&params, false).unwrap();

    assert_eq!(result.language, Language::Zh);
    assert_eq!(result.summary.files_scanned, 3);
    assert!(result.failed_files.is_empty());

    let s = |v: &str| v.to_string();
    assert_eq!(
        row_tuples(&result),
        vec![
            (s("John 3:16"), s("Jesus"), 2, s("a.html")),
            (s("John 3:16"), s("Nicodemus"), 2, s("a.html")),
            (s("John 3:1"), s("Nicodemus"), 1, s("b.htm")),
        ]
    );

    let row = &result.rows[0];
    assert_eq!(row.book, "John");
    assert_eq!(row.person_id, "1");
    assert_eq!(row.localized_name, "耶穌");

    let summary: Vec<(String, String, usize)> = result
        .person_summary
        .iter()
        .map(|r| (r.person_id.clone(), file_name(&r.source_file).to_string(), r.total_count))
        .collect();
    assert_eq!(
        summary,
        vec![
            (s("1"), s("a.html"), 2),
            (s("2"), s("a.html"), 2),
            (s("2"), s("b.htm"), 1),
        ]
    );
}

#[test]
fn test_unmatched_citations_still_counted() {
    let (_dir, params) = chinese_corpus();
    let result = analyze_corpus(&params, false).unwrap();

    assert_eq!(result.file_counts.len(), 3);
    let c = &result.file_counts[2];
    assert_eq!(file_name(&c.file), "c.html");
    assert_eq!(c.total_citations, 1);
    assert_eq!(c.counts[&"Gen 1:1".parse::<Citation>().unwrap()], 1);

    let a = &result.file_counts[0];
    assert_eq!(a.total_citations, 3);
    assert_eq!(a.counts.len(), 2);

    assert_eq!(result.summary.total_citations, 5);
    assert_eq!(result.summary.unique_citations, 3);
    assert_eq!(result.summary.matched_citations, 2);
}

#[test]
fn test_end_to_end_english() {
    let (_dir, mut params) = create_corpus(&[(
        "sermon.html",
        "<p>As written in John 3:16, and again in john 3:16.</p>\
         <p>Compare Genesis 1:27 and Nicodemus in Jn 3:1.</p>"
            .as_bytes(),
    )]);
    params.language = Language::En;

    let result = analyze_corpus(&params, false).unwrap();
    let s = |v: &str| v.to_string();
    assert_eq!(
        row_tuples(&result),
        vec![
            (s("Gen 1:27"), s("Adam"), 1, s("sermon.html")),
            (s("John 3:16"), s("Jesus"), 2, s("sermon.html")),
            (s("John 3:16"), s("Nicodemus"), 2, s("sermon.html")),
        ]
    );
    // "Jn" is not a recognized abbreviation
    assert_eq!(result.file_counts[0].total_citations, 3);
}

#[test]
fn test_idempotent_runs() {
    let (dir, params) = chinese_corpus();

    let first = analyze_corpus(&params, false).unwrap();
    let second = analyze_corpus(&params, false).unwrap();
    assert_eq!(first.rows, second.rows);
    assert_eq!(first.person_summary, second.person_summary);

    let out_a = dir.path().join("run_a.csv");
    let out_b = dir.path().join("run_b.csv");
    write_report_csv_file(&first.rows, &out_a).unwrap();
    write_report_csv_file(&second.rows, &out_b).unwrap();
    assert_eq!(fs::read(&out_a).unwrap(), fs::read(&out_b).unwrap());
}

#[test]
fn test_sequential_matches_parallel() {
    let (_dir, mut params) = chinese_corpus();
    let parallel = analyze_corpus(&params, false).unwrap();
    params.parallel = false;
    let sequential = analyze_corpus(&params, false).unwrap();
    assert_eq!(parallel.rows, sequential.rows);
    assert_eq!(parallel.person_summary, sequential.person_summary);
}

#[test]
fn test_report_and_summary_files() {
    let (_dir, params) = chinese_corpus();
    let result = analyze_corpus(&params, false).unwrap();

    write_report_csv_file(&result.rows, &params.output_path).unwrap();
    let summary_file = summary_path(&params.output_path);
    write_summary_csv_file(&result.person_summary, &summary_file).unwrap();

    assert!(summary_file.ends_with("verse_analysis_results_summary.csv"));

    let report = fs::read_to_string(&params.output_path).unwrap();
    let mut lines = report.lines();
    assert_eq!(
        lines.next(),
        Some("Verse,Book,Count,PersonID,PersonName,ZhName,File")
    );
    assert_eq!(lines.count(), 3);

    let summary = fs::read_to_string(&summary_file).unwrap();
    assert!(summary.starts_with("PersonID,PersonName,File,Count\n"));
    assert_eq!(summary.lines().count(), 4);
}

#[test]
fn test_empty_directory() {
    let (_dir, params) = create_corpus(&[]);
    let result = analyze_corpus(&params, false).unwrap();

    assert_eq!(result.summary.files_scanned, 0);
    assert!(result.rows.is_empty());
    assert!(result.person_summary.is_empty());
    assert!(result.file_counts.is_empty());
}

#[test]
fn test_missing_directory() {
    let (dir, mut params) = create_corpus(&[]);
    params.article_dir = dir.path().join("does-not-exist");
    // Fails before the reference table is touched
    params.reference_path = PathBuf::from("/nonexistent/tPerson.csv");

    match analyze_corpus(&params, false) {
        Err(AnalyzeError::MissingInputDir(path)) => assert_eq!(path, params.article_dir),
        other => panic!("expected MissingInputDir, got {:?}", other.map(|r| r.rows.len())),
    }
}

#[test]
fn test_missing_reference_table() {
    let (_dir, mut params) = create_corpus(&[]);
    params.reference_path = PathBuf::from("/nonexistent/tPerson.csv");
    assert!(matches!(
        analyze_corpus(&params, false),
        Err(AnalyzeError::Index(_))
    ));
}

#[test]
fn test_unreadable_file_is_skipped() {
    let (_dir, params) = create_corpus(&[
        ("bad.html", &[0xff, 0xfe, 0x00, 0xd8][..]),
        ("good.html", "<p>約3:16</p>".as_bytes()),
    ]);

    let result = analyze_corpus(&params, false).unwrap();
    assert_eq!(result.summary.files_scanned, 2);
    assert_eq!(result.summary.files_failed, 1);
    assert_eq!(file_name(&result.failed_files[0].file), "bad.html");
    assert_eq!(result.rows.len(), 2);
    assert!(result.rows.iter().all(|r| file_name(&r.source_file) == "good.html"));
}

#[test]
fn test_config_file_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"language": "en", "parallel": false}"#).unwrap();

    let params = AnalysisParams::from_json_file(&path).unwrap();
    assert_eq!(params.language, Language::En);
    assert!(!params.parallel);
    assert_eq!(params.article_dir, PathBuf::from("articles"));
    assert_eq!(params.extensions, vec!["htm", "html"]);
}
