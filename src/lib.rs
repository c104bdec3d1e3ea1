//! Scripture Citation Cross-Reference Library
//!
//! Extracts scripture citations from HTML articles, normalizes them to
//! canonical `Code Chapter:Verse` form, counts them per article, and joins
//! them against a table of biblical figures.
//!
//! # Example
//!
//! ```no_run
//! use verse_xref::prelude::*;
//! use std::path::PathBuf;
//!
//! let params = AnalysisParams {
//!     article_dir: PathBuf::from("articles"),
//!     reference_path: PathBuf::from("tPerson.csv"),
//!     ..Default::default()
//! };
//!
//! let result = analyze_corpus(&params, false).unwrap();
//! println!("Found {} report rows", result.rows.len());
//! ```
//!
//! # Extracting From Text
//!
//! ```
//! use verse_xref::prelude::*;
//!
//! let extractor = CitationExtractor::new(Language::Zh);
//! let citations = extractor.extract("參《約翰福音》三章16節");
//! assert_eq!(citations[0].to_string(), "John 3:16");
//! ```

pub mod analyze;
pub mod books;
pub mod count;
pub mod extract;
pub mod index;
pub mod models;
pub mod normalize;
pub mod numerals;
pub mod output;
pub mod pattern;
pub mod report;
pub mod scan;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analyze::{analyze_corpus, analyze_files, analyze_with_index, AnalyzeError};
    pub use crate::books::{fold_book_name, AliasTable, BookCode};
    pub use crate::count::{calculate_count_stats, count_citations, CountStats};
    pub use crate::extract::{html_to_text, CitationExtractor, ExtractError, Extraction};
    pub use crate::index::{
        load_person_index, load_person_index_csv, load_person_index_xlsx, person_index_from_csv,
        reference_key, IndexError, PersonIndex,
    };
    pub use crate::models::{
        AnalysisParams, AnalysisResult, AnalysisSummary, Citation, CitationCandidate,
        CitationParseError, ConfigError, FailedFile, FileCitationCounts, IndexStats, Language,
        PersonRecord, ReportRow, SummaryRow,
    };
    pub use crate::normalize::{CitationNormalizer, NormalizeError};
    pub use crate::numerals::{NumeralResolver, MAX_CHAPTER};
    pub use crate::output::{
        format_row, print_rows, print_summary, summary_path, write_json, write_json_file,
        write_outputs, write_report_csv, write_report_csv_file, write_summary_csv,
        write_summary_csv_file, OutputError, WrittenOutputs,
    };
    pub use crate::pattern::CitationPattern;
    pub use crate::report::{join_counts, summarize_rows, ReportBuilder};
    pub use crate::scan::discover_articles;
}

// Re-export commonly used types at the crate root
pub use books::BookCode;
pub use models::{AnalysisParams, AnalysisResult, Citation, Language, ReportRow, SummaryRow};
