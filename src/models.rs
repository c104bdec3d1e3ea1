//! Data structures for the verse cross-referencing pipeline.

use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::books::BookCode;

/// Script/language of the article corpus. Selects which citation pattern is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Traditional Chinese book names, abbreviations and numeral-word chapters
    #[default]
    Zh,
    /// Latin-script book names with Arabic `chapter:verse`
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw (book, chapter, verse) triple found by a citation pattern, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationCandidate {
    pub book: String,
    pub chapter: String, // Empty when the text omits the chapter
    pub verse: String,
    pub start: usize, // Byte offset of the match in the scanned text
    pub end: usize,
}

/// A normalized scripture citation: `"{BookCode} {Chapter}:{Verse}"`.
///
/// Chapter and verse are kept as the digit strings produced by normalization.
/// Ordering is book order, then numeric chapter, then numeric verse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Citation {
    pub book: BookCode,
    pub chapter: String,
    pub verse: String,
}

impl Citation {
    pub fn new(book: BookCode, chapter: impl Into<String>, verse: impl Into<String>) -> Self {
        Citation {
            book,
            chapter: chapter.into(),
            verse: verse.into(),
        }
    }

    /// Canonical string form, used as the join key against the person index.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book.code(), self.chapter, self.verse)
    }
}

/// Digit strings compare numerically when ordered by (length, text).
fn numeric_str_cmp(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl Ord for Citation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.book
            .cmp(&other.book)
            .then_with(|| numeric_str_cmp(&self.chapter, &other.chapter))
            .then_with(|| numeric_str_cmp(&self.verse, &other.verse))
    }
}

impl PartialOrd for Citation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Citation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Not a canonical citation: {0:?}")]
pub struct CitationParseError(pub String);

impl FromStr for Citation {
    type Err = CitationParseError;

    /// Parse a canonical or near-canonical citation (`John 3:16`, `1cor 13 : 4`).
    ///
    /// The book part must be a canonical code (case and inner whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CitationParseError(s.to_string());
        let trimmed = s.trim();

        let sep = trimmed.rfind([':', '：']).ok_or_else(err)?;
        let sep_len = trimmed[sep..].chars().next().map_or(1, char::len_utf8);
        let head = trimmed[..sep].trim_end();
        let verse = trimmed[sep + sep_len..].trim();

        let digits_start = head
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)
            .ok_or_else(err)?;
        let chapter = &head[digits_start..];
        let book_part = head[..digits_start].trim();

        if verse.is_empty() || !verse.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }

        let book = BookCode::from_code(book_part).ok_or_else(err)?;
        Ok(Citation::new(book, chapter, verse))
    }
}

/// A biblical figure from the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub person_id: String,
    pub name: String,
    pub localized_name: String,
}

/// One row of the cross-reference report: (citation, person, file) with the citation's count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Verse")]
    pub citation: String,
    #[serde(rename = "Book")]
    pub book: String,
    #[serde(rename = "Count")]
    pub count: usize,
    #[serde(rename = "PersonID")]
    pub person_id: String,
    #[serde(rename = "PersonName")]
    pub person_name: String,
    #[serde(rename = "ZhName")]
    pub localized_name: String,
    #[serde(rename = "File")]
    pub source_file: String,
}

/// Per-person, per-file aggregate of report counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "PersonID")]
    pub person_id: String,
    #[serde(rename = "PersonName")]
    pub person_name: String,
    #[serde(rename = "File")]
    pub source_file: String,
    #[serde(rename = "Count")]
    pub total_count: usize,
}

/// Citation counts for one article, before joining against the person index.
#[derive(Debug, Clone, Serialize)]
pub struct FileCitationCounts {
    pub file: String,
    pub total_citations: usize,
    pub counts: BTreeMap<Citation, usize>,
}

/// An article that could not be read or parsed.
#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub file: String,
    pub error: String,
}

/// Run configuration.
///
/// Loaded from `AnalysisParams::default()`, then an optional JSON file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    pub article_dir: PathBuf,
    pub reference_path: PathBuf,
    pub output_path: PathBuf,
    pub language: Language,
    pub extensions: Vec<String>, // Matched case-insensitively, without the leading dot
    pub parallel: bool,
    pub write_summary: bool,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            article_dir: PathBuf::from("articles"),
            reference_path: PathBuf::from("tPerson.csv"),
            output_path: PathBuf::from("verse_analysis_results.csv"),
            language: Language::Zh,
            extensions: vec!["htm".to_string(), "html".to_string()],
            parallel: true,
            write_summary: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisParams {
    /// Load params from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Full analysis result
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub version: String,
    pub language: Language,
    pub summary: AnalysisSummary,
    pub file_counts: Vec<FileCitationCounts>,
    pub failed_files: Vec<FailedFile>,
    pub rows: Vec<ReportRow>,
    pub person_summary: Vec<SummaryRow>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisSummary {
    pub files_scanned: usize,
    pub files_failed: usize,
    pub total_citations: usize,
    pub unique_citations: usize,
    pub matched_citations: usize, // Distinct (file, citation) pairs with at least one person
    pub report_rows: usize,
    pub summary_rows: usize,
}

/// Reference table statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexStats {
    pub persons: usize,
    pub citations: usize,
    pub links: usize,
    pub rows_without_verses: usize,
    pub rows_without_id: usize,
    pub unparsed_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_display() {
        let c = Citation::new(BookCode::John, "3", "16");
        assert_eq!(c.to_string(), "John 3:16");
        assert_eq!(Citation::new(BookCode::FirstCorinthians, "13", "4").key(), "1Cor 13:4");
    }

    #[test]
    fn test_citation_parse_canonical() {
        let c: Citation = "John 3:16".parse().unwrap();
        assert_eq!(c, Citation::new(BookCode::John, "3", "16"));

        let c: Citation = "Ps 119:105".parse().unwrap();
        assert_eq!(c.book, BookCode::Psalms);
        assert_eq!(c.chapter, "119");
        assert_eq!(c.verse, "105");
    }

    #[test]
    fn test_citation_parse_near_canonical() {
        assert_eq!("  john 3:16 ".parse::<Citation>().unwrap().key(), "John 3:16");
        assert_eq!("1cor 13 : 4".parse::<Citation>().unwrap().key(), "1Cor 13:4");
        assert_eq!("1 Cor 13:4".parse::<Citation>().unwrap().key(), "1Cor 13:4");
        assert_eq!("Gen1:1".parse::<Citation>().unwrap().key(), "Gen 1:1");
        assert_eq!("Rev 22：21".parse::<Citation>().unwrap().key(), "Rev 22:21");
    }

    #[test]
    fn test_citation_parse_rejects() {
        assert!("".parse::<Citation>().is_err());
        assert!("John".parse::<Citation>().is_err());
        assert!("John 3".parse::<Citation>().is_err());
        assert!("John :16".parse::<Citation>().is_err());
        assert!("John 3:16-18".parse::<Citation>().is_err());
        assert!("Johnny 3:16".parse::<Citation>().is_err());
        assert!("約翰福音 3:16".parse::<Citation>().is_err());
    }

    #[test]
    fn test_citation_ordering_is_numeric() {
        let mut citations = vec![
            Citation::new(BookCode::John, "10", "1"),
            Citation::new(BookCode::John, "3", "16"),
            Citation::new(BookCode::Genesis, "50", "26"),
            Citation::new(BookCode::John, "3", "2"),
        ];
        citations.sort();
        let keys: Vec<String> = citations.iter().map(Citation::key).collect();
        assert_eq!(keys, vec!["Gen 50:26", "John 3:2", "John 3:16", "John 10:1"]);
    }

    #[test]
    fn test_params_partial_json() {
        let params: AnalysisParams =
            serde_json::from_str(r#"{"language": "en", "parallel": false}"#).unwrap();
        assert_eq!(params.language, Language::En);
        assert!(!params.parallel);
        assert_eq!(params.extensions, vec!["htm", "html"]);
        assert_eq!(params.reference_path, PathBuf::from("tPerson.csv"));
    }
}
