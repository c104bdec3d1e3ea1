//! Citation extraction from article text.
//!
//! Applies the language's [`CitationPattern`] and normalizes every match.
//! Unresolvable matches are dropped and logged, never counted.

use log::debug;
use scraper::{Html, Node};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::models::{Citation, CitationCandidate, Language};
use crate::normalize::{CitationNormalizer, NormalizeError};
use crate::pattern::CitationPattern;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Citations found in a text, plus the candidates that failed normalization.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub citations: Vec<Citation>,
    pub rejected: Vec<(CitationCandidate, NormalizeError)>,
}

/// Extracts canonical citations from plain text for one language.
#[derive(Debug, Clone)]
pub struct CitationExtractor {
    pattern: CitationPattern,
    normalizer: CitationNormalizer,
}

impl CitationExtractor {
    pub fn new(language: Language) -> Self {
        let normalizer = CitationNormalizer::new();
        let pattern = match language {
            Language::Zh => CitationPattern::chinese(normalizer.aliases()),
            Language::En => CitationPattern::english(),
        };
        CitationExtractor {
            pattern,
            normalizer,
        }
    }

    pub fn language(&self) -> Language {
        self.pattern.language()
    }

    pub fn normalizer(&self) -> &CitationNormalizer {
        &self.normalizer
    }

    /// Canonical citations in order of appearance, duplicates preserved.
    pub fn extract(&self, text: &str) -> Vec<Citation> {
        let extraction = self.extract_detailed(text);
        for (candidate, err) in &extraction.rejected {
            debug!(
                "Dropped citation candidate {:?} at {}..{}: {}",
                &text[candidate.start..candidate.end],
                candidate.start,
                candidate.end,
                err
            );
        }
        extraction.citations
    }

    /// Like [`extract`](Self::extract), but keeps rejected candidates.
    pub fn extract_detailed(&self, text: &str) -> Extraction {
        let mut extraction = Extraction::default();
        for candidate in self.pattern.candidates(text) {
            match self.normalizer.normalize_candidate(&candidate) {
                Ok(citation) => extraction.citations.push(citation),
                Err(err) => extraction.rejected.push((candidate, err)),
            }
        }
        extraction
    }

    /// Read an article and extract its citations.
    ///
    /// `.htm`/`.html` files are reduced to their text content first; anything
    /// else is scanned as plain text.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<Citation>, ExtractError> {
        let content = fs::read_to_string(path)?;
        let text = if is_html_path(path) {
            html_to_text(&content)
        } else {
            content
        };
        Ok(self.extract(&text))
    }
}

fn is_html_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("htm") || e.eq_ignore_ascii_case("html"))
}

/// Concatenated text content of an HTML document, skipping `<script>` and `<style>`.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        if let Node::Text(t) = node.value() {
            let hidden = node
                .parent()
                .and_then(|p| p.value().as_element().map(|e| e.name()))
                .is_some_and(|name| name == "script" || name == "style");
            if !hidden {
                text.push_str(&t.text);
            }
        }
    }

    text
}
