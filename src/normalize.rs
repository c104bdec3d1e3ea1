//! Citation normalization: raw candidate triple → canonical [`Citation`].

use thiserror::Error;

use crate::books::AliasTable;
use crate::models::{Citation, CitationCandidate};
use crate::numerals::NumeralResolver;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Unknown book: {0:?}")]
    UnknownBook(String),
    #[error("Unresolved chapter {chapter:?} in {book}")]
    UnresolvedChapter { book: String, chapter: String },
    #[error("Invalid verse {0:?}")]
    InvalidVerse(String),
}

fn is_arabic_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Composes the alias table and numeral resolver.
#[derive(Debug, Clone, Default)]
pub struct CitationNormalizer {
    aliases: AliasTable,
    numerals: NumeralResolver,
}

impl CitationNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn numerals(&self) -> &NumeralResolver {
        &self.numerals
    }

    /// Normalize one (book, chapter, verse) triple.
    ///
    /// Fails instead of guessing: an unknown book, a chapter that does not
    /// come out as an Arabic number, or a non-numeric verse all produce an error.
    pub fn normalize(
        &self,
        book: &str,
        chapter: &str,
        verse: &str,
    ) -> Result<Citation, NormalizeError> {
        let book_token = book.trim().to_lowercase();
        let code = self
            .aliases
            .resolve(&book_token)
            .ok_or_else(|| NormalizeError::UnknownBook(book.trim().to_string()))?;

        let chapter = self.numerals.resolve(&chapter.trim().to_lowercase());
        if !is_arabic_number(&chapter) {
            return Err(NormalizeError::UnresolvedChapter {
                book: code.code().to_string(),
                chapter,
            });
        }

        let verse = verse.trim();
        if !is_arabic_number(verse) {
            return Err(NormalizeError::InvalidVerse(verse.to_string()));
        }

        Ok(Citation::new(code, chapter, verse))
    }

    pub fn normalize_candidate(
        &self,
        candidate: &CitationCandidate,
    ) -> Result<Citation, NormalizeError> {
        self.normalize(&candidate.book, &candidate.chapter, &candidate.verse)
    }
}
