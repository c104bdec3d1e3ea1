//! Citation patterns: locate (book, chapter, verse) triples in plain text.
//!
//! One compiled regex per language. The Chinese pattern enumerates every
//! full book name and abbreviation, longest first, so the leftmost-first
//! alternation always prefers 約翰一書 over 約.

use regex::{Captures, Regex};

use crate::books::AliasTable;
use crate::models::{CitationCandidate, Language};
use crate::numerals::{is_numeral_char, NUMERAL_CHARS};

/// Build the Chinese citation regex.
///
/// Accepted shapes after the (optionally 《》-quoted) book name:
///   `3:16` `3章16節` `3章:16`     Arabic chapter, needs a separator or 章/篇
///   `三章16節` `二十三篇1` `一一九105`  numeral-word chapter
///   `14節`                       no chapter (defaults to 1), needs 節
fn build_chinese_regex(aliases: &AliasTable) -> String {
    let names: Vec<String> = aliases
        .chinese_aliases()
        .into_iter()
        .map(regex::escape)
        .collect();

    format!(
        concat!(
            r"[《〈]?(?P<book>{names})[》〉]?\s*",
            r"(?:",
            r"(?P<chapter>[0-9]+)\s*(?:[章篇]\s*[:：]?|[:：])\s*(?P<verse>[0-9]+)",
            r"|(?P<word>[{numerals}]+)\s*[章篇]?\s*[:：]?\s*(?P<word_verse>[0-9]+)",
            r"|(?P<bare_verse>[0-9]+)\s*節",
            r")節?"
        ),
        names = names.join("|"),
        numerals = NUMERAL_CHARS,
    )
}

/// Latin-script pattern: optional book number, a word (or `Song of Solomon`), `chapter:verse`.
const ENGLISH_PATTERN: &str = concat!(
    r"(?i)\b(?P<book>song\s+of\s+(?:solomon|songs)|(?:[1-3]\s*)?[a-z]+)",
    r"\s*(?P<chapter>[0-9]+)\s*:\s*(?P<verse>[0-9]+)"
);

/// A compiled citation pattern for one language.
#[derive(Debug, Clone)]
pub struct CitationPattern {
    language: Language,
    regex: Regex,
}

impl CitationPattern {
    pub fn new(language: Language) -> Self {
        match language {
            Language::Zh => Self::chinese(&AliasTable::new()),
            Language::En => Self::english(),
        }
    }

    pub fn chinese(aliases: &AliasTable) -> Self {
        let regex = Regex::new(&build_chinese_regex(aliases)).expect("chinese citation regex");
        CitationPattern {
            language: Language::Zh,
            regex,
        }
    }

    pub fn english() -> Self {
        let regex = Regex::new(ENGLISH_PATTERN).expect("english citation regex");
        CitationPattern {
            language: Language::En,
            regex,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// All candidate triples in left-to-right order, duplicates included.
    pub fn candidates<'t>(&'t self, text: &'t str) -> impl Iterator<Item = CitationCandidate> + 't {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| candidate_from_captures(&caps))
    }
}

fn candidate_from_captures(caps: &Captures<'_>) -> Option<CitationCandidate> {
    let whole = caps.get(0)?;
    let group = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| caps.name(name))
            .map(|m| m.as_str().to_string())
    };

    let mut book = group(&["book"])?;
    let mut chapter = group(&["chapter", "word"]).unwrap_or_default();

    // 約三16節 reads as 約 + chapter 三, the same as 約三16 without 節
    if caps.name("bare_verse").is_some() {
        let stem_len = book.trim_end_matches(is_numeral_char).len();
        if stem_len > 0 && stem_len < book.len() {
            chapter = book[stem_len..].to_string();
            book.truncate(stem_len);
        }
    }

    Some(CitationCandidate {
        book,
        chapter,
        verse: group(&["verse", "word_verse", "bare_verse"])?,
        start: whole.start(),
        end: whole.end(),
    })
}
