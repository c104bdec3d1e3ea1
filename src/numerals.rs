//! Chapter numeral words → Arabic chapter numbers.
//!
//! Chinese texts write chapter numbers in several conventions, all covered
//! for chapters 1–150 (Psalms is the longest book):
//!
//! - positional: 三, 十二, 二十一, 一百, 一百零五, 一百二十三
//! - archaic tens: 廿 (20), 卅 (30), 卌 (40), optionally followed by a unit
//! - digit-by-digit: 二一 (21), 一一九 (119)
//! - digit-by-digit with a zero glyph: 一○五 / 一〇五 (105), 一五○ (150)

use std::collections::BTreeMap;

/// Largest chapter number covered by the numeral-word table.
pub const MAX_CHAPTER: u32 = 150;

/// Every character that can appear in a chapter numeral word.
pub const NUMERAL_CHARS: &str = "一二三四五六七八九十百零廿卅卌○〇";

const DIGITS: [char; 10] = ['○', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// Zero is written with either a white circle or the ideographic zero.
const ZERO_GLYPHS: [char; 2] = ['○', '〇'];

pub fn is_numeral_char(c: char) -> bool {
    NUMERAL_CHARS.contains(c)
}

/// Positional form for 1–99, with an explicit 一 before 十 when `explicit_ten` is set.
fn positional_below_hundred(n: u32, explicit_ten: bool) -> String {
    let (tens, units) = (n / 10, n % 10);
    let mut s = String::new();
    if tens > 0 {
        if tens > 1 || explicit_ten {
            s.push(DIGITS[tens as usize]);
        }
        s.push('十');
    }
    if units > 0 {
        s.push(DIGITS[units as usize]);
    }
    s
}

/// Positional form, e.g. 21 → 二十一, 105 → 一百零五, 110 → 一百一十.
fn positional(n: u32) -> String {
    if n < 100 {
        return positional_below_hundred(n, false);
    }
    let rest = n - 100;
    match rest {
        0 => "一百".to_string(),
        1..=9 => format!("一百零{}", DIGITS[rest as usize]),
        _ => format!("一百{}", positional_below_hundred(rest, true)),
    }
}

/// Archaic tens form for 20–49, e.g. 21 → 廿一, 30 → 卅.
fn archaic(n: u32) -> Option<String> {
    let prefix = match n / 10 {
        2 => '廿',
        3 => '卅',
        4 => '卌',
        _ => return None,
    };
    let mut s = String::from(prefix);
    if n % 10 > 0 {
        s.push(DIGITS[(n % 10) as usize]);
    }
    Some(s)
}

/// Digit-by-digit forms (one per zero glyph), e.g. 105 → [一○五, 一〇五].
fn digit_by_digit(n: u32) -> Vec<String> {
    ZERO_GLYPHS
        .iter()
        .map(|&zero| {
            n.to_string()
                .chars()
                .map(|d| match d {
                    '0' => zero,
                    _ => DIGITS[d.to_digit(10).unwrap_or(0) as usize],
                })
                .collect()
        })
        .collect()
}

/// Immutable numeral-word table with longest-key-first resolution.
#[derive(Debug, Clone)]
pub struct NumeralResolver {
    /// (word, value), sorted by word length descending
    entries: Vec<(String, u32)>,
}

impl Default for NumeralResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl NumeralResolver {
    pub fn new() -> Self {
        let mut words: BTreeMap<String, u32> = BTreeMap::new();

        for n in 1..=MAX_CHAPTER {
            words.insert(positional(n), n);
            if let Some(word) = archaic(n) {
                words.insert(word, n);
            }
            for word in digit_by_digit(n) {
                words.insert(word, n);
            }
        }

        let mut entries: Vec<(String, u32)> = words.into_iter().collect();
        entries.sort_by_key(|(word, _)| std::cmp::Reverse(word.chars().count()));

        NumeralResolver { entries }
    }

    /// Resolve a raw chapter token to its canonical chapter string.
    ///
    /// Empty → `"1"`. Otherwise the longest numeral word that prefixes the
    /// token and ends the numeral run wins (so 二一 never resolves as 二).
    /// Tokens with no such word, including numeral words above
    /// [`MAX_CHAPTER`] and Arabic numerals, are returned unchanged.
    pub fn resolve(&self, token: &str) -> String {
        let token = token.trim();
        if token.is_empty() {
            return "1".to_string();
        }

        for (word, value) in &self.entries {
            if let Some(rest) = token.strip_prefix(word.as_str()) {
                if rest.chars().next().is_some_and(is_numeral_char) {
                    continue;
                }
                return value.to_string();
            }
        }

        token.to_string()
    }

    /// Exact lookup of a single numeral word.
    pub fn value_of(&self, word: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|&(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_forms() {
        assert_eq!(positional(1), "一");
        assert_eq!(positional(10), "十");
        assert_eq!(positional(15), "十五");
        assert_eq!(positional(20), "二十");
        assert_eq!(positional(99), "九十九");
        assert_eq!(positional(100), "一百");
        assert_eq!(positional(105), "一百零五");
        assert_eq!(positional(110), "一百一十");
        assert_eq!(positional(119), "一百一十九");
        assert_eq!(positional(150), "一百五十");
    }

    #[test]
    fn test_empty_defaults_to_chapter_one() {
        let resolver = NumeralResolver::new();
        assert_eq!(resolver.resolve(""), "1");
        assert_eq!(resolver.resolve("  "), "1");
    }

    #[test]
    fn test_conventions_agree() {
        let resolver = NumeralResolver::new();
        for token in ["廿一", "二十一", "二一", "21"] {
            assert_eq!(resolver.resolve(token), "21", "{token}");
        }
        for token in ["卅", "三十", "三○", "三〇"] {
            assert_eq!(resolver.resolve(token), "30", "{token}");
        }
        for token in ["一百零五", "一○五", "一〇五"] {
            assert_eq!(resolver.resolve(token), "105", "{token}");
        }
        for token in ["一百五十", "一五○", "一五〇"] {
            assert_eq!(resolver.resolve(token), "150", "{token}");
        }
        assert_eq!(resolver.resolve("一一九"), "119");
        assert_eq!(resolver.resolve("一百一十九"), "119");
        assert_eq!(resolver.resolve("卌二"), "42");
    }

    #[test]
    fn test_every_chapter_resolves() {
        let resolver = NumeralResolver::new();
        for n in 1..=MAX_CHAPTER {
            let expected = n.to_string();
            assert_eq!(resolver.resolve(&positional(n)), expected);
            for word in digit_by_digit(n) {
                assert_eq!(resolver.resolve(&word), expected, "{word}");
            }
            assert_eq!(resolver.resolve(&expected), expected);
        }
    }

    #[test]
    fn test_shorter_word_does_not_capture_longer() {
        let resolver = NumeralResolver::new();
        assert_eq!(resolver.resolve("二一"), "21");
        assert_eq!(resolver.resolve("十二"), "12");
        assert_eq!(resolver.resolve("一二三"), "123");
    }

    #[test]
    fn test_trailing_marker_ignored() {
        let resolver = NumeralResolver::new();
        assert_eq!(resolver.resolve("三章"), "3");
        assert_eq!(resolver.resolve("二十三篇"), "23");
    }

    #[test]
    fn test_beyond_table_passes_through() {
        let resolver = NumeralResolver::new();
        assert_eq!(resolver.resolve("一五一"), "一五一");
        assert_eq!(resolver.resolve("一百五十一"), "一百五十一");
        assert_eq!(resolver.resolve("151"), "151");
        assert_eq!(resolver.resolve("百"), "百");
    }

    #[test]
    fn test_value_of() {
        let resolver = NumeralResolver::new();
        assert_eq!(resolver.value_of("廿"), Some(20));
        assert_eq!(resolver.value_of("一○○"), Some(100));
        assert_eq!(resolver.value_of("二十一章"), None);
        assert!(resolver.len() > 2 * MAX_CHAPTER as usize);
    }
}
