//! Canonical book codes and the book-name alias table.
//!
//! Every surface spelling of a book (English full name, canonical code,
//! traditional Chinese full name, traditional Chinese abbreviation) maps to
//! exactly one [`BookCode`]. Resolution is prefix-based and always tries the
//! longest alias first, so a short abbreviation never masks a longer name.

use std::collections::BTreeMap;

/// One of the 66 books of the Protestant canon, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BookCode {
    // ── Old Testament ──
    Genesis,
    Exodus,
    Leviticus,
    Numbers,
    Deuteronomy,
    Joshua,
    Judges,
    Ruth,
    FirstSamuel,
    SecondSamuel,
    FirstKings,
    SecondKings,
    FirstChronicles,
    SecondChronicles,
    Ezra,
    Nehemiah,
    Esther,
    Job,
    Psalms,
    Proverbs,
    Ecclesiastes,
    SongOfSolomon,
    Isaiah,
    Jeremiah,
    Lamentations,
    Ezekiel,
    Daniel,
    Hosea,
    Joel,
    Amos,
    Obadiah,
    Jonah,
    Micah,
    Nahum,
    Habakkuk,
    Zephaniah,
    Haggai,
    Zechariah,
    Malachi,
    // ── New Testament ──
    Matthew,
    Mark,
    Luke,
    John,
    Acts,
    Romans,
    FirstCorinthians,
    SecondCorinthians,
    Galatians,
    Ephesians,
    Philippians,
    Colossians,
    FirstThessalonians,
    SecondThessalonians,
    FirstTimothy,
    SecondTimothy,
    Titus,
    Philemon,
    Hebrews,
    James,
    FirstPeter,
    SecondPeter,
    FirstJohn,
    SecondJohn,
    ThirdJohn,
    Jude,
    Revelation,
}

/// Names for one book: canonical code, English name, Chinese full name, Chinese abbreviation.
struct BookNames {
    code: &'static str,
    english: &'static str,
    chinese: &'static str,
    abbreviation: &'static str,
}

const fn names(
    code: &'static str,
    english: &'static str,
    chinese: &'static str,
    abbreviation: &'static str,
) -> BookNames {
    BookNames {
        code,
        english,
        chinese,
        abbreviation,
    }
}

/// Indexed by `BookCode as usize`.
const BOOK_NAMES: [BookNames; 66] = [
    names("Gen", "Genesis", "創世記", "創"),
    names("Exod", "Exodus", "出埃及記", "出"),
    names("Lev", "Leviticus", "利未記", "利"),
    names("Num", "Numbers", "民數記", "民"),
    names("Deut", "Deuteronomy", "申命記", "申"),
    names("Josh", "Joshua", "約書亞記", "書"),
    names("Judg", "Judges", "士師記", "士"),
    names("Ruth", "Ruth", "路得記", "得"),
    names("1Sam", "1 Samuel", "撒母耳記上", "撒上"),
    names("2Sam", "2 Samuel", "撒母耳記下", "撒下"),
    names("1Kgs", "1 Kings", "列王紀上", "王上"),
    names("2Kgs", "2 Kings", "列王紀下", "王下"),
    names("1Chr", "1 Chronicles", "歷代志上", "代上"),
    names("2Chr", "2 Chronicles", "歷代志下", "代下"),
    names("Ezra", "Ezra", "以斯拉記", "拉"),
    names("Neh", "Nehemiah", "尼希米記", "尼"),
    names("Esth", "Esther", "以斯帖記", "斯"),
    names("Job", "Job", "約伯記", "伯"),
    names("Ps", "Psalms", "詩篇", "詩"),
    names("Prov", "Proverbs", "箴言", "箴"),
    names("Eccl", "Ecclesiastes", "傳道書", "傳"),
    names("Song", "Song of Solomon", "雅歌", "雅"),
    names("Isa", "Isaiah", "以賽亞書", "賽"),
    names("Jer", "Jeremiah", "耶利米書", "耶"),
    names("Lam", "Lamentations", "耶利米哀歌", "哀"),
    names("Ezek", "Ezekiel", "以西結書", "結"),
    names("Dan", "Daniel", "但以理書", "但"),
    names("Hos", "Hosea", "何西阿書", "何"),
    names("Joel", "Joel", "約珥書", "珥"),
    names("Amos", "Amos", "阿摩司書", "摩"),
    names("Obad", "Obadiah", "俄巴底亞書", "俄"),
    names("Jonah", "Jonah", "約拿書", "拿"),
    names("Mic", "Micah", "彌迦書", "彌"),
    names("Nah", "Nahum", "那鴻書", "鴻"),
    names("Hab", "Habakkuk", "哈巴谷書", "哈"),
    names("Zeph", "Zephaniah", "西番雅書", "番"),
    names("Hag", "Haggai", "哈該書", "該"),
    names("Zech", "Zechariah", "撒迦利亞書", "亞"),
    names("Mal", "Malachi", "瑪拉基書", "瑪"),
    names("Matt", "Matthew", "馬太福音", "太"),
    names("Mark", "Mark", "馬可福音", "可"),
    names("Luke", "Luke", "路加福音", "路"),
    names("John", "John", "約翰福音", "約"),
    names("Acts", "Acts", "使徒行傳", "徒"),
    names("Rom", "Romans", "羅馬書", "羅"),
    names("1Cor", "1 Corinthians", "哥林多前書", "林前"),
    names("2Cor", "2 Corinthians", "哥林多後書", "林後"),
    names("Gal", "Galatians", "加拉太書", "加"),
    names("Eph", "Ephesians", "以弗所書", "弗"),
    names("Phil", "Philippians", "腓立比書", "腓"),
    names("Col", "Colossians", "歌羅西書", "西"),
    names("1Thess", "1 Thessalonians", "帖撒羅尼迦前書", "帖前"),
    names("2Thess", "2 Thessalonians", "帖撒羅尼迦後書", "帖後"),
    names("1Tim", "1 Timothy", "提摩太前書", "提前"),
    names("2Tim", "2 Timothy", "提摩太後書", "提後"),
    names("Titus", "Titus", "提多書", "多"),
    names("Phlm", "Philemon", "腓利門書", "門"),
    names("Heb", "Hebrews", "希伯來書", "來"),
    names("James", "James", "雅各書", "雅各"),
    names("1Pet", "1 Peter", "彼得前書", "彼前"),
    names("2Pet", "2 Peter", "彼得後書", "彼後"),
    names("1John", "1 John", "約翰一書", "約一"),
    names("2John", "2 John", "約翰二書", "約二"),
    names("3John", "3 John", "約翰三書", "約三"),
    names("Jude", "Jude", "猶大書", "猶"),
    names("Rev", "Revelation", "啟示錄", "啟"),
];

/// Extra English spellings beyond the full name and the canonical code.
const ENGLISH_VARIANTS: &[(&str, BookCode)] = &[
    ("psalm", BookCode::Psalms),
    ("song of songs", BookCode::SongOfSolomon),
    ("canticles", BookCode::SongOfSolomon),
    ("philem", BookCode::Philemon),
];

impl BookCode {
    pub const ALL: [BookCode; 66] = [
        BookCode::Genesis,
        BookCode::Exodus,
        BookCode::Leviticus,
        BookCode::Numbers,
        BookCode::Deuteronomy,
        BookCode::Joshua,
        BookCode::Judges,
        BookCode::Ruth,
        BookCode::FirstSamuel,
        BookCode::SecondSamuel,
        BookCode::FirstKings,
        BookCode::SecondKings,
        BookCode::FirstChronicles,
        BookCode::SecondChronicles,
        BookCode::Ezra,
        BookCode::Nehemiah,
        BookCode::Esther,
        BookCode::Job,
        BookCode::Psalms,
        BookCode::Proverbs,
        BookCode::Ecclesiastes,
        BookCode::SongOfSolomon,
        BookCode::Isaiah,
        BookCode::Jeremiah,
        BookCode::Lamentations,
        BookCode::Ezekiel,
        BookCode::Daniel,
        BookCode::Hosea,
        BookCode::Joel,
        BookCode::Amos,
        BookCode::Obadiah,
        BookCode::Jonah,
        BookCode::Micah,
        BookCode::Nahum,
        BookCode::Habakkuk,
        BookCode::Zephaniah,
        BookCode::Haggai,
        BookCode::Zechariah,
        BookCode::Malachi,
        BookCode::Matthew,
        BookCode::Mark,
        BookCode::Luke,
        BookCode::John,
        BookCode::Acts,
        BookCode::Romans,
        BookCode::FirstCorinthians,
        BookCode::SecondCorinthians,
        BookCode::Galatians,
        BookCode::Ephesians,
        BookCode::Philippians,
        BookCode::Colossians,
        BookCode::FirstThessalonians,
        BookCode::SecondThessalonians,
        BookCode::FirstTimothy,
        BookCode::SecondTimothy,
        BookCode::Titus,
        BookCode::Philemon,
        BookCode::Hebrews,
        BookCode::James,
        BookCode::FirstPeter,
        BookCode::SecondPeter,
        BookCode::FirstJohn,
        BookCode::SecondJohn,
        BookCode::ThirdJohn,
        BookCode::Jude,
        BookCode::Revelation,
    ];

    fn names(&self) -> &'static BookNames {
        &BOOK_NAMES[*self as usize]
    }

    /// Canonical short code, e.g. `"Gen"`, `"1Cor"`.
    pub fn code(&self) -> &'static str {
        self.names().code
    }

    pub fn english_name(&self) -> &'static str {
        self.names().english
    }

    pub fn chinese_name(&self) -> &'static str {
        self.names().chinese
    }

    pub fn chinese_abbreviation(&self) -> &'static str {
        self.names().abbreviation
    }

    /// Look up a book by its canonical code, ignoring case and whitespace (`"1 cor"` → 1Cor).
    pub fn from_code(code: &str) -> Option<BookCode> {
        let folded: String = code
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        if folded.is_empty() {
            return None;
        }
        BookCode::ALL
            .iter()
            .copied()
            .find(|b| b.code().eq_ignore_ascii_case(&folded))
    }

    pub fn is_new_testament(&self) -> bool {
        *self >= BookCode::Matthew
    }
}

/// Fold a book-name fragment into alias-comparison form.
///
/// Lowercases, trims, collapses whitespace runs and separates a leading book
/// number from the name (`"1Corinthians"` → `"1 corinthians"`).
pub fn fold_book_name(text: &str) -> String {
    let collapsed = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut chars = collapsed.chars();
    match (chars.next(), chars.next()) {
        (Some(d), Some(c)) if d.is_ascii_digit() && c.is_alphabetic() => {
            format!("{} {}", d, &collapsed[d.len_utf8()..])
        }
        _ => collapsed,
    }
}

/// Immutable mapping from every recognized book spelling to its canonical code.
#[derive(Debug, Clone)]
pub struct AliasTable {
    /// (folded alias, code), sorted by alias length descending
    aliases: Vec<(String, BookCode)>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AliasTable {
    pub fn new() -> Self {
        let mut unique: BTreeMap<String, BookCode> = BTreeMap::new();

        for book in BookCode::ALL {
            for alias in [
                book.english_name(),
                book.code(),
                book.chinese_name(),
                book.chinese_abbreviation(),
            ] {
                unique.insert(fold_book_name(alias), book);
            }
        }
        for &(alias, book) in ENGLISH_VARIANTS {
            unique.insert(fold_book_name(alias), book);
        }

        let mut aliases: Vec<(String, BookCode)> = unique.into_iter().collect();
        // Longest first; ties stay in BTreeMap key order, so iteration is deterministic
        aliases.sort_by_key(|(alias, _)| std::cmp::Reverse(alias.chars().count()));

        AliasTable { aliases }
    }

    /// Resolve the surface text preceding a chapter:verse to a book code.
    ///
    /// The folded text is checked for every alias as a prefix, longest alias first.
    pub fn resolve(&self, surface: &str) -> Option<BookCode> {
        let folded = fold_book_name(surface);
        if folded.is_empty() {
            return None;
        }
        self.aliases
            .iter()
            .find(|(alias, _)| folded.starts_with(alias.as_str()))
            .map(|&(_, book)| book)
    }

    /// All Chinese spellings (full names and abbreviations), longest first.
    pub fn chinese_aliases(&self) -> Vec<&str> {
        self.aliases
            .iter()
            .map(|(alias, _)| alias.as_str())
            .filter(|alias| !alias.is_ascii())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
