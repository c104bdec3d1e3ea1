//! Person reference table: citation → biblical figures.
//!
//! The table has one row per person with a `;`-separated list of citations in
//! the `Verses` column. Loading explodes that list into one index entry per
//! citation. CSV and XLSX tables are supported.

use calamine::{open_workbook, Reader, Xlsx};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::models::{Citation, IndexStats, PersonRecord};

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),
    #[error("Excel XLSX error: {0}")]
    ExcelXlsx(#[from] calamine::XlsxError),
    #[error("Missing column: {0}")]
    MissingColumn(&'static str),
    #[error("Workbook has no sheets")]
    EmptyWorkbook,
}

/// Canonical key for one `Verses` entry. Entries that do not parse as a
/// citation are kept verbatim so they can still match exactly.
pub fn reference_key(entry: &str) -> String {
    match entry.parse::<Citation>() {
        Ok(citation) => citation.key(),
        Err(_) => entry.trim().to_string(),
    }
}

/// Read-only lookup from canonical citation to associated persons.
#[derive(Debug, Clone, Default)]
pub struct PersonIndex {
    entries: HashMap<String, Vec<PersonRecord>>,
    stats: IndexStats,
}

impl PersonIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one reference-table row. A missing or empty verse list adds no entries;
    /// a row without a PersonID is skipped.
    pub fn insert_row(&mut self, person: PersonRecord, verses: Option<&str>) {
        if person.person_id.trim().is_empty() {
            warn!("Skipping reference row without PersonID ({:?})", person.name);
            self.stats.rows_without_id += 1;
            return;
        }
        self.stats.persons += 1;

        let verses = match verses.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => {
                warn!(
                    "Person {} ({}) has no verse list; no citations indexed",
                    person.person_id, person.name
                );
                self.stats.rows_without_verses += 1;
                return;
            }
        };

        for entry in verses.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let key = reference_key(entry);
            if key.parse::<Citation>().is_err() {
                debug!("Verse entry {:?} for person {} is not canonical", entry, person.person_id);
                self.stats.unparsed_entries += 1;
            }

            let persons = self.entries.entry(key).or_default();
            if !persons.contains(&person) {
                persons.push(person.clone());
                self.stats.links += 1;
            }
        }
        self.stats.citations = self.entries.len();
    }

    /// Persons linked to a citation; empty if none.
    pub fn lookup(&self, citation: &Citation) -> &[PersonRecord] {
        self.lookup_key(&citation.key())
    }

    pub fn lookup_key(&self, key: &str) -> &[PersonRecord] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct citations indexed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Indexed citation keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Load the reference table, choosing the reader by file extension (`.xlsx` or CSV).
pub fn load_person_index(path: &Path) -> Result<PersonIndex, IndexError> {
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));

    let index = if is_xlsx {
        load_person_index_xlsx(path)?
    } else {
        load_person_index_csv(path)?
    };

    info!(
        "Loaded {} unique citations for {} persons from {}",
        index.len(),
        index.stats().persons,
        path.display()
    );
    Ok(index)
}

/// Column indices for the reference table
#[derive(Debug, Default)]
struct ColumnIndices {
    person_id: Option<usize>,
    name: Option<usize>,
    zh_name: Option<usize>,
    verses: Option<usize>,
}

impl ColumnIndices {
    fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut indices = ColumnIndices::default();
        for (i, header) in headers.into_iter().enumerate() {
            match header.trim().to_lowercase().as_str() {
                "personid" | "person_id" | "id" => indices.person_id = Some(i),
                "name" | "personname" => indices.name = Some(i),
                "zhname" | "zh_name" | "localizedname" => indices.zh_name = Some(i),
                "verses" => indices.verses = Some(i),
                _ => {}
            }
        }
        indices
    }

    fn require(&self) -> Result<(usize, usize, usize), IndexError> {
        Ok((
            self.person_id.ok_or(IndexError::MissingColumn("PersonID"))?,
            self.name.ok_or(IndexError::MissingColumn("Name"))?,
            self.verses.ok_or(IndexError::MissingColumn("Verses"))?,
        ))
    }
}

pub fn load_person_index_csv(path: &Path) -> Result<PersonIndex, IndexError> {
    let file = std::fs::File::open(path)?;
    person_index_from_csv(file)
}

/// Build an index from CSV data with a header row.
pub fn person_index_from_csv<R: Read>(reader: R) -> Result<PersonIndex, IndexError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let columns = ColumnIndices::from_headers(reader.headers()?.iter());
    let (id_col, name_col, verses_col) = columns.require()?;

    let mut index = PersonIndex::new();
    for record in reader.records() {
        let record = record?;
        let field = |col: usize| record.get(col).map(str::trim).unwrap_or("").to_string();

        let person = PersonRecord {
            person_id: field(id_col),
            name: field(name_col),
            localized_name: columns.zh_name.map(field).unwrap_or_default(),
        };
        index.insert_row(person, record.get(verses_col));
    }

    Ok(index)
}

pub fn load_person_index_xlsx(path: &Path) -> Result<PersonIndex, IndexError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(IndexError::EmptyWorkbook)?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(PersonIndex::new());
    };

    let header_names: Vec<String> = header_row
        .iter()
        .map(|cell| cell_to_string(cell).unwrap_or_default())
        .collect();
    let columns = ColumnIndices::from_headers(header_names.iter().map(String::as_str));
    let (id_col, name_col, verses_col) = columns.require()?;

    let mut index = PersonIndex::new();
    for row in rows {
        if row.iter().all(|c| cell_to_string(c).map_or(true, |v| v.is_empty())) {
            continue; // blank row
        }
        let cell = |col: usize| row.get(col).and_then(cell_to_string);

        let person = PersonRecord {
            person_id: cell(id_col).unwrap_or_default(),
            name: cell(name_col).unwrap_or_default(),
            localized_name: columns.zh_name.and_then(cell).unwrap_or_default(),
        };
        let verses = cell(verses_col);
        index.insert_row(person, verses.as_deref());
    }

    Ok(index)
}

fn cell_to_string(cell: &calamine::Data) -> Option<String> {
    match cell {
        calamine::Data::String(s) => Some(s.trim().to_string()),
        calamine::Data::Int(n) => Some(n.to_string()),
        calamine::Data::Float(n) if n.fract() == 0.0 => Some(format!("{}", *n as i64)),
        calamine::Data::Float(n) => Some(n.to_string()),
        _ => None,
    }
}
