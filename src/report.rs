//! Join citation counts against the person index and aggregate per person.

use std::collections::BTreeMap;

use crate::index::PersonIndex;
use crate::models::{Citation, ReportRow, SummaryRow};

/// Report rows for one file: one row per (citation, person) pair, each
/// carrying the citation's count. Citations without persons yield no rows.
pub fn join_counts(
    file: &str,
    counts: &BTreeMap<Citation, usize>,
    index: &PersonIndex,
) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    for (citation, &count) in counts {
        let key = citation.key();
        for person in index.lookup_key(&key) {
            rows.push(ReportRow {
                citation: key.clone(),
                book: citation.book.code().to_string(),
                count,
                person_id: person.person_id.clone(),
                person_name: person.name.clone(),
                localized_name: person.localized_name.clone(),
                source_file: file.to_string(),
            });
        }
    }
    rows
}

/// Group rows by (PersonID, PersonName, File) and sum their counts.
pub fn summarize_rows(rows: &[ReportRow]) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<(&str, &str, &str), usize> = BTreeMap::new();
    for row in rows {
        let key = (
            row.person_id.as_str(),
            row.person_name.as_str(),
            row.source_file.as_str(),
        );
        *groups.entry(key).or_insert(0) += row.count;
    }

    groups
        .into_iter()
        .map(|((person_id, person_name, file), total)| SummaryRow {
            person_id: person_id.to_string(),
            person_name: person_name.to_string(),
            source_file: file.to_string(),
            total_count: total,
        })
        .collect()
}

/// Append-only accumulator of report rows across files.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    rows: Vec<ReportRow>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join one file's counts and append the resulting rows. Returns the number of rows added.
    pub fn add_file(
        &mut self,
        file: &str,
        counts: &BTreeMap<Citation, usize>,
        index: &PersonIndex,
    ) -> usize {
        let rows = join_counts(file, counts, index);
        let added = rows.len();
        self.rows.extend(rows);
        added
    }

    /// Append rows that were already joined elsewhere (e.g. on a worker thread).
    pub fn extend(&mut self, rows: Vec<ReportRow>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn summarize(&self) -> Vec<SummaryRow> {
        summarize_rows(&self.rows)
    }

    pub fn into_rows(self) -> Vec<ReportRow> {
        self.rows
    }
}
