//! Per-document citation frequency counting.

use std::collections::BTreeMap;

use crate::books::BookCode;
use crate::models::Citation;

/// Count occurrences of each citation. Keys iterate in canonical citation order.
pub fn count_citations(citations: &[Citation]) -> BTreeMap<Citation, usize> {
    let mut counts = BTreeMap::new();
    for citation in citations {
        *counts.entry(citation.clone()).or_insert(0usize) += 1;
    }
    counts
}

/// Statistics over one document's citation counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountStats {
    pub total_citations: usize,
    pub unique_citations: usize,
    pub books_cited: usize,
    pub most_cited: Option<(Citation, usize)>,
}

/// Calculate statistics for a count map. Ties for most cited go to the earliest citation.
pub fn calculate_count_stats(counts: &BTreeMap<Citation, usize>) -> CountStats {
    let mut books: Vec<BookCode> = counts.keys().map(|c| c.book).collect();
    books.dedup();

    let most_cited = counts
        .iter()
        .fold(None::<(&Citation, usize)>, |best, (citation, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((citation, count)),
        })
        .map(|(citation, count)| (citation.clone(), count));

    CountStats {
        total_citations: counts.values().sum(),
        unique_citations: counts.len(),
        books_cited: books.len(),
        most_cited,
    }
}
