// SkuFinder - core/filter.rs
//
// Search over the merged table. The text query and the strength selector are
// AND-combined; matching rows are projected to the three displayed columns
// and de-duplicated on that projection, keeping first occurrences.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{MergedRecord, MergedTable, ResultRow, ResultTable, SearchCriteria};
use std::collections::HashSet;

/// Result of a search.
///
/// An empty result is an outcome for the presentation layer to report, not
/// an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Matches(ResultTable),
    NoMatches,
}

impl SearchOutcome {
    /// The matched rows, if any.
    pub fn rows(&self) -> Option<&ResultTable> {
        match self {
            SearchOutcome::Matches(table) => Some(table),
            SearchOutcome::NoMatches => None,
        }
    }

    pub fn match_count(&self) -> usize {
        self.rows().map_or(0, ResultTable::len)
    }
}

/// Run a complete search: predicate filtering, projection, de-duplication.
pub fn filter(merged: &MergedTable, criteria: &SearchCriteria) -> SearchOutcome {
    let indices = apply_criteria(merged, criteria);
    let table = project_unique(merged, &indices);

    tracing::debug!(
        query = %criteria.query,
        strength = ?criteria.strength,
        candidates = indices.len(),
        results = table.len(),
        "Search applied"
    );

    if table.is_empty() {
        SearchOutcome::NoMatches
    } else {
        SearchOutcome::Matches(table)
    }
}

/// Indices of merged rows passing every active predicate.
///
/// Returns indices into `merged.records` in source order.
pub fn apply_criteria(merged: &MergedTable, criteria: &SearchCriteria) -> Vec<usize> {
    if criteria.is_empty() {
        return (0..merged.records.len()).collect();
    }

    let query_lower = criteria.query.to_lowercase();
    let strength_lower = criteria.strength.map(|s| s.token().to_lowercase());

    merged
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_all(record, &query_lower, strength_lower.as_deref()))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if a single merged row passes both predicates.
fn matches_all(record: &MergedRecord, query_lower: &str, strength_lower: Option<&str>) -> bool {
    // Text query over old-side identity columns
    if !query_lower.is_empty()
        && !contains_ci(record.product_code(), query_lower)
        && !contains_ci(record.product_description(), query_lower)
    {
        return false;
    }

    // Strength token over old and new descriptions
    if let Some(token) = strength_lower {
        if !contains_ci(record.product_description(), token)
            && !contains_ci(record.sku_name(), token)
        {
            return false;
        }
    }

    true
}

/// Case-insensitive substring test. Absent values never match.
fn contains_ci(value: Option<&str>, needle_lower: &str) -> bool {
    value.is_some_and(|v| v.to_lowercase().contains(needle_lower))
}

/// Project the selected rows and drop exact duplicates of the projection.
pub fn project_unique(merged: &MergedTable, indices: &[usize]) -> ResultTable {
    let mut seen: HashSet<ResultRow> = HashSet::with_capacity(indices.len());
    let mut rows = Vec::with_capacity(indices.len());

    for &idx in indices {
        let Some(record) = merged.records.get(idx) else {
            continue;
        };
        let row = ResultRow {
            product_code: record.product_code().map(str::to_string),
            product_description: record.product_description().map(str::to_string),
            sku_name: record.sku_name().map(str::to_string),
        };
        if seen.insert(row.clone()) {
            rows.push(row);
        }
    }

    ResultTable { rows }
}
