// SkuFinder - app/state.rs
//
// Presentation-facing state: the current criteria, the latest search
// outcome, and the status line shown to the user. Row identity is the index
// into the current ResultTable; no other per-row state is kept.

use crate::app::session::LookupSession;
use crate::core::filter::SearchOutcome;
use crate::core::model::{ResultRow, ResultTable, SearchCriteria};

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
}

/// Top-level application state for one interactive session.
#[derive(Debug)]
pub struct AppState {
    /// Criteria of the most recent search.
    pub criteria: SearchCriteria,

    /// Outcome of the most recent search. None before the first search.
    pub outcome: Option<SearchOutcome>,

    /// Index of the selected result row, if any.
    pub selected_index: Option<usize>,

    /// Status message for the status line.
    pub status_message: String,

    pub status_kind: StatusKind,

    /// Non-fatal warnings (config problems etc.) to show once.
    pub warnings: Vec<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            criteria: SearchCriteria::default(),
            outcome: None,
            selected_index: None,
            status_message: "Ready. Enter a product code or description to search.".to_string(),
            status_kind: StatusKind::Info,
            warnings: Vec::new(),
        }
    }

    /// Run `criteria` against `session` and update the status line.
    pub fn submit_search(&mut self, session: &LookupSession, criteria: SearchCriteria) {
        let outcome = session.search(&criteria);

        match &outcome {
            SearchOutcome::Matches(rows) => {
                self.status_message = format!("Found {} matching product(s)", rows.len());
                self.status_kind = StatusKind::Success;
            }
            SearchOutcome::NoMatches => {
                self.status_message = "No matches found.".to_string();
                self.status_kind = StatusKind::Warning;
            }
        }

        self.criteria = criteria;
        self.outcome = Some(outcome);
        self.selected_index = None;
    }

    /// Rows of the latest successful search.
    pub fn results(&self) -> Option<&ResultTable> {
        self.outcome.as_ref().and_then(SearchOutcome::rows)
    }

    /// Select a result row by index. Out-of-range indices clear the selection.
    pub fn select(&mut self, index: usize) {
        let len = self.results().map_or(0, ResultTable::len);
        self.selected_index = (index < len).then_some(index);
    }

    /// Get the currently selected row, if any.
    pub fn selected_row(&self) -> Option<&ResultRow> {
        self.selected_index
            .and_then(|idx| self.results().and_then(|rows| rows.get(idx)))
    }

    /// Whether an export can be offered. Never true for an empty result.
    pub fn can_export(&self) -> bool {
        self.results().is_some_and(|rows| !rows.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{MergedRecord, MergedTable, OldRecord};

    fn session() -> LookupSession {
        LookupSession::from_merged(MergedTable {
            records: vec![MergedRecord {
                old: OldRecord {
                    product_code: Some("B2".to_string()),
                    product_description: Some("Baz".to_string()),
                    extra: Vec::new(),
                },
                new: None,
            }],
            ..Default::default()
        })
    }

    #[test]
    fn test_success_status() {
        let mut state = AppState::new();
        state.submit_search(&session(), SearchCriteria::default());
        assert_eq!(state.status_message, "Found 1 matching product(s)");
        assert_eq!(state.status_kind, StatusKind::Success);
        assert!(state.can_export());
    }

    #[test]
    fn test_no_matches_status() {
        let mut state = AppState::new();
        state.submit_search(
            &session(),
            SearchCriteria {
                query: "xyz".to_string(),
                strength: None,
            },
        );
        assert_eq!(state.status_message, "No matches found.");
        assert_eq!(state.status_kind, StatusKind::Warning);
        assert!(!state.can_export());
        assert!(state.results().is_none());
    }

    #[test]
    fn test_selection_by_index() {
        let mut state = AppState::new();
        state.submit_search(&session(), SearchCriteria::default());
        state.select(0);
        assert_eq!(
            state.selected_row().map(|r| r.new_description_label()),
            Some("Not Found")
        );
        state.select(5);
        assert!(state.selected_row().is_none());
    }
}
