//! Pure projections of controller state into what the page shows.

use crate::pagination::PaginationState;
use crate::types::{Contact, Product};

/// Everything the page renders, borrowed from the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListView<'a> {
    pub search_text: &'a str,
    pub suggestions: Vec<SuggestionRow<'a>>,
    pub summary: String,
    pub controls: PaginationControls,
    pub products: &'a [Product],
    pub loading: bool,
}

/// One clickable line in the search dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionRow<'a> {
    pub id: u64,
    pub label: &'a str,
}

impl<'a> From<&'a Contact> for SuggestionRow<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            id: contact.id,
            label: &contact.company_name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    pub next_enabled: bool,
    pub previous_enabled: bool,
}

impl From<&PaginationState> for PaginationControls {
    fn from(state: &PaginationState) -> Self {
        Self {
            next_enabled: state.next.is_some(),
            previous_enabled: state.previous.is_some(),
        }
    }
}

/// The result-count line above the table, e.g. `Showing 11-20 of 57 products`.
///
/// While loading, the busy indicator replaces the count. A range that does
/// not fit in `u64` (a nonsensical cursor offset) falls back to the count.
pub fn result_summary(loading: bool, pagination: &PaginationState, noun: &str) -> String {
    if loading {
        return format!("Loading {noun}s...");
    }
    match pagination.count {
        None => format!("No {noun}s"),
        Some(0) => format!("0 {noun}s"),
        Some(count) => {
            let start = pagination.offset.unwrap_or(0);
            let first = start.checked_add(1);
            let last = start.checked_add(pagination.results_count as u64);
            match first.zip(last) {
                Some((first, last)) => format!("Showing {first}-{last} of {count} {noun}s"),
                None => format!("{count} {noun}s"),
            }
        }
    }
}
