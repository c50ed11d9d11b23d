//! Cursor bookkeeping for the product list.

use crate::query::QueryParams;
use crate::types::ProductPage;

/// Pagination metadata shown alongside the product table.
///
/// Replaced wholesale after every applied list fetch; never patched field by
/// field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    pub next: Option<String>,
    pub previous: Option<String>,
    pub count: Option<u64>,
    pub results_count: usize,
    pub offset: Option<u64>,
    /// The backend pages by limit/offset; cursors always carry `offset`.
    pub has_offset: bool,
    /// Display-only page size: the configured default until a request carries
    /// a numeric `limit`.
    pub limit: u64,
}

impl PaginationState {
    pub fn new(limit: u64) -> Self {
        Self {
            next: None,
            previous: None,
            count: None,
            results_count: 0,
            offset: None,
            has_offset: true,
            limit,
        }
    }

    /// State after `page` arrived for a request sent with `query`.
    ///
    /// A non-numeric `offset` or `limit` in the request is treated as absent.
    pub fn after_page(&self, page: &ProductPage, query: &QueryParams) -> Self {
        Self {
            next: page.next.clone(),
            previous: page.previous.clone(),
            count: Some(page.count),
            results_count: page.results.len(),
            offset: numeric(query, "offset"),
            has_offset: self.has_offset,
            limit: numeric(query, "limit").unwrap_or(self.limit),
        }
    }
}

fn numeric(query: &QueryParams, key: &str) -> Option<u64> {
    query.get(key).and_then(|value| value.parse().ok())
}
