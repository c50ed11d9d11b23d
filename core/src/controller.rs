//! State machine behind the product list page.
//!
//! # Design
//! The controller never performs I/O and never reads global state. It is
//! constructed with the current location's search string and a `Navigator`,
//! and every event handler returns the fetches the host must run as
//! `PendingFetch` values. The host executes each request and reports back
//! through `complete`, in whatever order responses arrive.
//!
//! Every fetch carries a monotonically increasing `Ticket`. Once a fetch of
//! some kind settles (applied or failed), every older fetch of that kind is
//! superseded: a slow response for `ac` can never overwrite the results for
//! `acme`, not even after `acme` failed. Superseded fetches are forgotten as
//! soon as a newer one settles, so hosts may abort or drop them without
//! completing. The page counts as loading while the newest product-list
//! fetch is outstanding.
//!
//! List failures leave the previous products and cursors in place. Search
//! failures leave the previous suggestions in place. Both are logged and
//! never returned to the event handler's caller.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::client::CatalogClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::pagination::PaginationState;
use crate::query::{extract_query_params_from_location, parse_query_from_cursor_url, QueryParams};
use crate::types::{Contact, Product};
use crate::view::{result_summary, PaginationControls, ProductListView, SuggestionRow};

/// Browser path of the product list page.
pub const PRODUCT_LIST_PATH: &str = "/products/";

const CONTACT_PARAM: &str = "contact";

/// Navigation callback injected by the host.
///
/// After navigating, the host is expected to report the new location's
/// search string through `ProductListController::location_changed`.
pub trait Navigator {
    fn navigate(&mut self, to: &str);
}

impl<F: FnMut(&str)> Navigator for F {
    fn navigate(&mut self, to: &str) {
        self(to)
    }
}

/// Sequence number of an issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    seq: u64,
    kind: FetchKind,
}

impl Ticket {
    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    fn is_older_than(&self, other: Ticket) -> bool {
        self.seq < other.seq
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    ProductList,
    ContactSearch,
}

/// A request the host must execute and report back via `complete`.
#[derive(Debug, Clone)]
pub struct PendingFetch {
    pub ticket: Ticket,
    pub kind: FetchKind,
    pub request: HttpRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
}

/// What `complete` did with a response.
#[derive(Debug)]
pub enum Completion {
    Applied,
    /// A newer fetch of the same kind already settled.
    Superseded,
    /// The fetch failed; state was left untouched.
    Failed(ApiError),
    /// The ticket was never issued or was already completed.
    Unknown,
}

impl Completion {
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied)
    }
}

pub struct ProductListController<N> {
    client: CatalogClient,
    navigator: N,
    location: String,

    products: Vec<Product>,
    pagination: PaginationState,
    phase: Phase,

    search_text: String,
    suggestions: Vec<Contact>,

    next_ticket: u64,
    /// Outstanding fetches newer than the settled cutoff of their kind, with
    /// the parameters each was sent with.
    in_flight: HashMap<Ticket, QueryParams>,
    newest_list: Option<Ticket>,
    settled_list: Option<Ticket>,
    settled_search: Option<Ticket>,
}

impl<N: Navigator> ProductListController<N> {
    pub fn new(client: CatalogClient, page_limit: u64, location: &str, navigator: N) -> Self {
        Self {
            client,
            navigator,
            location: location.to_string(),
            products: Vec::new(),
            pagination: PaginationState::new(page_limit),
            phase: Phase::Idle,
            search_text: String::new(),
            suggestions: Vec::new(),
            next_ticket: 0,
            in_flight: HashMap::new(),
            newest_list: None,
            settled_list: None,
            settled_search: None,
        }
    }

    /// First render: load the list for the current location and run the
    /// search for the current (initially empty) text.
    pub fn mount(&mut self) -> Vec<PendingFetch> {
        let list = self.load_products(QueryParams::new());
        let search = self.search();
        vec![list, search]
    }

    /// The browser's search string changed. Reloads from the first page.
    ///
    /// Returns `None` when the search string is unchanged.
    pub fn location_changed(&mut self, search: &str) -> Option<PendingFetch> {
        if self.location == search {
            return None;
        }
        self.location = search.to_string();
        Some(self.load_products(QueryParams::new()))
    }

    /// Fetch the product list with `query` layered over `paginate=true`.
    ///
    /// The `contact` filter from the current location always wins over one
    /// carried in `query`.
    pub fn load_products(&mut self, query: QueryParams) -> PendingFetch {
        let mut params = QueryParams::new().with("paginate", "true");
        params.merge(&query);
        let location = extract_query_params_from_location(&self.location);
        if let Some(contact) = location.get(CONTACT_PARAM).filter(|c| !c.is_empty()) {
            params.insert(CONTACT_PARAM, contact);
        }

        let request = self.client.build_list_products(&params);
        let fetch = self.issue(FetchKind::ProductList, params, request);
        self.newest_list = Some(fetch.ticket);
        self.phase = Phase::Loading;
        fetch
    }

    pub fn next_page(&mut self) -> Option<PendingFetch> {
        let cursor = self.pagination.next.clone()?;
        self.follow_cursor(&cursor)
    }

    pub fn previous_page(&mut self) -> Option<PendingFetch> {
        let cursor = self.pagination.previous.clone()?;
        self.follow_cursor(&cursor)
    }

    /// Keystroke in the search box. Every change issues a search; typing the
    /// same text again does not.
    pub fn search_input_changed(&mut self, text: impl Into<String>) -> Option<PendingFetch> {
        let text = text.into();
        if text == self.search_text {
            return None;
        }
        self.search_text = text;
        Some(self.search())
    }

    /// Mouse-down on a dropdown row: filter the list by that contact.
    pub fn select_suggestion(&mut self, contact_id: u64) {
        let target = format!(
            "{PRODUCT_LIST_PATH}?{}",
            QueryParams::new()
                .with(CONTACT_PARAM, contact_id.to_string())
                .to_query_string()
        );
        self.navigator.navigate(&target);
    }

    /// Clear the search box and drop the contact filter.
    ///
    /// Returns the search for the now-empty text if the box was not empty.
    pub fn reset(&mut self) -> Option<PendingFetch> {
        let fetch = self.search_input_changed(String::new());
        self.navigator.navigate(PRODUCT_LIST_PATH);
        fetch
    }

    /// Report the outcome of a fetch previously handed out.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Completion {
        if self
            .settled(ticket.kind)
            .is_some_and(|settled| ticket.is_older_than(settled))
        {
            debug!(?ticket, "dropping superseded response");
            return Completion::Superseded;
        }

        let Some(query) = self.in_flight.remove(&ticket) else {
            warn!(?ticket, "completion for unknown ticket");
            return Completion::Unknown;
        };

        match ticket.kind {
            FetchKind::ProductList => self.complete_list(ticket, query, outcome),
            FetchKind::ContactSearch => self.complete_search(ticket, outcome),
        }
    }

    pub fn view(&self) -> ProductListView<'_> {
        ProductListView {
            search_text: &self.search_text,
            suggestions: self.suggestions.iter().map(SuggestionRow::from).collect(),
            summary: result_summary(self.is_loading(), &self.pagination, "product"),
            controls: PaginationControls::from(&self.pagination),
            products: &self.products,
            loading: self.is_loading(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn suggestions(&self) -> &[Contact] {
        &self.suggestions
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    fn follow_cursor(&mut self, cursor: &str) -> Option<PendingFetch> {
        match parse_query_from_cursor_url(Some(cursor)) {
            Ok(query) => Some(self.load_products(query)),
            Err(e) => {
                warn!(error = %e, "ignoring undecodable pagination cursor");
                None
            }
        }
    }

    fn search(&mut self) -> PendingFetch {
        let request = self.client.build_search_contacts(&self.search_text);
        self.issue(FetchKind::ContactSearch, QueryParams::new(), request)
    }

    fn issue(&mut self, kind: FetchKind, query: QueryParams, request: HttpRequest) -> PendingFetch {
        self.next_ticket += 1;
        let ticket = Ticket {
            seq: self.next_ticket,
            kind,
        };
        debug!(?ticket, url = %request.url, "issuing fetch");
        self.in_flight.insert(ticket, query);
        PendingFetch {
            ticket,
            kind,
            request,
        }
    }

    fn complete_list(
        &mut self,
        ticket: Ticket,
        query: QueryParams,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Completion {
        let is_newest = self.newest_list == Some(ticket);
        if is_newest {
            self.newest_list = None;
        }

        let parsed = outcome.and_then(|response| self.client.parse_list_products(response));
        self.settle(ticket);

        match parsed {
            Ok(page) => {
                self.pagination = self.pagination.after_page(&page, &query);
                self.products = page.results;
                if self.newest_list.is_none() {
                    self.phase = Phase::Loaded;
                }
                Completion::Applied
            }
            Err(e) => {
                warn!(?ticket, error = %e, "failed to load products");
                if is_newest {
                    self.phase = Phase::Idle;
                }
                Completion::Failed(e)
            }
        }
    }

    fn complete_search(
        &mut self,
        ticket: Ticket,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Completion {
        let parsed = outcome.and_then(|response| self.client.parse_search_contacts(response));
        self.settle(ticket);

        match parsed {
            Ok(contacts) => {
                self.suggestions = contacts;
                Completion::Applied
            }
            Err(e) => {
                warn!(?ticket, error = %e, "contact search failed");
                Completion::Failed(e)
            }
        }
    }

    fn settled(&self, kind: FetchKind) -> Option<Ticket> {
        match kind {
            FetchKind::ProductList => self.settled_list,
            FetchKind::ContactSearch => self.settled_search,
        }
    }

    /// Mark `ticket` as the newest settled fetch of its kind and forget every
    /// older outstanding one.
    fn settle(&mut self, ticket: Ticket) {
        let slot = match ticket.kind {
            FetchKind::ProductList => &mut self.settled_list,
            FetchKind::ContactSearch => &mut self.settled_search,
        };
        if slot.is_some_and(|settled| !settled.is_older_than(ticket)) {
            return;
        }
        *slot = Some(ticket);
        self.in_flight
            .retain(|pending, _| pending.kind != ticket.kind || ticket.is_older_than(*pending));
    }
}
