//! Host-agnostic core of the product catalog browser.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the stateless
//! `CatalogClient` sits `ProductListController`, the page's state machine:
//! it owns the product list, pagination cursors and contact-search
//! suggestions, and tells the host which requests to run.
//!
//! # Design
//! - `CatalogClient` is stateless; it holds only the backend base URL.
//! - Each endpoint is split into `build_*` and `parse_*`, so the I/O boundary
//!   is explicit.
//! - The controller receives the browser location and a `Navigator` instead
//!   of reading globals, and sequences fetches with tickets so late responses
//!   never overwrite newer state.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod pagination;
pub mod query;
pub mod types;
pub mod view;

pub use client::CatalogClient;
pub use config::{ClientConfig, ConfigError};
pub use controller::{
    Completion, FetchKind, Navigator, PendingFetch, Phase, ProductListController, Ticket,
};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse};
pub use pagination::PaginationState;
pub use query::{
    extract_query_params_from_location, parse_query_from_cursor_url, search_of, QueryParams,
};
pub use types::{Contact, ContactResults, Product, ProductPage};
pub use view::{result_summary, PaginationControls, ProductListView, SuggestionRow};
