//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a base URL and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::QueryParams;
use crate::types::{Contact, ContactResults, ProductPage};

pub const PRODUCTS_PATH: &str = "products/";
pub const CONTACTS_PATH: &str = "contacts/";

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    /// `base_url` may be given with or without a trailing slash; endpoint
    /// paths are always joined beneath it.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: format!("{}/", base_url.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET products/` with the given filter and paging parameters.
    pub fn build_list_products(&self, query: &QueryParams) -> HttpRequest {
        self.get(PRODUCTS_PATH, query)
    }

    /// `GET contacts/?search=<text>`. Empty text is sent as-is.
    pub fn build_search_contacts(&self, text: &str) -> HttpRequest {
        self.get(CONTACTS_PATH, &QueryParams::new().with("search", text))
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<ProductPage, ApiError> {
        let page: ProductPage = decode(&response)?;
        page.validate()?;
        Ok(page)
    }

    pub fn parse_search_contacts(&self, response: HttpResponse) -> Result<Vec<Contact>, ApiError> {
        let envelope: ContactResults = decode(&response)?;
        Ok(envelope.results)
    }

    fn get(&self, path: &str, query: &QueryParams) -> HttpRequest {
        let mut url = format!("{}{path}", self.base_url);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.to_query_string());
        }
        HttpRequest {
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
