pub mod config;

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;
use url::form_urlencoded;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub sku: String,
    pub price: String,
    pub contact: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: u64,
    pub company_name: String,
}

/// Limit/offset page with absolute cursor links.
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResults {
    pub results: Vec<Contact>,
}

/// Read-only data served by the mock backend.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub contacts: Vec<Contact>,
    pub page_limit: u64,
}

const COMPANIES: [&str; 5] = [
    "Acme Corporation",
    "Acorn Supplies",
    "Globex",
    "Initech",
    "Umbrella Trading",
];

const ITEMS: [&str; 5] = ["Bolt", "Bracket", "Gasket", "Hinge", "Washer"];

impl Catalog {
    /// 25 products spread across 5 contacts; every sixth product has no
    /// contact.
    pub fn seeded(page_limit: u64) -> Self {
        let contacts = COMPANIES
            .iter()
            .zip(1..)
            .map(|(name, id)| Contact {
                id,
                company_name: name.to_string(),
            })
            .collect();

        let products = (1..=25u64)
            .map(|id| Product {
                id,
                name: format!("{} #{id}", ITEMS[(id % 5) as usize]),
                sku: format!("SKU-{id:04}"),
                price: format!("{}.{:02}", id * 3, (id * 17) % 100),
                contact: (id % 6 != 0).then_some(id % 5 + 1),
            })
            .collect();

        Self {
            products,
            contacts,
            page_limit,
        }
    }
}

pub type SharedCatalog = Arc<Catalog>;

pub fn app() -> Router {
    app_with(Catalog::seeded(config::DEFAULT_PAGE_LIMIT))
}

pub fn app_with(catalog: Catalog) -> Router {
    Router::new()
        .route("/products/", get(list_products))
        .route("/contacts/", get(search_contacts))
        .with_state(Arc::new(catalog))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(catalog)).await
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub paginate: Option<bool>,
    pub contact: Option<u64>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

async fn list_products(
    State(catalog): State<SharedCatalog>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Response {
    let matching: Vec<&Product> = catalog
        .products
        .iter()
        .filter(|p| params.contact.is_none() || p.contact == params.contact)
        .collect();

    if params.paginate != Some(true) {
        debug!(count = matching.len(), "listing products unpaginated");
        return Json(matching).into_response();
    }

    let limit = params.limit.filter(|l| *l > 0).unwrap_or(catalog.page_limit);
    let offset = params.offset.unwrap_or(0);
    let count = matching.len() as u64;
    debug!(count, limit, offset, contact = ?params.contact, "listing products");

    let base = match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{host}/products/"),
        None => "/products/".to_string(),
    };
    let link = |offset: u64| page_link(&base, params.contact, limit, offset);

    let end = offset.saturating_add(limit);
    let next = (end < count).then(|| link(end));
    let previous = (offset > 0).then(|| link(offset.saturating_sub(limit)));

    let page = Page {
        results: matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect(),
        next,
        previous,
        count,
    };
    Json(page).into_response()
}

/// Cursor URL for the page starting at `offset`. The first page omits
/// `offset` entirely.
fn page_link(base: &str, contact: Option<u64>, limit: u64, offset: u64) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(contact) = contact {
        query.append_pair("contact", &contact.to_string());
    }
    query.append_pair("limit", &limit.to_string());
    if offset > 0 {
        query.append_pair("offset", &offset.to_string());
    }
    query.append_pair("paginate", "true");
    format!("{base}?{}", query.finish())
}

async fn search_contacts(
    State(catalog): State<SharedCatalog>,
    Query(params): Query<SearchParams>,
) -> Json<ContactResults> {
    let needle = params.search.unwrap_or_default().to_lowercase();
    let results: Vec<Contact> = catalog
        .contacts
        .iter()
        .filter(|c| c.company_name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    debug!(search = %needle, hits = results.len(), "searching contacts");
    Json(ContactResults { results })
}
