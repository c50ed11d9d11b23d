//! Domain DTOs for the catalog API.
//!
//! # Design
//! The backend's records are modelled as explicit structs with required
//! fields, so a response missing `id` or `company_name` fails at the HTTP
//! boundary instead of rendering as a blank row. These types mirror the
//! mock-server's schema but are defined independently; integration tests
//! catch drift between the two crates.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A product row as listed by `GET products/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub sku: String,
    /// Decimal price, serialized by the backend as a string.
    pub price: String,
    /// Id of the contact that supplies this product, if any.
    #[serde(default)]
    pub contact: Option<u64>,
}

/// A contact as returned by `GET contacts/?search=`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: u64,
    pub company_name: String,
}

/// Paginated envelope of the product list endpoint.
///
/// `next` and `previous` are opaque cursor URLs; replay them through
/// `query::parse_query_from_cursor_url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductPage {
    pub results: Vec<Product>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub count: u64,
}

impl ProductPage {
    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.results.len() as u64 > self.count {
            return Err(ApiError::MalformedResponse(format!(
                "page holds {} results but count is {}",
                self.results.len(),
                self.count
            )));
        }
        Ok(())
    }
}

/// Envelope of the contact search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactResults {
    pub results: Vec<Contact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_contact_defaults_to_none() {
        let product: Product =
            serde_json::from_str(r#"{"id":1,"name":"Bolt","sku":"B-1","price":"0.40"}"#).unwrap();
        assert_eq!(product.contact, None);
    }

    #[test]
    fn contact_requires_company_name() {
        let result: Result<Contact, _> = serde_json::from_str(r#"{"id":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn page_with_more_results_than_count_is_rejected() {
        let page = ProductPage {
            results: vec![Product {
                id: 1,
                name: "Bolt".to_string(),
                sku: "B-1".to_string(),
                price: "0.40".to_string(),
                contact: None,
            }],
            next: None,
            previous: None,
            count: 0,
        };
        assert!(matches!(page.validate(), Err(ApiError::MalformedResponse(_))));
    }
}
