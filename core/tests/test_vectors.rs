//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use catalog_core::{
    parse_query_from_cursor_url, ApiError, CatalogClient, Contact, HttpResponse, ProductPage,
    QueryParams,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> CatalogClient {
    CatalogClient::new(BASE_URL)
}

/// Read a `[[key, value], ...]` array into `QueryParams`.
fn params(value: &serde_json::Value) -> QueryParams {
    let mut params = QueryParams::new();
    for pair in value.as_array().unwrap() {
        let pair = pair.as_array().unwrap();
        params.insert(pair[0].as_str().unwrap(), pair[1].as_str().unwrap());
    }
    params
}

fn headers(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_error_kind(name: &str, err: ApiError, expected: &str) {
    let matched = match expected {
        "NotFound" => matches!(err, ApiError::NotFound),
        "HttpError" => matches!(err, ApiError::HttpError { .. }),
        "DeserializationError" => matches!(err, ApiError::DeserializationError(_)),
        "MalformedResponse" => matches!(err, ApiError::MalformedResponse(_)),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {expected}, got {err:?}");
}

// ---------------------------------------------------------------------------
// List products
// ---------------------------------------------------------------------------

#[test]
fn list_products_test_vectors() {
    let raw = include_str!("../../test-vectors/list_products.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_list_products(&params(&case["input_query"]));
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.headers, headers(&expected_req["headers"]), "{name}: headers");

        // Verify parse
        let result = c.parse_list_products(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let page = result.unwrap();
            let expected: ProductPage = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(page, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Search contacts
// ---------------------------------------------------------------------------

#[test]
fn search_contacts_test_vectors() {
    let raw = include_str!("../../test-vectors/search_contacts.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_search_contacts(case["input_text"].as_str().unwrap());
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.headers, headers(&expected_req["headers"]), "{name}: headers");

        // Verify parse
        let result = c.parse_search_contacts(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let contacts = result.unwrap();
            let expected: Vec<Contact> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(contacts, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Cursors
// ---------------------------------------------------------------------------

#[test]
fn cursor_test_vectors() {
    let raw = include_str!("../../test-vectors/cursors.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let decoded = parse_query_from_cursor_url(case["url"].as_str()).unwrap();
        assert_eq!(decoded, params(&case["expected"]), "{name}: decoded params");
    }
}
