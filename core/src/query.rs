//! Query-string codec for page locations and pagination cursors.
//!
//! # Design
//! `QueryParams` keeps pairs in insertion order with unique keys, so merged
//! parameter sets serialize deterministically. Overriding a key keeps its
//! original position. When a raw query string repeats a key, the first
//! occurrence wins, the same rule `URLSearchParams.get` follows.
//!
//! Cursor URLs are opaque: whatever the backend embeds (`offset`, `limit`,
//! `contact`, ...) comes back out without a fixed schema.

use url::{form_urlencoded, Url};

use crate::error::ApiError;

/// Origin used to resolve relative cursor URLs. Only the query survives.
const PLACEHOLDER_ORIGIN: &str = "http://placeholder.invalid/";

/// Ordered, key-unique query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a form-urlencoded query string (no leading `?`).
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if params.get(&key).is_none() {
                params.pairs.push((key.into_owned(), value.into_owned()));
            }
        }
        params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(index).1)
    }

    /// Merge `other` into `self`; values from `other` win.
    pub fn merge(&mut self, other: &QueryParams) {
        for (key, value) in &other.pairs {
            self.insert(key.as_str(), value.as_str());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode as `application/x-www-form-urlencoded`, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// Read the parameters of a page location's search string.
///
/// Accepts `window.location.search`-style input (`?contact=4`) as well as a
/// bare query (`contact=4`). An empty string yields no parameters.
pub fn extract_query_params_from_location(search: &str) -> QueryParams {
    QueryParams::parse(search.strip_prefix('?').unwrap_or(search))
}

/// The search part (`?...`) of a browser path, or `""` when it has none.
///
/// Like `location.search`, a trailing `#fragment` is not part of it.
pub fn search_of(location: &str) -> &str {
    let location = location.split_once('#').map_or(location, |(before, _)| before);
    location.find('?').map_or("", |start| &location[start..])
}

/// Decode the query embedded in a pagination cursor.
///
/// `None` (no further page) yields an empty map. Relative cursors such as
/// `/products/?offset=20` or `?offset=20` are accepted.
pub fn parse_query_from_cursor_url(url: Option<&str>) -> Result<QueryParams, ApiError> {
    let Some(raw) = url else {
        return Ok(QueryParams::new());
    };

    let invalid = |reason: url::ParseError| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let parsed = match Url::parse(raw) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(PLACEHOLDER_ORIGIN)
            .and_then(|origin| origin.join(raw))
            .map_err(invalid)?,
        Err(e) => return Err(invalid(e)),
    };

    Ok(parsed.query().map(QueryParams::parse).unwrap_or_default())
}
