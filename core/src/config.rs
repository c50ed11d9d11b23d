//! Environment-driven client configuration.
//!
//! Unset variables fall back to defaults with an `info!` line; set but
//! unusable values are errors rather than silent fallbacks.

use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::info;
use url::Url;

use crate::client::CatalogClient;

pub const BACKEND_BASE_VAR: &str = "CATALOG_BACKEND_BASE";
pub const PAGE_LIMIT_VAR: &str = "CATALOG_PAGE_LIMIT";

pub const DEFAULT_BACKEND_BASE: &str = "http://127.0.0.1:3000/";
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Seeds `PaginationState::limit` for display. Never sent to the backend;
    /// the server applies its own default until a cursor carries `limit`.
    pub page_limit: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_BASE.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url: String = try_load(&lookup, BACKEND_BASE_VAR, DEFAULT_BACKEND_BASE)?;
        if let Err(e) = Url::parse(&base_url) {
            return Err(ConfigError::Invalid {
                key: BACKEND_BASE_VAR,
                value: base_url,
                reason: e.to_string(),
            });
        }

        let page_limit: u64 = try_load(&lookup, PAGE_LIMIT_VAR, &DEFAULT_PAGE_LIMIT.to_string())?;
        if page_limit == 0 {
            return Err(ConfigError::Invalid {
                key: PAGE_LIMIT_VAR,
                value: page_limit.to_string(),
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            base_url,
            page_limit,
        })
    }

    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&self.base_url)
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn reads_both_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BACKEND_BASE_VAR, "https://crm.example.com/api"),
            (PAGE_LIMIT_VAR, "25"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://crm.example.com/api");
        assert_eq!(config.page_limit, 25);
        assert_eq!(config.client().base_url(), "https://crm.example.com/api/");
    }

    #[test]
    fn rejects_zero_limit() {
        let err = ClientConfig::from_lookup(lookup(&[(PAGE_LIMIT_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: PAGE_LIMIT_VAR, .. }));
    }

    #[test]
    fn rejects_non_numeric_limit() {
        let err = ClientConfig::from_lookup(lookup(&[(PAGE_LIMIT_VAR, "ten")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: PAGE_LIMIT_VAR, .. }));
    }

    #[test]
    fn rejects_relative_base() {
        let err = ClientConfig::from_lookup(lookup(&[(BACKEND_BASE_VAR, "api/")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: BACKEND_BASE_VAR, .. }));
    }
}
