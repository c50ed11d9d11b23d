//! Mock backend settings read from the environment.

use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::info;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

#[derive(Debug, Error)]
#[error("invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Page size used when a request carries no `limit`.
    pub page_limit: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = try_load(&lookup, "PORT", DEFAULT_PORT)?;
        let page_limit = try_load(&lookup, "PAGE_LIMIT", DEFAULT_PAGE_LIMIT)?;
        if page_limit == 0 {
            return Err(ConfigError {
                key: "PAGE_LIMIT",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(Self { port, page_limit })
    }
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(value) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError {
        key,
        reason: e.to_string(),
        value,
    })
}
