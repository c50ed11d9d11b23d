//! Error types for the catalog API client.
//!
//! # Design
//! `NotFound` keeps a dedicated variant, and every other non-2xx response
//! lands in `HttpError` with the raw status and body. A body that is not JSON
//! (`DeserializationError`) is reported apart from JSON that breaks the
//! envelope's rules (`MalformedResponse`). `Transport` never comes from
//! this crate directly: hosts use it to report a round-trip that produced no
//! response at all.

use thiserror::Error;

/// Errors produced by `CatalogClient`, the query codec and host transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The body deserialized but violates the envelope's invariants.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request never produced a response (connection refused, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A cursor or base URL could not be parsed.
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}
