//! Rich diagnostic error types for provider adapters.
//!
//! These errors are internal to the search pipeline: adapter `search()`
//! reduces every failure to an empty contribution after logging, so the
//! aggregator caller never sees them. They do surface from the direct
//! lookup operations (volume details), where a failure is meaningful.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from provider HTTP calls and response decoding.
#[derive(Debug, Error, Diagnostic)]
pub enum ProviderError {
    #[error("request to {url} failed: {source}")]
    #[diagnostic(
        code(estante::provider::transport),
        help(
            "The catalog could not be reached. Check network connectivity, \
             or raise the timeout in SearchConfig if the provider is slow."
        )
    )]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP status {status}")]
    #[diagnostic(
        code(estante::provider::status),
        help(
            "The catalog rejected the request. A 403 from Google Books \
             usually means a missing or invalid API key; a 429 means the \
             provider is rate-limiting this client."
        )
    )]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    #[diagnostic(
        code(estante::provider::decode),
        help(
            "The response body did not match the expected schema. The \
             provider may have changed its response format."
        )
    )]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("volume not found: \"{id}\"")]
    #[diagnostic(
        code(estante::provider::volume_not_found),
        help(
            "No Google Books volume exists with this ID. Volume IDs come \
             from search results (the part after the `google-` prefix)."
        )
    )]
    VolumeNotFound { id: String },

    #[error("failed to build HTTP client: {source}")]
    #[diagnostic(
        code(estante::provider::client),
        help("The HTTP client could not be constructed. This usually indicates a broken TLS setup.")
    )]
    Client {
        #[source]
        source: reqwest::Error,
    },
}

/// Convenience alias for provider operation results.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
