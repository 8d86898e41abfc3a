//! Search configuration.
//!
//! All provider endpoints, caps, and policies live here and are injected
//! at construction time; there are no process-wide constants, so tests
//! point adapters at mock endpoints by swapping a field.

use std::time::Duration;

/// Configuration for the search aggregator and its provider adapters.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Google Books volumes endpoint.
    pub google_endpoint: String,
    /// Optional Google Books API key, sent as the `key` query parameter.
    pub google_api_key: Option<String>,
    /// Open Library root (search + detail fetches are relative to this).
    pub open_library_endpoint: String,
    /// iTunes Store search endpoint.
    pub itunes_endpoint: String,
    /// WorldCat OpenSearch endpoint.
    pub worldcat_endpoint: String,

    /// Per-request timeout applied to every provider call. One slow
    /// catalog must not delay the fan-in join indefinitely; a timed-out
    /// provider contributes nothing, like any other failure.
    pub timeout: Duration,

    /// Raw result cap requested from Google Books.
    pub google_limit: usize,
    /// Result cap for Open Library. Kept low: each hit costs a secondary
    /// detail fetch.
    pub open_library_limit: usize,
    /// Raw result cap requested from iTunes.
    pub itunes_limit: usize,
    /// Raw result cap requested from WorldCat.
    pub worldcat_limit: usize,

    /// Final aggregated result cap.
    pub max_results: usize,
    /// Whether searches keep only records with Portuguese signals by
    /// default. Callers can override per call.
    pub portuguese_only: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            google_endpoint: "https://www.googleapis.com/books/v1/volumes".into(),
            google_api_key: None,
            open_library_endpoint: "https://openlibrary.org".into(),
            itunes_endpoint: "https://itunes.apple.com/search".into(),
            worldcat_endpoint:
                "https://www.worldcat.org/webservices/catalog/search/worldcat/opensearch".into(),
            timeout: Duration::from_secs(10),
            google_limit: 20,
            open_library_limit: 10,
            itunes_limit: 20,
            worldcat_limit: 20,
            max_results: 30,
            portuguese_only: true,
        }
    }
}
