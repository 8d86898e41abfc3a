//! Provider adapters: one client per external book catalog.
//!
//! Each adapter translates one catalog's native response shape into the
//! common [`Book`](crate::book::Book) schema. The contract is uniform:
//! `search()` never fails: a blank query short-circuits to an empty list
//! with no network call, and any transport or decode failure is logged and
//! reduced to an empty contribution. The aggregator composes adapters
//! without caring which ones succeeded.

pub mod error;
pub mod google;
pub mod itunes;
pub mod open_library;
pub mod worldcat;

use async_trait::async_trait;

use crate::book::{Book, BookSource};

pub use error::{ProviderError, ProviderResult};
pub use google::GoogleBooksProvider;
pub use itunes::ItunesProvider;
pub use open_library::OpenLibraryProvider;
pub use worldcat::WorldCatProvider;

/// A provider-specific search client over one external catalog.
#[async_trait]
pub trait BookProvider: Send + Sync {
    /// Which catalog this adapter fronts.
    fn source(&self) -> BookSource;

    /// Rewrite an author name into this catalog's author-scoped query
    /// syntax. Catalogs without one search the raw name.
    fn author_query(&self, name: &str) -> String {
        name.to_string()
    }

    /// Search the catalog, returning normalized records.
    ///
    /// Never fails: blank queries return empty without a network call, and
    /// any failure degrades to an empty list after a structured log.
    async fn search(&self, query: &str) -> Vec<Book>;
}
