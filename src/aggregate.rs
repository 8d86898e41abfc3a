//! Search aggregation: concurrent provider fan-out, merge, dedup, filter,
//! rank, cap.
//!
//! All providers are queried together and all are awaited: a failed or
//! slow catalog contributes an empty list (adapters reduce their own
//! failures, and the shared HTTP timeout bounds a hanging one), so the
//! join never aborts early and partial failure is invisible to callers.
//! Final ordering comes entirely from the deterministic relevance sort,
//! never from provider completion order.

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::join_all;

use crate::book::Book;
use crate::config::SearchConfig;
use crate::lang::book_looks_portuguese;
use crate::providers::{
    BookProvider, GoogleBooksProvider, ItunesProvider, OpenLibraryProvider, ProviderError,
    ProviderResult, WorldCatProvider,
};

/// How the caller's text should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Free-text search; each adapter applies its own ISBN rewriting.
    General,
    /// Author search; each adapter gets its author-scoped query syntax.
    ByAuthor,
}

/// Whether results are filtered to records with Portuguese signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageFilter {
    PortugueseOnly,
    All,
}

/// Caller-facing search client over the four catalog adapters.
pub struct SearchClient {
    providers: Vec<Arc<dyn BookProvider>>,
    google: GoogleBooksProvider,
    max_results: usize,
    portuguese_only: bool,
}

impl SearchClient {
    /// Build a client with the standard four adapters over one shared
    /// HTTP client.
    pub fn new(config: SearchConfig) -> ProviderResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| ProviderError::Client { source })?;

        let providers: Vec<Arc<dyn BookProvider>> = vec![
            Arc::new(GoogleBooksProvider::new(http.clone(), &config)),
            Arc::new(OpenLibraryProvider::new(http.clone(), &config)),
            Arc::new(ItunesProvider::new(http.clone(), &config)),
            Arc::new(WorldCatProvider::new(http.clone(), &config)),
        ];

        Ok(Self {
            providers,
            google: GoogleBooksProvider::new(http, &config),
            max_results: config.max_results,
            portuguese_only: config.portuguese_only,
        })
    }

    /// Build a client over caller-supplied adapters. Used by tests to
    /// inject mock providers; the volume-details lookup still goes to the
    /// configured Google endpoint.
    pub fn with_providers(
        providers: Vec<Arc<dyn BookProvider>>,
        config: &SearchConfig,
    ) -> ProviderResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| ProviderError::Client { source })?;

        Ok(Self {
            providers,
            google: GoogleBooksProvider::new(http, config),
            max_results: config.max_results,
            portuguese_only: config.portuguese_only,
        })
    }

    fn default_filter(&self) -> LanguageFilter {
        if self.portuguese_only {
            LanguageFilter::PortugueseOnly
        } else {
            LanguageFilter::All
        }
    }

    /// General free-text search across all catalogs, with the configured
    /// language policy.
    pub async fn search(&self, query: &str) -> Vec<Book> {
        self.search_with(query, SearchMode::General, self.default_filter())
            .await
    }

    /// Author-scoped search across all catalogs.
    pub async fn search_by_author(&self, name: &str) -> Vec<Book> {
        self.search_with(name, SearchMode::ByAuthor, self.default_filter())
            .await
    }

    /// Full-control entry point: query all providers concurrently, merge,
    /// dedup, filter, rank, and cap.
    ///
    /// A blank query returns empty immediately, with no provider invoked.
    pub async fn search_with(
        &self,
        query: &str,
        mode: SearchMode,
        filter: LanguageFilter,
    ) -> Vec<Book> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let futures = self.providers.iter().map(|provider| {
            let provider_query = match mode {
                SearchMode::General => query.to_string(),
                SearchMode::ByAuthor => provider.author_query(query),
            };
            async move {
                let books = provider.search(&provider_query).await;
                tracing::debug!(
                    provider = %provider.source(),
                    count = books.len(),
                    "provider settled"
                );
                books
            }
        });

        let settled = join_all(futures).await;
        let merged: Vec<Book> = settled.into_iter().flatten().collect();
        tracing::debug!(query, merged = merged.len(), "all providers settled");

        let mut books = dedup(merged);
        if filter == LanguageFilter::PortugueseOnly {
            books.retain(|book| book_looks_portuguese(book));
        }
        rank(&mut books);
        books.truncate(self.max_results);
        books
    }

    /// Detailed record for one Google Books volume.
    ///
    /// Accepts either the native volume ID or the `google-` prefixed form
    /// that search results carry.
    pub async fn book_details(&self, volume_id: &str) -> ProviderResult<Book> {
        let native_id = volume_id.strip_prefix("google-").unwrap_or(volume_id);
        self.google.volume(native_id).await
    }
}

/// Drop records whose title+author key was already seen; first occurrence
/// wins, even across sources. Idempotent.
pub fn dedup(books: Vec<Book>) -> Vec<Book> {
    let mut seen = HashSet::new();
    books
        .into_iter()
        .filter(|book| seen.insert(book.dedup_key()))
        .collect()
}

/// Stable descending sort by relevance score: ties keep their pre-sort
/// (post-filter) order.
pub fn rank(books: &mut [Book]) {
    books.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::{BookSource, placeholder_cover};

    fn sample(id: &str, title: &str, author: &str, score: u32) -> Book {
        Book {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            cover: placeholder_cover(title),
            description: String::new(),
            publisher: String::new(),
            published_date: String::new(),
            page_count: 0,
            categories: vec![],
            isbn: String::new(),
            source: BookSource::GoogleBooks,
            relevance_score: score,
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence_across_case_variants() {
        let books = vec![
            sample("google-1", "Dom Casmurro", "Machado de Assis", 10),
            sample("itunes-2", "DOM CASMURRO", "MACHADO DE ASSIS", 99),
            sample("google-3", "Outro", "Autor", 5),
        ];
        let unique = dedup(books);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].id, "google-1");
    }

    #[test]
    fn dedup_is_idempotent() {
        let books = vec![
            sample("a", "X", "Y", 1),
            sample("b", "X", "Y", 2),
            sample("c", "Z", "W", 3),
        ];
        let once = dedup(books);
        let twice = dedup(once.clone());
        assert_eq!(once.len(), twice.len());
        let ids: Vec<_> = once.iter().map(|b| b.id.as_str()).collect();
        let ids_twice: Vec<_> = twice.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ids_twice);
    }

    #[test]
    fn rank_is_stable_for_ties() {
        let mut books = vec![
            sample("a", "A", "1", 50),
            sample("b", "B", "2", 70),
            sample("c", "C", "3", 50),
            sample("d", "D", "4", 70),
        ];
        rank(&mut books);
        let ids: Vec<_> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["b", "d", "a", "c"]);
    }
}
