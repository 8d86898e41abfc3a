//! # estante
//!
//! Multi-source book search with a local reading shelf.
//!
//! Searches fan out concurrently to four external catalogs (Google Books,
//! Open Library, the iTunes Store, WorldCat), normalize each catalog's
//! response into one `Book` schema, deduplicate across sources, score
//! relevance against the query, and rank. A heuristic language filter
//! biases results toward Brazilian Portuguese editions. Chosen results
//! land on a JSON-backed shelf that tracks reading status, page progress,
//! ratings, and reviews.
//!
//! ## Architecture
//!
//! - **Providers** (`providers`): one adapter per catalog; never fail,
//!   degrade to empty contributions
//! - **Aggregator** (`aggregate`): fire-all/await-all fan-out, dedup,
//!   filter, stable rank, cap
//! - **Scoring** (`score`) and **language heuristics** (`lang`): pure,
//!   deterministic
//! - **Shelf** (`shelf`): the reader's persistent collection
//!
//! ## Library usage
//!
//! ```no_run
//! use estante::aggregate::SearchClient;
//! use estante::config::SearchConfig;
//!
//! # async fn run() -> Result<(), estante::providers::ProviderError> {
//! let client = SearchClient::new(SearchConfig::default())?;
//! let results = client.search("Dom Casmurro").await;
//! for book in &results {
//!     println!("{} by {} [{}]", book.title, book.author, book.source);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod book;
pub mod config;
pub mod error;
pub mod isbn;
pub mod lang;
pub mod providers;
pub mod score;
pub mod shelf;
