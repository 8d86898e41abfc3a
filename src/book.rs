//! The normalized book record shared by every provider.
//!
//! Providers translate wildly different response shapes (Google volumes,
//! Open Library docs, iTunes tracks, WorldCat atom entries) into this one
//! schema. Every field is always present: absence in the source is
//! represented by a sentinel, never by `None`, so downstream code (dedup,
//! scoring, rendering) never branches on missing data.

use serde::{Deserialize, Serialize};

/// Sentinel used when a source omits the title.
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Sentinel used when a source omits the author(s).
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
/// Sentinel used when a source omits the publisher.
pub const UNKNOWN_PUBLISHER: &str = "Unknown Publisher";
/// Sentinel used when a source omits the publication date.
pub const UNKNOWN_DATE: &str = "Unknown Date";
/// Sentinel used when a source omits the description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Which external catalog a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookSource {
    GoogleBooks,
    OpenLibrary,
    Itunes,
    WorldCat,
}

impl BookSource {
    /// Human-readable name for labels and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoogleBooks => "Google Books",
            Self::OpenLibrary => "Open Library",
            Self::Itunes => "iTunes",
            Self::WorldCat => "WorldCat",
        }
    }

    /// Prefix used to namespace record IDs (e.g. `google-<native-id>`).
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::GoogleBooks => "google",
            Self::OpenLibrary => "openlibrary",
            Self::Itunes => "itunes",
            Self::WorldCat => "worldcat",
        }
    }
}

impl std::fmt::Display for BookSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized search result.
///
/// Constructed fresh per search call; immutable once built. The aggregator
/// reads `relevance_score` for ranking but never rewrites provider-assigned
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Globally unique ID, prefixed by source (`google-...`, `itunes-...`).
    pub id: String,
    pub title: String,
    /// Multiple authors joined by `", "`.
    pub author: String,
    /// Cover image URL; a generated placeholder when the source has none.
    pub cover: String,
    pub description: String,
    pub publisher: String,
    pub published_date: String,
    /// Page count, 0 when unknown.
    pub page_count: u32,
    /// Subject tags, capped to a small prefix by each provider.
    pub categories: Vec<String>,
    /// Primary ISBN, possibly empty.
    pub isbn: String,
    pub source: BookSource,
    /// Match score against the originating query, computed post-parse.
    pub relevance_score: u32,
}

impl Book {
    /// Composite dedup key: lower-cased title + "-" + lower-cased author.
    ///
    /// Two records with the same key are the same work regardless of which
    /// catalog reported them; the aggregator keeps the first occurrence.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}-{}",
            self.title.to_lowercase(),
            self.author.to_lowercase()
        )
    }
}

/// Build a placeholder cover URL embedding a short title fragment.
///
/// Used by every provider when the source has no cover image. The fragment
/// is the first 15 characters of the title with whitespace collapsed to
/// `+`, or `No+Title` for an empty title.
pub fn placeholder_cover(title: &str) -> String {
    let fragment: String = title
        .chars()
        .take(15)
        .map(|c| if c.is_whitespace() { '+' } else { c })
        .collect();
    let fragment = if fragment.is_empty() {
        "No+Title".to_string()
    } else {
        fragment
    };
    format!("https://via.placeholder.com/150x220/4A5568/FFFFFF?text={fragment}")
}
