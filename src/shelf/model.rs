//! Shelf entry types: a search result plus the reader's own state.

use serde::{Deserialize, Serialize};

use crate::book::Book;

/// Where a book sits in the reading lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    Unread,
    Reading,
    Finished,
}

impl ReadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Reading => "reading",
            Self::Finished => "finished",
        }
    }
}

impl std::fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unread" => Ok(Self::Unread),
            "reading" => Ok(Self::Reading),
            "finished" => Ok(Self::Finished),
            other => Err(format!(
                "unknown status \"{other}\" (expected unread, reading, or finished)"
            )),
        }
    }
}

/// One book on the shelf: the normalized record plus reading state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelfEntry {
    /// Same namespaced ID as the search result the entry came from.
    pub id: String,
    pub book: Book,
    pub status: ReadingStatus,
    /// Last page read, 0 when not started. Never exceeds the book's page
    /// count when that is known.
    pub current_page: u32,
    /// Star rating, 1–5.
    pub rating: Option<u8>,
    pub review: Option<String>,
    /// Seconds since UNIX epoch.
    pub added_at: u64,
    pub updated_at: u64,
}

/// Partial update applied to a shelf entry; `None` fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct ShelfPatch {
    pub status: Option<ReadingStatus>,
    pub current_page: Option<u32>,
    pub rating: Option<u8>,
    pub review: Option<String>,
}
