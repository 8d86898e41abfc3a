//! Persistent reading shelf backed by `shelf.json`.
//!
//! The shelf is a simple JSON file listing every tracked book with its
//! reading state. It lives at `{data_dir}/shelf.json`.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::book::Book;
use crate::shelf::error::{ShelfError, ShelfResult};
use crate::shelf::model::{ReadingStatus, ShelfEntry, ShelfPatch};

/// Persistent collection of the reader's tracked books.
pub struct Shelf {
    path: PathBuf,
    entries: Vec<ShelfEntry>,
}

impl Shelf {
    /// Open or create a shelf at the given directory.
    ///
    /// The shelf file is `{dir}/shelf.json`. If it doesn't exist, starts
    /// with an empty list.
    pub fn open(dir: &Path) -> ShelfResult<Self> {
        let path = dir.join("shelf.json");

        let entries = if path.exists() {
            let data = std::fs::read_to_string(&path).map_err(|e| ShelfError::StoreIo {
                message: format!("read {}: {e}", path.display()),
            })?;
            serde_json::from_str(&data).map_err(|e| ShelfError::StoreIo {
                message: format!("parse {}: {e}", path.display()),
            })?
        } else {
            Vec::new()
        };

        Ok(Self { path, entries })
    }

    /// Flush the shelf to disk.
    fn flush(&self) -> ShelfResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ShelfError::StoreIo {
                message: format!("create dir {}: {e}", parent.display()),
            })?;
        }
        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| ShelfError::StoreIo {
            message: format!("serialize shelf: {e}"),
        })?;
        std::fs::write(&self.path, json).map_err(|e| ShelfError::StoreIo {
            message: format!("write {}: {e}", self.path.display()),
        })?;
        Ok(())
    }

    /// Add a book with an initial status. Returns error if the book is
    /// already shelved.
    pub fn add(&mut self, book: Book, status: ReadingStatus) -> ShelfResult<ShelfEntry> {
        if self.entries.iter().any(|entry| entry.id == book.id) {
            return Err(ShelfError::Duplicate {
                id: book.id.clone(),
            });
        }

        let now = now_secs();
        let entry = ShelfEntry {
            id: book.id.clone(),
            book,
            status,
            current_page: 0,
            rating: None,
            review: None,
            added_at: now,
            updated_at: now,
        };
        self.entries.push(entry.clone());
        self.flush()?;
        Ok(entry)
    }

    /// Apply a partial update to an entry and bump its `updated_at`.
    ///
    /// Ratings must be 1–5; page progress is clamped to the book's page
    /// count when that is known.
    pub fn update(&mut self, id: &str, patch: ShelfPatch) -> ShelfResult<ShelfEntry> {
        if let Some(rating) = patch.rating {
            if !(1..=5).contains(&rating) {
                return Err(ShelfError::InvalidRating { rating });
            }
        }

        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| ShelfError::NotFound { id: id.into() })?;

        if let Some(status) = patch.status {
            entry.status = status;
        }
        if let Some(page) = patch.current_page {
            entry.current_page = if entry.book.page_count > 0 {
                page.min(entry.book.page_count)
            } else {
                page
            };
        }
        if let Some(rating) = patch.rating {
            entry.rating = Some(rating);
        }
        if let Some(review) = patch.review {
            entry.review = Some(review);
        }
        entry.updated_at = now_secs();

        let updated = entry.clone();
        self.flush()?;
        Ok(updated)
    }

    /// Remove an entry by ID. Returns the removed entry, or error if not
    /// found.
    pub fn remove(&mut self, id: &str) -> ShelfResult<ShelfEntry> {
        let pos = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| ShelfError::NotFound { id: id.into() })?;
        let entry = self.entries.remove(pos);
        self.flush()?;
        Ok(entry)
    }

    /// Look up an entry by ID.
    pub fn get(&self, id: &str) -> Option<&ShelfEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// All entries, in insertion order.
    pub fn list(&self) -> &[ShelfEntry] {
        &self.entries
    }

    /// Entries in one reading state.
    pub fn list_by_status(&self, status: ReadingStatus) -> Vec<&ShelfEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.status == status)
            .collect()
    }

    /// Number of shelved books.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the shelf is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::{BookSource, placeholder_cover};

    fn sample_book(id: &str, pages: u32) -> Book {
        Book {
            id: id.into(),
            title: "Dom Casmurro".into(),
            author: "Machado de Assis".into(),
            cover: placeholder_cover("Dom Casmurro"),
            description: String::new(),
            publisher: "Editora Garnier".into(),
            published_date: "1899".into(),
            page_count: pages,
            categories: vec![],
            isbn: String::new(),
            source: BookSource::GoogleBooks,
            relevance_score: 0,
        }
    }

    #[test]
    fn add_and_list() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut shelf = Shelf::open(dir.path()).unwrap();
        assert!(shelf.is_empty());

        shelf
            .add(sample_book("google-1", 256), ReadingStatus::Unread)
            .unwrap();
        assert_eq!(shelf.len(), 1);
        assert!(shelf.get("google-1").is_some());
    }

    #[test]
    fn duplicate_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut shelf = Shelf::open(dir.path()).unwrap();

        shelf
            .add(sample_book("google-1", 0), ReadingStatus::Unread)
            .unwrap();
        let err = shelf
            .add(sample_book("google-1", 0), ReadingStatus::Reading)
            .unwrap_err();
        assert!(matches!(err, ShelfError::Duplicate { .. }));
    }

    #[test]
    fn update_applies_patch_and_bumps_timestamp() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut shelf = Shelf::open(dir.path()).unwrap();
        shelf
            .add(sample_book("google-1", 256), ReadingStatus::Unread)
            .unwrap();

        let updated = shelf
            .update(
                "google-1",
                ShelfPatch {
                    status: Some(ReadingStatus::Reading),
                    current_page: Some(120),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, ReadingStatus::Reading);
        assert_eq!(updated.current_page, 120);
        assert!(updated.updated_at >= updated.added_at);
    }

    #[test]
    fn progress_clamped_to_page_count() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut shelf = Shelf::open(dir.path()).unwrap();
        shelf
            .add(sample_book("google-1", 256), ReadingStatus::Reading)
            .unwrap();

        let updated = shelf
            .update(
                "google-1",
                ShelfPatch {
                    current_page: Some(999),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.current_page, 256);
    }

    #[test]
    fn unknown_page_count_accepts_any_progress() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut shelf = Shelf::open(dir.path()).unwrap();
        shelf
            .add(sample_book("google-1", 0), ReadingStatus::Reading)
            .unwrap();

        let updated = shelf
            .update(
                "google-1",
                ShelfPatch {
                    current_page: Some(999),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.current_page, 999);
    }

    #[test]
    fn invalid_rating_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut shelf = Shelf::open(dir.path()).unwrap();
        shelf
            .add(sample_book("google-1", 0), ReadingStatus::Finished)
            .unwrap();

        let err = shelf
            .update(
                "google-1",
                ShelfPatch {
                    rating: Some(6),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ShelfError::InvalidRating { rating: 6 }));

        shelf
            .update(
                "google-1",
                ShelfPatch {
                    rating: Some(5),
                    review: Some("Obra-prima.".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(shelf.get("google-1").unwrap().rating, Some(5));
    }

    #[test]
    fn remove_and_list_by_status() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut shelf = Shelf::open(dir.path()).unwrap();
        shelf
            .add(sample_book("google-1", 0), ReadingStatus::Unread)
            .unwrap();
        shelf
            .add(sample_book("google-2", 0), ReadingStatus::Finished)
            .unwrap();

        assert_eq!(shelf.list_by_status(ReadingStatus::Finished).len(), 1);

        let removed = shelf.remove("google-1").unwrap();
        assert_eq!(removed.id, "google-1");
        assert_eq!(shelf.len(), 1);
        assert!(matches!(
            shelf.remove("google-1").unwrap_err(),
            ShelfError::NotFound { .. }
        ));
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::TempDir::new().unwrap();

        {
            let mut shelf = Shelf::open(dir.path()).unwrap();
            shelf
                .add(sample_book("google-1", 256), ReadingStatus::Reading)
                .unwrap();
            shelf
                .update(
                    "google-1",
                    ShelfPatch {
                        current_page: Some(42),
                        ..Default::default()
                    },
                )
                .unwrap();
        }

        let shelf = Shelf::open(dir.path()).unwrap();
        assert_eq!(shelf.len(), 1);
        let entry = shelf.get("google-1").unwrap();
        assert_eq!(entry.current_page, 42);
        assert_eq!(entry.status, ReadingStatus::Reading);
    }
}
