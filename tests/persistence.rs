//! Shelf persistence tests: a book's full reading lifecycle survives
//! process restarts.

use estante::book::{Book, BookSource, placeholder_cover};
use estante::shelf::{ReadingStatus, Shelf, ShelfPatch};

fn found_book() -> Book {
    Book {
        id: "google-qRmqDwAAQBAJ".into(),
        title: "Memórias Póstumas de Brás Cubas".into(),
        author: "Machado de Assis".into(),
        cover: placeholder_cover("Memórias Póstumas de Brás Cubas"),
        description: "Romance narrado por um defunto autor.".into(),
        publisher: "Companhia das Letras".into(),
        published_date: "1881".into(),
        page_count: 368,
        categories: vec!["Fiction".into()],
        isbn: "9788535911508".into(),
        source: BookSource::GoogleBooks,
        relevance_score: 120,
    }
}

#[test]
fn reading_lifecycle_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();

    // Session 1: add from a search result.
    {
        let mut shelf = Shelf::open(dir.path()).unwrap();
        let entry = shelf.add(found_book(), ReadingStatus::Unread).unwrap();
        assert_eq!(entry.status, ReadingStatus::Unread);
        assert_eq!(entry.current_page, 0);
    }

    // Session 2: start reading, make progress.
    {
        let mut shelf = Shelf::open(dir.path()).unwrap();
        shelf
            .update(
                "google-qRmqDwAAQBAJ",
                ShelfPatch {
                    status: Some(ReadingStatus::Reading),
                    current_page: Some(150),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    // Session 3: finish, rate, review.
    {
        let mut shelf = Shelf::open(dir.path()).unwrap();
        let entry = shelf.get("google-qRmqDwAAQBAJ").unwrap();
        assert_eq!(entry.status, ReadingStatus::Reading);
        assert_eq!(entry.current_page, 150);

        shelf
            .update(
                "google-qRmqDwAAQBAJ",
                ShelfPatch {
                    status: Some(ReadingStatus::Finished),
                    current_page: Some(368),
                    rating: Some(5),
                    review: Some("Ao verme que primeiro roeu...".into()),
                },
            )
            .unwrap();
    }

    // Session 4: everything is still there.
    let shelf = Shelf::open(dir.path()).unwrap();
    assert_eq!(shelf.len(), 1);
    let entry = shelf.get("google-qRmqDwAAQBAJ").unwrap();
    assert_eq!(entry.status, ReadingStatus::Finished);
    assert_eq!(entry.current_page, 368);
    assert_eq!(entry.rating, Some(5));
    assert!(entry.review.as_deref().unwrap().starts_with("Ao verme"));
    assert_eq!(entry.book.page_count, 368);

    assert_eq!(shelf.list_by_status(ReadingStatus::Finished).len(), 1);
    assert!(shelf.list_by_status(ReadingStatus::Unread).is_empty());
}

#[test]
fn shelf_file_is_human_readable_json() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut shelf = Shelf::open(dir.path()).unwrap();
    shelf.add(found_book(), ReadingStatus::Unread).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("shelf.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed[0]["book"]["title"], "Memórias Póstumas de Brás Cubas");
    assert_eq!(parsed[0]["status"], "unread");
}
