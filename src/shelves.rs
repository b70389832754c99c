use thiserror::Error;

use crate::models::{Book, Shelf, Shelves};
use crate::storage::{Storage, StorageError};
use crate::utils::{now_millis, now_rfc3339};

const SHELVES_KEY: &str = "myBooks";

#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error("Corrupt shelf data: {0}")]
    DataError(#[from] serde_json::Error),
}

/// Result of a progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressOutcome {
    /// No shelf holds a book with the given id.
    NotFound,
    /// The page number was recorded.
    Updated,
    /// The book reached its last page and moved to the Read shelf.
    Completed,
    /// The book reached its last page but was already on the Read shelf,
    /// so no duplicate was added.
    AlreadyRead,
}

/// The three book shelves, persisted as one `myBooks` blob.
///
/// Every operation loads the whole blob, mutates a copy in memory and writes
/// the result back in a single `set`, so a failed write leaves the persisted
/// state at its previous value.
pub struct ShelfStore<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> ShelfStore<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Load the shelves, falling back to the example dataset when nothing has
    /// ever been persisted. The example data is a read-time fallback only; it
    /// is never written to storage.
    pub fn load(&self) -> Result<Shelves, ShelfError> {
        match self.storage.get(SHELVES_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(seed_shelves()),
        }
    }

    fn load_or_empty(&self) -> Result<Shelves, ShelfError> {
        match self.storage.get(SHELVES_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Shelves::default()),
        }
    }

    fn persist(&self, shelves: &Shelves) -> Result<(), ShelfError> {
        let json = serde_json::to_string(shelves)?;
        self.storage.set(SHELVES_KEY, &json)?;
        Ok(())
    }

    /// Append a copy of `book` to the given shelf, stamped with a fresh id.
    ///
    /// There is no duplicate check: adding the same catalog book twice, or to
    /// two shelves, stores it twice. That matches the historical data model,
    /// where shelf exclusivity was an intended but unenforced invariant.
    pub fn add(&self, book: &Book, shelf: Shelf) -> Result<Book, ShelfError> {
        let mut shelves = self.load_or_empty()?;
        let mut stored = book.clone();
        stored.id = now_millis();
        shelves.books_mut(shelf).push(stored.clone());
        self.persist(&shelves)?;
        Ok(stored)
    }

    /// Remove the book with `book_id` from `shelf`. An absent id is a silent
    /// no-op.
    pub fn remove(&self, shelf: Shelf, book_id: i64) -> Result<(), ShelfError> {
        let mut shelves = self.load_or_empty()?;
        shelves.books_mut(shelf).retain(|b| b.id != book_id);
        self.persist(&shelves)
    }

    /// Record that the reader is on `new_page` of the book with `book_id`.
    ///
    /// The page is written to every shelf entry with a matching id. When the
    /// page reaches the book's page count, the book leaves Reading and
    /// Want to Read, gets a completion timestamp and lands on Read - unless
    /// an entry with the same id is already there. The whole next state is
    /// computed in memory and persisted with one write, so there is no
    /// durable intermediate state between "page recorded" and "moved to Read".
    pub fn update_progress(
        &self,
        book_id: i64,
        new_page: i64,
    ) -> Result<ProgressOutcome, ShelfError> {
        let mut shelves = self.load_or_empty()?;

        let mut found: Option<Book> = None;
        for shelf in Shelf::ALL {
            for book in shelves.books_mut(shelf).iter_mut() {
                if book.id == book_id {
                    book.current_page = Some(new_page);
                    if found.is_none() {
                        found = Some(book.clone());
                    }
                }
            }
        }

        let Some(record) = found else {
            return Ok(ProgressOutcome::NotFound);
        };

        let pages = record.pages.unwrap_or(0);
        if pages > 0 && new_page >= pages {
            shelves.reading.retain(|b| b.id != book_id);
            shelves.want_to_read.retain(|b| b.id != book_id);

            let already_read = shelves.read.iter().any(|b| b.id == book_id);
            if !already_read {
                let mut completed = record;
                completed.current_page = Some(pages);
                completed.completed_date = Some(now_rfc3339());
                shelves.read.push(completed);
            }
            self.persist(&shelves)?;
            if already_read {
                Ok(ProgressOutcome::AlreadyRead)
            } else {
                Ok(ProgressOutcome::Completed)
            }
        } else {
            self.persist(&shelves)?;
            Ok(ProgressOutcome::Updated)
        }
    }
}

fn seed_book(
    id: i64,
    title: &str,
    author: &str,
    rating: f64,
    pages: i64,
    color: &str,
) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        rating: Some(rating),
        pages: Some(pages),
        published: None,
        color: Some(color.to_string()),
        description: None,
        current_page: None,
        completed_date: None,
    }
}

/// The example dataset shown before any book has been saved.
pub fn seed_shelves() -> Shelves {
    let mut midnight = seed_book(
        1,
        "The Midnight Library",
        "Matt Haig",
        4.2,
        304,
        "#7C3AED",
    );
    midnight.current_page = Some(198);

    Shelves {
        read: vec![
            seed_book(1, "The Alchemist", "Paulo Coelho", 3.9, 197, "#F97316"),
            seed_book(2, "Atomic Habits", "James Clear", 4.4, 320, "#0284C7"),
            seed_book(3, "Educated", "Tara Westover", 4.5, 385, "#7C3AED"),
        ],
        reading: vec![midnight],
        want_to_read: vec![
            seed_book(1, "Pride and Prejudice", "Jane Austen", 4.3, 432, "#059669"),
            seed_book(
                2,
                "The Shadow of the Wind",
                "Carlos Ruiz Zafón",
                4.3,
                487,
                "#DC2626",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn catalog_book(pages: i64) -> Book {
        let mut book = Book::new("Dune".to_string(), "Frank Herbert".to_string());
        book.rating = Some(4.4);
        book.pages = Some(pages);
        book
    }

    #[test]
    fn load_returns_seed_data_when_storage_is_empty() {
        let storage = MemoryStorage::new();
        let store = ShelfStore::new(&storage);

        let shelves = store.load().unwrap();
        assert_eq!(shelves.read.len(), 3);
        assert_eq!(shelves.reading.len(), 1);
        assert_eq!(shelves.want_to_read.len(), 2);
        assert_eq!(shelves.reading[0].title, "The Midnight Library");
        assert_eq!(shelves.reading[0].current_page, Some(198));
        // The seed is a display fallback, never persisted.
        assert!(storage.get("myBooks").unwrap().is_none());
    }

    #[test]
    fn add_starts_from_empty_shelves_not_the_seed() {
        let storage = MemoryStorage::new();
        let store = ShelfStore::new(&storage);

        store.add(&catalog_book(688), Shelf::Reading).unwrap();

        let shelves = store.load().unwrap();
        assert!(shelves.read.is_empty());
        assert_eq!(shelves.reading.len(), 1);
        assert_eq!(shelves.reading[0].title, "Dune");
    }

    #[test]
    fn add_assigns_fresh_ids_and_does_not_deduplicate() {
        let storage = MemoryStorage::new();
        let store = ShelfStore::new(&storage);

        let first = store.add(&catalog_book(688), Shelf::Reading).unwrap();
        let second = store.add(&catalog_book(688), Shelf::Reading).unwrap();
        store.add(&catalog_book(688), Shelf::WantToRead).unwrap();

        assert!(first.id > 0);
        assert!(second.id >= first.id);
        let shelves = store.load().unwrap();
        assert_eq!(shelves.reading.len(), 2);
        assert_eq!(shelves.want_to_read.len(), 1);
    }

    #[test]
    fn remove_filters_only_the_named_shelf() {
        let storage = MemoryStorage::new();
        let store = ShelfStore::new(&storage);

        let kept = store.add(&catalog_book(688), Shelf::Reading).unwrap();
        let gone = store.add(&catalog_book(688), Shelf::WantToRead).unwrap();

        store.remove(Shelf::WantToRead, gone.id).unwrap();

        let shelves = store.load().unwrap();
        assert!(shelves.want_to_read.is_empty());
        assert_eq!(shelves.reading.len(), 1);
        assert_eq!(shelves.reading[0].id, kept.id);
    }

    #[test]
    fn remove_with_unknown_id_is_a_silent_no_op() {
        let storage = MemoryStorage::new();
        let store = ShelfStore::new(&storage);
        store.add(&catalog_book(688), Shelf::Read).unwrap();

        store.remove(Shelf::Read, 999).unwrap();

        assert_eq!(store.load().unwrap().read.len(), 1);
    }

    #[test]
    fn update_progress_records_the_page() {
        let storage = MemoryStorage::new();
        let store = ShelfStore::new(&storage);
        let book = store.add(&catalog_book(688), Shelf::Reading).unwrap();

        let outcome = store.update_progress(book.id, 200).unwrap();

        assert_eq!(outcome, ProgressOutcome::Updated);
        let shelves = store.load().unwrap();
        assert_eq!(shelves.reading[0].current_page, Some(200));
        assert!(shelves.reading[0].completed_date.is_none());
    }

    #[test]
    fn finishing_a_book_moves_it_to_read_in_one_write() {
        let storage = MemoryStorage::new();
        let store = ShelfStore::new(&storage);
        let book = store.add(&catalog_book(688), Shelf::Reading).unwrap();
        let writes_before = storage.write_count();

        let outcome = store.update_progress(book.id, 688).unwrap();

        assert_eq!(outcome, ProgressOutcome::Completed);
        assert_eq!(storage.write_count(), writes_before + 1);
        let shelves = store.load().unwrap();
        assert!(shelves.reading.is_empty());
        assert!(shelves.want_to_read.is_empty());
        assert_eq!(shelves.read.len(), 1);
        let finished = &shelves.read[0];
        assert_eq!(finished.id, book.id);
        assert_eq!(finished.current_page, Some(688));
        assert!(finished.completed_date.is_some());
    }

    #[test]
    fn finishing_a_book_already_on_read_adds_no_duplicate() {
        let storage = MemoryStorage::new();
        let store = ShelfStore::new(&storage);
        let book = store.add(&catalog_book(688), Shelf::Reading).unwrap();

        // Force a copy with the same id onto Read to simulate the
        // cross-shelf duplication the add path allows.
        let mut shelves = store.load().unwrap();
        shelves.read.push(shelves.reading[0].clone());
        store.persist(&shelves).unwrap();

        let outcome = store.update_progress(book.id, 700).unwrap();

        assert_eq!(outcome, ProgressOutcome::AlreadyRead);
        let shelves = store.load().unwrap();
        assert!(shelves.reading.is_empty());
        assert_eq!(shelves.read.len(), 1);
    }

    #[test]
    fn update_progress_for_unknown_book_is_a_no_op() {
        let storage = MemoryStorage::new();
        let store = ShelfStore::new(&storage);
        store.add(&catalog_book(688), Shelf::Reading).unwrap();
        let writes_before = storage.write_count();

        let outcome = store.update_progress(12345, 10).unwrap();

        assert_eq!(outcome, ProgressOutcome::NotFound);
        assert_eq!(storage.write_count(), writes_before);
    }
}
