use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{AnnotationMap, Note, Quote, Review};
use crate::storage::{Storage, StorageError};
use crate::utils::{now_millis, now_rfc3339};

const REVIEWS_KEY: &str = "bookReviews";
const NOTES_KEY: &str = "bookNotes";
const QUOTES_KEY: &str = "bookQuotes";

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error("Corrupt annotation data: {0}")]
    DataError(#[from] serde_json::Error),
    #[error("{0}")]
    ValidationError(String),
}

fn load_map<S: Storage, T: DeserializeOwned>(
    storage: &S,
    key: &str,
) -> Result<AnnotationMap<T>, AnnotationError> {
    match storage.get(key)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(AnnotationMap::new()),
    }
}

fn persist_map<S: Storage, T: Serialize>(
    storage: &S,
    key: &str,
    map: &AnnotationMap<T>,
) -> Result<(), AnnotationError> {
    let json = serde_json::to_string(map)?;
    storage.set(key, &json)?;
    Ok(())
}

/// Reviews keyed by book id. Reads always merge two fixed sample reviews in
/// front of whatever the user has written; the samples are never persisted,
/// so a remove with their ids falls through as a no-op.
pub struct ReviewStore<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> ReviewStore<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// The user's own persisted reviews for a book, without the samples.
    pub fn own(&self, book_id: i64) -> Result<Vec<Review>, AnnotationError> {
        let map: AnnotationMap<Review> = load_map(self.storage, REVIEWS_KEY)?;
        Ok(map.get(&book_id.to_string()).cloned().unwrap_or_default())
    }

    /// Sample reviews followed by the user's reviews in insertion order.
    pub fn list(&self, book_id: i64) -> Result<Vec<Review>, AnnotationError> {
        let mut reviews = seed_reviews();
        reviews.extend(self.own(book_id)?);
        Ok(reviews)
    }

    pub fn add(
        &self,
        book_id: i64,
        rating: i64,
        text: &str,
    ) -> Result<Vec<Review>, AnnotationError> {
        if !(1..=5).contains(&rating) {
            return Err(AnnotationError::ValidationError(
                "Please select a rating between 1 and 5".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(AnnotationError::ValidationError(
                "Please write a review".to_string(),
            ));
        }

        let mut map: AnnotationMap<Review> = load_map(self.storage, REVIEWS_KEY)?;
        map.entry(book_id.to_string()).or_default().push(Review {
            id: now_millis(),
            name: "You".to_string(),
            initials: "YU".to_string(),
            rating,
            text: text.to_string(),
            date: Some(now_rfc3339()),
        });
        persist_map(self.storage, REVIEWS_KEY, &map)?;
        self.list(book_id)
    }

    /// Remove a review. An id with no persisted match (including the sample
    /// review ids) is a silent no-op. The book key is dropped once its last
    /// review goes.
    pub fn remove(&self, book_id: i64, review_id: i64) -> Result<(), AnnotationError> {
        let mut map: AnnotationMap<Review> = load_map(self.storage, REVIEWS_KEY)?;
        let key = book_id.to_string();
        if let Some(reviews) = map.get_mut(&key) {
            reviews.retain(|r| r.id != review_id);
            if reviews.is_empty() {
                map.remove(&key);
            }
            persist_map(self.storage, REVIEWS_KEY, &map)?;
        }
        Ok(())
    }
}

/// Free-form notes keyed by book id.
pub struct NoteStore<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> NoteStore<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub fn list(&self, book_id: i64) -> Result<Vec<Note>, AnnotationError> {
        let map: AnnotationMap<Note> = load_map(self.storage, NOTES_KEY)?;
        Ok(map.get(&book_id.to_string()).cloned().unwrap_or_default())
    }

    pub fn add(&self, book_id: i64, text: &str) -> Result<Vec<Note>, AnnotationError> {
        if text.trim().is_empty() {
            return Err(AnnotationError::ValidationError(
                "Please enter a note".to_string(),
            ));
        }
        let mut map: AnnotationMap<Note> = load_map(self.storage, NOTES_KEY)?;
        let key = book_id.to_string();
        map.entry(key.clone()).or_default().push(Note {
            id: now_millis(),
            text: text.to_string(),
            date: now_rfc3339(),
        });
        persist_map(self.storage, NOTES_KEY, &map)?;
        Ok(map.get(&key).cloned().unwrap_or_default())
    }

    /// Remove a note. Unlike reviews and quotes, an emptied sequence stays in
    /// the mapping; this matches the historical on-disk shape.
    pub fn remove(&self, book_id: i64, note_id: i64) -> Result<(), AnnotationError> {
        let mut map: AnnotationMap<Note> = load_map(self.storage, NOTES_KEY)?;
        if let Some(notes) = map.get_mut(&book_id.to_string()) {
            notes.retain(|n| n.id != note_id);
            persist_map(self.storage, NOTES_KEY, &map)?;
        }
        Ok(())
    }
}

/// Favorite quotes keyed by book id.
pub struct QuoteStore<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> QuoteStore<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub fn list(&self, book_id: i64) -> Result<Vec<Quote>, AnnotationError> {
        let map: AnnotationMap<Quote> = load_map(self.storage, QUOTES_KEY)?;
        Ok(map.get(&book_id.to_string()).cloned().unwrap_or_default())
    }

    pub fn add(
        &self,
        book_id: i64,
        text: &str,
        page: Option<&str>,
    ) -> Result<Vec<Quote>, AnnotationError> {
        if text.trim().is_empty() {
            return Err(AnnotationError::ValidationError(
                "Please enter a quote".to_string(),
            ));
        }
        let page = match page {
            Some(p) if !p.trim().is_empty() => p.to_string(),
            _ => "N/A".to_string(),
        };
        let mut map: AnnotationMap<Quote> = load_map(self.storage, QUOTES_KEY)?;
        let key = book_id.to_string();
        map.entry(key.clone()).or_default().push(Quote {
            id: now_millis(),
            text: text.to_string(),
            page,
            date: now_rfc3339(),
        });
        persist_map(self.storage, QUOTES_KEY, &map)?;
        Ok(map.get(&key).cloned().unwrap_or_default())
    }

    pub fn remove(&self, book_id: i64, quote_id: i64) -> Result<(), AnnotationError> {
        let mut map: AnnotationMap<Quote> = load_map(self.storage, QUOTES_KEY)?;
        let key = book_id.to_string();
        if let Some(quotes) = map.get_mut(&key) {
            quotes.retain(|q| q.id != quote_id);
            if quotes.is_empty() {
                map.remove(&key);
            }
            persist_map(self.storage, QUOTES_KEY, &map)?;
        }
        Ok(())
    }
}

/// The two fixed sample reviews shown ahead of user reviews on every book.
pub fn seed_reviews() -> Vec<Review> {
    vec![
        Review {
            id: 1,
            name: "John Doe".to_string(),
            initials: "JD".to_string(),
            rating: 5,
            text: "An absolutely captivating read! Couldn't put it down.".to_string(),
            date: None,
        },
        Review {
            id: 2,
            name: "Alice Smith".to_string(),
            initials: "AS".to_string(),
            rating: 3,
            text: "Great story with well-developed characters. Highly recommend!".to_string(),
            date: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn review_list_always_starts_with_the_samples() {
        let storage = MemoryStorage::new();
        let store = ReviewStore::new(&storage);

        let empty = store.list(42).unwrap();
        assert_eq!(empty.len(), 2);
        assert_eq!(empty[0].id, 1);
        assert_eq!(empty[1].id, 2);

        let after_add = store.add(42, 4, "Loved it").unwrap();
        assert_eq!(after_add.len(), 3);
        assert_eq!(after_add[0].name, "John Doe");
        assert_eq!(after_add[1].name, "Alice Smith");
        assert_eq!(after_add[2].name, "You");
        assert_eq!(after_add[2].rating, 4);
        assert!(after_add[2].date.is_some());
    }

    #[test]
    fn review_add_validates_rating_and_text() {
        let storage = MemoryStorage::new();
        let store = ReviewStore::new(&storage);

        assert!(matches!(
            store.add(1, 0, "text"),
            Err(AnnotationError::ValidationError(_))
        ));
        assert!(matches!(
            store.add(1, 6, "text"),
            Err(AnnotationError::ValidationError(_))
        ));
        assert!(matches!(
            store.add(1, 3, "   "),
            Err(AnnotationError::ValidationError(_))
        ));
        // Nothing reached storage.
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn removing_a_sample_review_is_a_no_op() {
        let storage = MemoryStorage::new();
        let store = ReviewStore::new(&storage);
        store.add(7, 5, "mine").unwrap();

        store.remove(7, 1).unwrap();
        store.remove(7, 2).unwrap();

        let reviews = store.list(7).unwrap();
        assert_eq!(reviews.len(), 3);
    }

    #[test]
    fn review_key_is_dropped_when_last_review_goes() {
        let storage = MemoryStorage::new();
        let store = ReviewStore::new(&storage);
        let added = store.add(7, 5, "mine").unwrap();
        let my_id = added.last().unwrap().id;

        store.remove(7, my_id).unwrap();

        let raw = storage.get("bookReviews").unwrap().unwrap();
        let map: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(map.get("7").is_none());
    }

    #[test]
    fn note_key_survives_when_last_note_goes() {
        let storage = MemoryStorage::new();
        let store = NoteStore::new(&storage);
        let notes = store.add(9, "margin thought").unwrap();

        store.remove(9, notes[0].id).unwrap();

        let raw = storage.get("bookNotes").unwrap().unwrap();
        let map: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(map["9"], serde_json::json!([]));
        assert!(store.list(9).unwrap().is_empty());
    }

    #[test]
    fn quote_page_defaults_to_not_available() {
        let storage = MemoryStorage::new();
        let store = QuoteStore::new(&storage);

        let quotes = store.add(3, "So it goes.", None).unwrap();
        assert_eq!(quotes[0].page, "N/A");

        let quotes = store.add(3, "Listen:", Some("12")).unwrap();
        assert_eq!(quotes[1].page, "12");
    }

    #[test]
    fn quote_key_is_dropped_when_last_quote_goes() {
        let storage = MemoryStorage::new();
        let store = QuoteStore::new(&storage);
        let quotes = store.add(3, "So it goes.", None).unwrap();

        store.remove(3, quotes[0].id).unwrap();

        let raw = storage.get("bookQuotes").unwrap().unwrap();
        let map: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(map.get("3").is_none());
    }

    #[test]
    fn annotations_are_kept_per_book() {
        let storage = MemoryStorage::new();
        let store = NoteStore::new(&storage);
        store.add(1, "first book").unwrap();
        store.add(2, "second book").unwrap();

        assert_eq!(store.list(1).unwrap().len(), 1);
        assert_eq!(store.list(2).unwrap().len(), 1);
        assert_eq!(store.list(1).unwrap()[0].text, "first book");
    }
}
