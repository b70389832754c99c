use serde_json::{Value, json};
use thiserror::Error;

use crate::storage::{Storage, StorageError};
use crate::utils::now_rfc3339;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error("Corrupt stored data: {0}")]
    DataError(#[from] serde_json::Error),
}

/// Bundle every persisted library blob into one pretty-printed JSON document,
/// stamped with the moment of export. Blobs that were never written come out
/// as their empty shapes so the document is always complete.
pub fn export_library<S: Storage>(storage: &S) -> Result<String, ExportError> {
    let snapshot = json!({
        "myBooks": load_blob(storage, "myBooks", json!({ "read": [], "reading": [], "wantToRead": [] }))?,
        "bookReviews": load_blob(storage, "bookReviews", json!({}))?,
        "bookNotes": load_blob(storage, "bookNotes", json!({}))?,
        "bookQuotes": load_blob(storage, "bookQuotes", json!({}))?,
        "readingGoals": load_blob(storage, "readingGoals", json!({ "yearly": 12, "monthly": 1 }))?,
        "exportDate": now_rfc3339(),
    });
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

fn load_blob<S: Storage>(storage: &S, key: &str, empty: Value) -> Result<Value, ExportError> {
    match storage.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn empty_library_exports_default_shapes() {
        let storage = MemoryStorage::new();
        let doc = export_library(&storage).unwrap();
        let value: Value = serde_json::from_str(&doc).unwrap();

        assert_eq!(value["myBooks"]["wantToRead"], json!([]));
        assert_eq!(value["bookReviews"], json!({}));
        assert_eq!(value["readingGoals"]["yearly"], 12);
        assert!(value["exportDate"].is_string());
    }

    #[test]
    fn export_carries_stored_blobs_verbatim() {
        let storage = MemoryStorage::new();
        storage
            .set("bookNotes", r#"{"7":[{"id":1,"text":"margin","date":"d"}]}"#)
            .unwrap();
        storage.set("readingGoals", r#"{"yearly":30,"monthly":3}"#).unwrap();

        let doc = export_library(&storage).unwrap();
        let value: Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(value["bookNotes"]["7"][0]["text"], "margin");
        assert_eq!(value["readingGoals"]["monthly"], 3);
    }

    #[test]
    fn export_is_pretty_printed() {
        let storage = MemoryStorage::new();
        let doc = export_library(&storage).unwrap();
        assert!(doc.contains("\n  "));
    }
}
