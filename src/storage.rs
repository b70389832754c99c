use rusqlite::{Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create storage directory: {0}")]
    DirectoryError(String),
}

/// Keyed blob storage. Every value is read and written in its entirety; the
/// stores layered on top handle (de)serialization. Injecting this trait is
/// what lets tests run against an in-memory fake.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Production storage: a single-table SQLite database of key/value blobs.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the storage database and initialize its schema.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StorageError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;

        let storage = SqliteStorage { conn };
        storage.initialize_schema()?;

        Ok(storage)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = SqliteStorage { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    fn initialize_schema(&self) -> Result<(), StorageError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS blobs (
                key             TEXT PRIMARY KEY,
                value           TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM blobs WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO blobs (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![
                key,
                value,
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
            ],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM blobs WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
    }
}

/// In-memory storage fake for tests. Tracks write counts so tests can assert
/// that a mutation persisted its result in a single atomic write.
#[derive(Default)]
pub struct MemoryStorage {
    blobs: RefCell<HashMap<String, String>>,
    writes: RefCell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.blobs.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_storage_round_trips_blobs() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert!(storage.get("myBooks").unwrap().is_none());

        storage.set("myBooks", "{\"read\":[]}").unwrap();
        assert_eq!(storage.get("myBooks").unwrap().unwrap(), "{\"read\":[]}");

        storage.set("myBooks", "{\"read\":[1]}").unwrap();
        assert_eq!(storage.get("myBooks").unwrap().unwrap(), "{\"read\":[1]}");

        storage.remove("myBooks").unwrap();
        assert!(storage.get("myBooks").unwrap().is_none());
    }

    #[test]
    fn memory_storage_counts_writes() {
        let storage = MemoryStorage::new();
        storage.set("a", "1").unwrap();
        storage.set("a", "2").unwrap();
        assert_eq!(storage.write_count(), 2);
        assert_eq!(storage.get("a").unwrap().unwrap(), "2");
    }

    #[test]
    fn remove_missing_key_is_a_no_op() {
        let storage = MemoryStorage::new();
        storage.remove("nothing").unwrap();
        let sqlite = SqliteStorage::open_in_memory().unwrap();
        sqlite.remove("nothing").unwrap();
    }
}
