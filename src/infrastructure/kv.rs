//! Key-value storage adapters.
//!
//! The store and selector only ever need `get`/`set` over string keys, so
//! persistence is a narrow [`KvStore`] trait with three backends: SQLite
//! for durable state, a temp-dir JSON file for session state (the platform
//! clears it, which is what bounds a "session"), and an in-memory map for
//! tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{AppError, Result};

/// Narrow key-value contract shared by the persistent and session stores.
pub trait KvStore {
    /// Read a value, `None` when the key has never been set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Durable key-value store backed by SQLite.
pub struct SqliteKv {
    conn: Connection,
}

impl SqliteKv {
    /// Opens or creates the database at `path`.
    ///
    /// # Errors
    /// Returns error if the database cannot be opened or schema creation fails.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create storage directory", e))?;
        }

        let conn = Connection::open(path).map_err(AppError::database)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;

             CREATE TABLE IF NOT EXISTS kv (
                 key TEXT PRIMARY KEY,
                 value TEXT NOT NULL,
                 updated_at TEXT NOT NULL DEFAULT (datetime('now'))
             );",
        )
        .map_err(AppError::database)?;

        Ok(Self { conn })
    }
}

impl KvStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(AppError::database)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = datetime('now')",
                params![key, value],
            )
            .map_err(AppError::database)?;

        Ok(())
    }
}

/// Session-scoped key-value store backed by a JSON file in a directory the
/// platform cleans up (normally the OS temp dir).
pub struct SessionKv {
    path: PathBuf,
}

impl SessionKv {
    /// Use the file at `path` for session state. The file is created lazily
    /// on first write.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_map(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| AppError::io("Failed to read session file", e))?;

        serde_json::from_str(&content).map_err(|e| AppError::InvalidData {
            message: format!("Corrupted session file: {e}"),
        })
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<()> {
        let content = serde_json::to_string(map).map_err(|e| AppError::InvalidData {
            message: format!("Failed to serialize session state: {e}"),
        })?;

        std::fs::write(&self.path, content)
            .map_err(|e| AppError::io("Failed to write session file", e))
    }
}

impl KvStore for SessionKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryKv {
    map: RefCell<HashMap<String, String>>,
}

impl MemoryKv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sqlite_kv_roundtrip() {
        let dir = tempdir().unwrap();
        let kv = SqliteKv::open(&dir.path().join("test.db")).unwrap();

        assert_eq!(kv.get("quotes").unwrap(), None);

        kv.set("quotes", "[]").unwrap();
        assert_eq!(kv.get("quotes").unwrap().as_deref(), Some("[]"));

        kv.set("quotes", "[1]").unwrap();
        assert_eq!(kv.get("quotes").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_sqlite_kv_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("test.db");

        let kv = SqliteKv::open(&nested).unwrap();
        kv.set("k", "v").unwrap();

        assert!(nested.exists());
    }

    #[test]
    fn test_session_kv_roundtrip() {
        let dir = tempdir().unwrap();
        let kv = SessionKv::new(dir.path().join("session.json"));

        assert_eq!(kv.get("lastFilteredCategory").unwrap(), None);

        kv.set("lastFilteredCategory", "Life").unwrap();
        kv.set("lastFilteredQuoteIndex", "2").unwrap();

        assert_eq!(
            kv.get("lastFilteredCategory").unwrap().as_deref(),
            Some("Life")
        );
        assert_eq!(
            kv.get("lastFilteredQuoteIndex").unwrap().as_deref(),
            Some("2")
        );
    }

    #[test]
    fn test_memory_kv_roundtrip() {
        let kv = MemoryKv::new();
        kv.set("k", "v").unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(kv.get("missing").unwrap(), None);
    }
}
