//! Local key-value store backed by SQLite.

use super::{NoteStorage, StorageError, StorageResult};
use crate::domain::Note;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::Path;

/// Name of the key-value database inside the data directory.
pub const KV_FILE_NAME: &str = "local-storage.db";

/// Key under which the note collection is stored.
pub const NOTES_KEY: &str = "notes";

/// Key holding the last unparseable value of [`NOTES_KEY`].
pub const BACKUP_KEY: &str = "notes.bak";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);";

/// Note collection stored as compact JSON under one fixed key.
pub struct KeyValueStorage {
    conn: Connection,
    location: String,
}

impl KeyValueStorage {
    /// Opens or creates the key-value database at `path`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            location: format!("{}#{}", path.display(), NOTES_KEY),
        })
    }

    /// Opens an in-memory store that disappears with the value.
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            location: format!(":memory:#{NOTES_KEY}"),
        })
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Keeps a copy of an unparseable value so the next write does not
    /// destroy it.
    fn back_up_malformed(&self, raw: &str) {
        match self.set(BACKUP_KEY, raw) {
            Ok(()) => tracing::warn!(key = BACKUP_KEY, "kept copy of malformed notes value"),
            Err(e) => tracing::warn!(error = %e, "could not back up malformed notes value"),
        }
    }
}

impl NoteStorage for KeyValueStorage {
    fn read(&self) -> StorageResult<Vec<Note>> {
        let Some(raw) = self.get(NOTES_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| {
            self.back_up_malformed(&raw);
            StorageError::Malformed {
                location: self.location(),
                source: e,
            }
        })
    }

    fn write(&self, notes: &[Note]) -> StorageResult<()> {
        let raw = serde_json::to_string(notes).map_err(|e| StorageError::Malformed {
            location: self.location(),
            source: e,
        })?;
        self.set(NOTES_KEY, &raw)?;
        tracing::debug!(location = %self.location, count = notes.len(), "wrote notes key");
        Ok(())
    }

    fn location(&self) -> String {
        self.location.clone()
    }
}

impl std::fmt::Debug for KeyValueStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueStorage")
            .field("location", &self.location)
            .finish()
    }
}
