//! Persistence adapter: the whole note collection as one JSON document.
//!
//! Two interchangeable backends implement [`NoteStorage`]:
//! - [`FileStorage`]: `notes.json` in the per-user data directory
//! - [`KeyValueStorage`]: the `notes` key of a local SQLite key-value store
//!
//! The backend is picked once at startup by [`detect`] and handed to the note
//! store; nothing else probes the host.

mod file;
mod kv;

use crate::domain::Note;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use file::{BACKUP_FILE_NAME, FileStorage, NOTES_FILE_NAME};
pub use kv::{BACKUP_KEY, KV_FILE_NAME, KeyValueStorage, NOTES_KEY};

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage medium could not be read or written.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The atomic rename of a freshly written document failed.
    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key-value database reported an error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The stored document is not a valid note collection.
    #[error("malformed notes document at {location}: {source}")]
    Malformed {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse classification of [`StorageError`], used for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    Unavailable,
    Malformed,
}

impl StorageError {
    pub fn kind(&self) -> StorageErrorKind {
        match self {
            StorageError::Malformed { .. } => StorageErrorKind::Malformed,
            StorageError::Io { .. }
            | StorageError::AtomicWrite { .. }
            | StorageError::Database(_) => StorageErrorKind::Unavailable,
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable home of the note collection.
///
/// Implementations store and return the whole collection as one unit. There
/// are no partial updates and no versioning: the last write wins.
pub trait NoteStorage {
    /// Returns the stored collection, or an empty one if nothing was stored yet.
    fn read(&self) -> StorageResult<Vec<Note>>;

    /// Replaces the stored collection with `notes`.
    fn write(&self, notes: &[Note]) -> StorageResult<()>;

    /// Human-readable description of where the collection lives.
    fn location(&self) -> String;
}

impl<S: NoteStorage + ?Sized> NoteStorage for Box<S> {
    fn read(&self) -> StorageResult<Vec<Note>> {
        (**self).read()
    }

    fn write(&self, notes: &[Note]) -> StorageResult<()> {
        (**self).write(notes)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

// ===========================================
// Backend Detection
// ===========================================

/// Storage backend chosen for a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    File(PathBuf),
    KeyValue(PathBuf),
}

impl Backend {
    /// Opens the selected backend, creating its storage if it does not exist.
    pub fn open(&self) -> StorageResult<Box<dyn NoteStorage>> {
        match self {
            Backend::File(path) => Ok(Box::new(FileStorage::open(path)?)),
            Backend::KeyValue(path) => Ok(Box::new(KeyValueStorage::open(path)?)),
        }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        match self {
            Backend::File(path) | Backend::KeyValue(path) => path,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::File(_) => "file",
            Backend::KeyValue(_) => "key-value",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.path().display())
    }
}

/// Probes `data_dir` for the storage the host already provides.
///
/// A key-value database with no JSON document next to it selects the
/// key-value backend. Everything else, including a fresh directory, selects
/// the JSON file backend.
pub fn detect(data_dir: &Path) -> Backend {
    let json = data_dir.join(NOTES_FILE_NAME);
    let kv = data_dir.join(KV_FILE_NAME);

    if kv.is_file() && !json.exists() {
        tracing::debug!(path = %kv.display(), "detected key-value storage");
        Backend::KeyValue(kv)
    } else {
        tracing::debug!(path = %json.display(), "using file storage");
        Backend::File(json)
    }
}
