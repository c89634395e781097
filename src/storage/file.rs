//! JSON document on the local filesystem with atomic writes.

use super::{NoteStorage, StorageError, StorageResult};
use crate::domain::Note;
use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the notes document inside the data directory.
pub const NOTES_FILE_NAME: &str = "notes.json";

/// Name of the copy kept when the document cannot be parsed.
pub const BACKUP_FILE_NAME: &str = "notes.json.bak";

/// Note collection stored as one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Opens the document at `path`, creating parent directories and an empty
    /// `[]` document if absent.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let storage = Self {
            path: path.to_path_buf(),
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        if !path.exists() {
            tracing::info!(path = %path.display(), "creating empty notes document");
            storage.write(&[])?;
        }

        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self) -> PathBuf {
        self.path.with_file_name(BACKUP_FILE_NAME)
    }

    /// Keeps a copy of an unparseable document so the next write does not
    /// destroy it.
    fn back_up_malformed(&self) {
        let backup = self.backup_path();
        match fs::copy(&self.path, &backup) {
            Ok(_) => tracing::warn!(backup = %backup.display(), "kept copy of malformed notes document"),
            Err(e) => tracing::warn!(error = %e, "could not back up malformed notes document"),
        }
    }
}

impl NoteStorage for FileStorage {
    fn read(&self) -> StorageResult<Vec<Note>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let contents = contents.strip_prefix('\u{FEFF}').unwrap_or(&contents);
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(contents).map_err(|e| {
            self.back_up_malformed();
            StorageError::Malformed {
                location: self.location(),
                source: e,
            }
        })
    }

    fn write(&self, notes: &[Note]) -> StorageResult<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let json = serde_json::to_string_pretty(notes).map_err(|e| StorageError::Malformed {
            location: self.location(),
            source: e,
        })?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| StorageError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        temp.write_all(json.as_bytes())
            .map_err(|e| StorageError::Io {
                path: self.path.clone(),
                source: e,
            })?;

        temp.persist(&self.path)
            .map_err(|e| StorageError::AtomicWrite {
                path: self.path.clone(),
                source: e.error,
            })?;

        tracing::debug!(path = %self.path.display(), count = notes.len(), "wrote notes document");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
