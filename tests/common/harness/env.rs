//! Isolated test environment with temp directories.

#![allow(dead_code)]

use super::{JotCommand, TestNote};
use jot::domain::Note;
use jot::storage::{self, KV_FILE_NAME, KeyValueStorage, NOTES_FILE_NAME, NoteStorage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with its own data and config directories.
///
/// Both are removed when the environment is dropped.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    data_dir: PathBuf,
    config_home: PathBuf,
}

impl TestEnv {
    /// Creates an environment whose data directory does not exist yet.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");
        let config_home = temp_dir.path().join("config");
        std::fs::create_dir_all(&config_home).expect("Failed to create config directory");
        Self {
            _temp_dir: temp_dir,
            data_dir,
            config_home,
        }
    }

    /// Creates an environment backed by the key-value store.
    pub fn with_key_value_backend() -> Self {
        let env = Self::new();
        std::fs::create_dir_all(&env.data_dir).expect("Failed to create data directory");
        KeyValueStorage::open(&env.kv_path()).expect("Failed to create key-value store");
        env
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_home(&self) -> &Path {
        &self.config_home
    }

    pub fn notes_path(&self) -> PathBuf {
        self.data_dir.join(NOTES_FILE_NAME)
    }

    pub fn kv_path(&self) -> PathBuf {
        self.data_dir.join(KV_FILE_NAME)
    }

    /// Appends a note to whichever backend the data directory uses.
    pub fn add_note(&self, note: &TestNote) {
        let storage = self.open_storage();
        let mut notes = storage.read().expect("Failed to read notes");
        notes.push(note.to_note());
        storage.write(&notes).expect("Failed to write notes");
    }

    /// Reads the persisted collection back.
    pub fn notes(&self) -> Vec<Note> {
        self.open_storage().read().expect("Failed to read notes")
    }

    /// Writes raw text as the notes document.
    pub fn write_notes_file(&self, contents: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data directory");
        std::fs::write(self.notes_path(), contents).expect("Failed to write notes file");
    }

    /// Writes the config file read by the binary.
    pub fn write_config(&self, contents: &str) {
        let dir = self.config_home.join("jot");
        std::fs::create_dir_all(&dir).expect("Failed to create config directory");
        std::fs::write(dir.join("config.toml"), contents).expect("Failed to write config");
    }

    /// Creates a command pointed at this environment's data directory.
    pub fn cmd(&self) -> JotCommand {
        self.cmd_without_dir().dir(&self.data_dir)
    }

    /// Creates a command that only gets the isolated config home.
    pub fn cmd_without_dir(&self) -> JotCommand {
        JotCommand::new().config_home(&self.config_home)
    }

    fn open_storage(&self) -> Box<dyn NoteStorage> {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data directory");
        storage::detect(&self.data_dir)
            .open()
            .expect("Failed to open storage")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.config_home().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_add_note_to_file_backend() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new(1, "First"));
        env.add_note(&TestNote::new(2, "Second"));

        assert!(env.notes_path().exists());
        assert_eq!(env.notes().len(), 2);
    }

    #[test]
    fn test_env_add_note_to_key_value_backend() {
        let env = TestEnv::with_key_value_backend();
        env.add_note(&TestNote::new(1, "First"));

        assert!(!env.notes_path().exists());
        assert_eq!(env.notes()[0].title(), "First");
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.data_dir().to_string_lossy());
    }
}
