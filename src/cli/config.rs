//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::store::DEFAULT_QUIET_PERIOD;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Data directory holding the notes
    pub dir: Option<PathBuf>,

    /// Quiet period in milliseconds before title/content edits are saved
    pub debounce_ms: Option<u64>,
}

/// Resolved runtime settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub quiet: Duration,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/jot/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jot")
            .join("config.toml")
    }

    /// Resolve the data directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. The per-user data directory (`~/.local/share/jot` on Linux)
    /// 4. `.jot` in the current working directory
    pub fn data_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .or_else(|| dirs::data_dir().map(|d| d.join("jot")))
            .unwrap_or_else(|| PathBuf::from(".jot"))
    }

    /// Resolve the debounce quiet period, with CLI argument taking precedence.
    pub fn quiet_period(&self, cli_ms: Option<u64>) -> Duration {
        cli_ms
            .or(self.debounce_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_QUIET_PERIOD)
    }

    /// Resolve every setting for this invocation.
    pub fn settings(&self, cli_dir: Option<&PathBuf>, cli_quiet_ms: Option<u64>) -> Settings {
        Settings {
            data_dir: self.data_dir(cli_dir),
            quiet: self.quiet_period(cli_quiet_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_no_dir() {
        let config = Config::default();
        assert!(config.dir.is_none());
        assert!(config.debounce_ms.is_none());
    }

    #[test]
    fn data_dir_prefers_cli_arg() {
        let config = Config {
            dir: Some(PathBuf::from("/config/notes")),
            debounce_ms: None,
        };
        let cli_dir = PathBuf::from("/cli/notes");
        assert_eq!(config.data_dir(Some(&cli_dir)), PathBuf::from("/cli/notes"));
    }

    #[test]
    fn data_dir_falls_back_to_config() {
        let config = Config {
            dir: Some(PathBuf::from("/config/notes")),
            debounce_ms: None,
        };
        assert_eq!(config.data_dir(None), PathBuf::from("/config/notes"));
    }

    #[test]
    fn data_dir_default_ends_with_app_name() {
        let config = Config::default();
        let dir = config.data_dir(None);
        assert!(dir.ends_with("jot") || dir.ends_with(".jot"));
    }

    #[test]
    fn quiet_period_precedence() {
        let config = Config {
            dir: None,
            debounce_ms: Some(250),
        };
        assert_eq!(config.quiet_period(Some(5)), Duration::from_millis(5));
        assert_eq!(config.quiet_period(None), Duration::from_millis(250));
        assert_eq!(Config::default().quiet_period(None), DEFAULT_QUIET_PERIOD);
    }

    #[test]
    fn load_from_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert!(config.dir.is_none());
    }

    #[test]
    fn load_from_parses_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "dir = \"/srv/notes\"\ndebounce_ms = 300\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.dir, Some(PathBuf::from("/srv/notes")));
        assert_eq!(config.debounce_ms, Some(300));
    }

    #[test]
    fn load_from_rejects_bad_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "dir = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();

        assert!(format!("{err:#}").contains("failed to parse config file"));
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("jot/config.toml"));
    }
}
