//! Command handlers for the CLI.

mod edit;
mod list;
mod metadata;
mod new;
mod resolve;
mod shell;
mod show;


use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

use crate::cli::config::Settings;
use crate::storage::{self, NoteStorage};
use crate::store::NoteStore;

// Re-export public items
pub use edit::{handle_image, handle_rm, handle_title, handle_write};
pub use list::{handle_list, handle_search};
pub use metadata::{handle_tag, handle_tags, handle_untag, handle_where};
pub use new::handle_new;
pub use resolve::{ResolveResult, resolve_note};
pub use shell::{Flow, ParseShellError, ShellCommand, ShellState, execute, handle_shell};
pub use show::handle_show;

/// Note store over the backend detected for the data directory.
pub type Store = NoteStore<Box<dyn NoteStorage>>;

// ===========================================
// Shared Utilities
// ===========================================

/// Opens and loads the store for the configured data directory.
pub fn open_store(settings: &Settings) -> Result<Store> {
    open_store_at(&settings.data_dir, settings.quiet)
}

pub(crate) fn open_store_at(data_dir: &Path, quiet: Duration) -> Result<Store> {
    let backend = storage::detect(data_dir);
    let storage = backend
        .open()
        .with_context(|| format!("failed to open notes storage at {}", backend.path().display()))?;
    let mut store = NoteStore::new(storage, quiet);
    store.load();
    Ok(store)
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Collapses a multi-line text into one preview line.
pub(crate) fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
