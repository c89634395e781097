//! Note resolution utilities.

use anyhow::{Result, bail};

use crate::domain::{Note, NoteId};
use crate::storage::NoteStorage;
use crate::store::{Clock, NoteStore};

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult<'a> {
    /// Exactly one note matched.
    Unique(&'a Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<&'a Note>),
    /// No notes matched.
    NotFound,
}

/// Prints the candidates of an ambiguous identifier to help distinguish them.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[&Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {} - {}", note.id(), note.title());
        if !note.tags().is_empty() {
            let tags: Vec<_> = note.tags().iter().map(|t| t.as_str()).collect();
            eprintln!("      tags: {}", tags.join(", "));
        }
    }
    eprintln!();
    eprintln!("Use the ID to specify which note you mean.");
}

/// Resolves a note identifier to a unique note.
///
/// Resolution order:
/// 1. Numeric ID
/// 2. Exact title match, ignoring case
pub fn resolve_note<'a, S, C>(store: &'a NoteStore<S, C>, identifier: &str) -> ResolveResult<'a>
where
    S: NoteStorage,
    C: Clock,
{
    let identifier = identifier.trim();

    if let Ok(id) = identifier.parse::<NoteId>()
        && let Some(note) = store.get(id)
    {
        return ResolveResult::Unique(note);
    }

    let wanted = identifier.to_lowercase();
    let mut candidates: Vec<&Note> = store
        .notes()
        .iter()
        .filter(|n| n.title().to_lowercase() == wanted)
        .collect();

    match candidates.len() {
        0 => ResolveResult::NotFound,
        1 => ResolveResult::Unique(candidates.remove(0)),
        _ => ResolveResult::Ambiguous(candidates),
    }
}

/// Resolves `identifier` to a note id, failing on ambiguity or absence.
pub(crate) fn resolve_id<S, C>(store: &NoteStore<S, C>, identifier: &str) -> Result<NoteId>
where
    S: NoteStorage,
    C: Clock,
{
    match resolve_note(store, identifier) {
        ResolveResult::Unique(note) => Ok(note.id()),
        ResolveResult::Ambiguous(notes) => {
            print_ambiguous_notes(identifier, &notes);
            bail!("ambiguous note identifier: {}", identifier)
        }
        ResolveResult::NotFound => bail!("note not found: {}", identifier),
    }
}
