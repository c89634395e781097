//! New note command handler.

use anyhow::Result;

use super::open_store;
use crate::cli::NewArgs;
use crate::cli::config::Settings;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::{Note, NoteId};
use crate::storage::NoteStorage;
use crate::store::{Clock, NoteStore};

/// Creates a note and applies the optional initial fields.
///
/// Blank tags are skipped like any other blank tag input.
pub fn create_note<S, C>(
    store: &mut NoteStore<S, C>,
    title: Option<&str>,
    content: Option<&str>,
    tags: &[String],
) -> NoteId
where
    S: NoteStorage,
    C: Clock,
{
    let id = store.create();
    if let Some(title) = title {
        store.update_title(id, title);
    }
    if let Some(content) = content {
        store.update_content(id, content);
    }
    for tag in tags {
        store.add_tag(id, tag);
    }
    id
}

pub fn handle_new(args: &NewArgs, settings: &Settings) -> Result<()> {
    let mut store = open_store(settings)?;

    let id = create_note(
        &mut store,
        args.title.as_deref(),
        args.content.as_deref(),
        &args.tags,
    );
    store.flush();

    let Some(note) = store.get(id) else {
        anyhow::bail!("created note {} vanished", id);
    };
    print_created(note, args.format)
}

fn print_created(note: &Note, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => println!("Created: {} [{}]", note.title(), note.id()),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&Output::new(NoteListing::from(note)))?
            );
        }
    }
    Ok(())
}
