//! List and search command handlers.

use anyhow::{Context, Result};

use super::{Store, one_line, open_store, truncate_str};
use crate::cli::config::Settings;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::cli::{ListArgs, SearchArgs};
use crate::domain::{Note, NoteId, TagFilter};

pub fn handle_list(args: &ListArgs, settings: &Settings) -> Result<()> {
    let store = open_store(settings)?;
    run_search(&store, "", &args.tag, args.format)
}

pub fn handle_search(args: &SearchArgs, settings: &Settings) -> Result<()> {
    let store = open_store(settings)?;
    run_search(&store, &args.query, &args.tag, args.format)
}

fn run_search(store: &Store, query: &str, tag: &str, format: OutputFormat) -> Result<()> {
    let filter: TagFilter = tag
        .parse()
        .with_context(|| format!("invalid tag filter: '{}'", tag))?;
    let notes = store.search(query, &filter);
    print_notes(&notes, format)
}

/// Prints a note listing: thumbnail marker, title, preview, tags.
pub(crate) fn print_notes(notes: &[&Note], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
                return Ok(());
            }
            for line in format_listing(notes, None) {
                println!("{line}");
            }
            println!();
            println!("{} note(s)", notes.len());
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(|n| NoteListing::from(*n)).collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }
    Ok(())
}

/// Renders the human listing, marking `active` with `*`.
pub(crate) fn format_listing(notes: &[&Note], active: Option<NoteId>) -> Vec<String> {
    let mut lines = Vec::with_capacity(notes.len() * 2);
    for note in notes {
        let marker = if Some(note.id()) == active { "*" } else { " " };
        let thumb = if note.image_url().is_some() { "[img] " } else { "" };
        let title = truncate_str(note.title(), 50);
        let tags: Vec<_> = note.tags().iter().map(|t| format!("#{t}")).collect();
        lines.push(
            format!("{marker}{:<15} {thumb}{title}  {}", note.id(), tags.join(" "))
                .trim_end()
                .to_string(),
        );
        let preview = one_line(note.text());
        if !preview.is_empty() {
            lines.push(format!("{:16} {}", "", truncate_str(&preview, 60)));
        }
    }
    lines
}
