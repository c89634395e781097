//! Show command handler.

use anyhow::Result;

use super::open_store;
use super::resolve::resolve_id;
use crate::cli::ShowArgs;
use crate::cli::config::Settings;
use crate::cli::output::{NoteDetail, Output, OutputFormat};
use crate::domain::{Note, image};

pub fn handle_show(args: &ShowArgs, settings: &Settings) -> Result<()> {
    let store = open_store(settings)?;
    let id = resolve_id(&store, &args.note)?;
    let Some(note) = store.get(id) else {
        anyhow::bail!("note not found: {}", args.note);
    };

    match args.format {
        OutputFormat::Human => {
            for line in render_note(note) {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&Output::new(NoteDetail::from(note)))?
            );
        }
    }
    Ok(())
}

/// Renders the editor view of a note: title, tags, image preview, text.
pub(crate) fn render_note(note: &Note) -> Vec<String> {
    let mut lines = vec![format!("{} [{}]", note.title(), note.id())];

    if !note.tags().is_empty() {
        let tags: Vec<_> = note.tags().iter().map(|t| t.as_str()).collect();
        lines.push(format!("tags: {}", tags.join(", ")));
    }
    if let Some(url) = note.image_url() {
        lines.push(format!("image: {}", url));
    }

    lines.push(String::new());
    lines.extend(note.text().lines().map(str::to_string));

    // Images further down are rendered as references after the text.
    let inline: Vec<_> = image::image_refs(note.text());
    if !inline.is_empty() {
        lines.push(String::new());
        for img in inline {
            lines.push(format!("[{}] {}", img.alt, img.url));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NoteId;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_plain_note() {
        let note = Note::with_fields(NoteId::from_raw(5), "Plan", "buy milk\nand eggs", ["home"]);
        assert_eq!(
            render_note(&note),
            vec!["Plan [5]", "tags: home", "", "buy milk", "and eggs"]
        );
    }

    #[test]
    fn render_shows_leading_image_separately() {
        let note = Note::with_fields(
            NoteId::from_raw(5),
            "Trip",
            "![x](data:abc)\npack ![map](m.png)",
            Vec::<String>::new(),
        );
        assert_eq!(
            render_note(&note),
            vec!["Trip [5]", "image: data:abc", "", "pack ![map](m.png)", "", "[map] m.png"]
        );
    }
}
