//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Note, image};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
///
/// The preview is the content without its leading image; the image URL is
/// reported separately as the thumbnail.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: i64,
    pub title: String,
    pub preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub tags: Vec<String>,
}

impl From<&Note> for NoteListing {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().as_i64(),
            title: note.title().to_string(),
            preview: note.text().to_string(),
            image: note.image_url().map(str::to_string),
            tags: note.tags().iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Full view of one note.
#[derive(Debug, Serialize)]
pub struct NoteDetail {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Every image referenced anywhere in the content.
    pub images: Vec<String>,
    pub tags: Vec<String>,
}

impl From<&Note> for NoteDetail {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().as_i64(),
            title: note.title().to_string(),
            content: note.content().to_string(),
            text: note.text().to_string(),
            image: note.image_url().map(str::to_string),
            images: image::image_refs(note.content())
                .into_iter()
                .map(|r| r.url.to_string())
                .collect(),
            tags: note.tags().iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// A tag with optional count.
#[derive(Debug, Serialize)]
pub struct TagListing {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// Storage backend description.
#[derive(Debug, Serialize)]
pub struct StorageListing {
    pub backend: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NoteId;
    use pretty_assertions::assert_eq;

    #[test]
    fn listing_splits_image_from_preview() {
        let note = Note::with_fields(NoteId::from_raw(1), "Trip", "![x](data:abc)\npack", ["travel"]);
        let listing = NoteListing::from(&note);
        assert_eq!(listing.preview, "pack");
        assert_eq!(listing.image.as_deref(), Some("data:abc"));
    }

    #[test]
    fn listing_json_omits_missing_image() {
        let note = Note::with_fields(NoteId::from_raw(1), "Plan", "buy milk", ["home"]);
        let json = serde_json::to_value(Output::new(vec![NoteListing::from(&note)])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"data": [{"id": 1, "title": "Plan", "preview": "buy milk", "tags": ["home"]}]})
        );
    }

    #[test]
    fn detail_lists_all_images() {
        let note = Note::with_fields(
            NoteId::from_raw(1),
            "t",
            "![a](one)\ntext ![b](two)",
            Vec::<String>::new(),
        );
        let detail = NoteDetail::from(&note);
        assert_eq!(detail.image.as_deref(), Some("one"));
        assert_eq!(detail.images, vec!["one", "two"]);
        assert_eq!(detail.text, "text ![b](two)");
    }
}
