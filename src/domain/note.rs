//! Note record and its mutation rules.

use crate::domain::image;
use crate::domain::{NoteId, Tag};
use serde::{Deserialize, Serialize};

/// Title given to freshly created notes.
pub const PLACEHOLDER_TITLE: &str = "Untitled Note";

/// A single user-authored note.
///
/// The serialized form is one element of the persisted JSON array:
///
/// ```json
/// { "id": 1700000000000, "title": "Plan", "content": "buy milk", "tags": ["home"] }
/// ```
///
/// Deserialization is lenient: missing `content` or `tags` become empty, and
/// blank or duplicate tags are dropped instead of rejecting the document.
///
/// # Examples
///
/// ```
/// use jot::domain::{Note, NoteId};
///
/// let mut note = Note::new(NoteId::from_raw(1));
/// assert_eq!(note.title(), "Untitled Note");
/// assert!(note.add_tag("home"));
/// assert!(!note.add_tag("home"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NoteRecord")]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    tags: Vec<Tag>,
}

/// On-disk shape accepted when reading notes.
#[derive(Deserialize)]
struct NoteRecord {
    id: NoteId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        let mut note = Note {
            id: record.id,
            title: record.title,
            content: record.content,
            tags: Vec::with_capacity(record.tags.len()),
        };
        for tag in &record.tags {
            note.add_tag(tag);
        }
        note
    }
}

impl Note {
    /// Creates an empty note with the placeholder title.
    pub fn new(id: NoteId) -> Self {
        Self {
            id,
            title: PLACEHOLDER_TITLE.to_string(),
            content: String::new(),
            tags: Vec::new(),
        }
    }

    /// Creates a note with every field given, deduplicating tags.
    pub fn with_fields<I, T>(id: NoteId, title: &str, content: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut note = Self {
            id,
            title: title.to_string(),
            content: content.to_string(),
            tags: Vec::new(),
        };
        for tag in tags {
            note.add_tag(tag.as_ref());
        }
        note
    }

    // ===========================================
    // Accessors
    // ===========================================

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns true if the note carries `tag` (exact, case-sensitive match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == tag)
    }

    /// URL of the leading image, shown as a thumbnail in list views.
    pub fn image_url(&self) -> Option<&str> {
        image::leading_image_url(&self.content)
    }

    /// Content with the leading image removed, shown as the list preview and
    /// in the editor's text area.
    pub fn text(&self) -> &str {
        image::strip_leading_image(&self.content)
    }

    // ===========================================
    // Mutation
    // ===========================================

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
    }

    /// Adds a tag after trimming it.
    ///
    /// Returns false (and leaves the note untouched) when the tag is blank or
    /// already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let Ok(tag) = Tag::new(tag) else {
            return false;
        };
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Removes a tag. Returns false if the note did not carry it.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.as_str() != tag);
        self.tags.len() != before
    }

    /// Returns true if the title, content or any tag contains `needle`.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn contains_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.contains_lowercase(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note() -> Note {
        Note::new(NoteId::from_raw(1))
    }

    fn tag_names(note: &Note) -> Vec<&str> {
        note.tags().iter().map(|t| t.as_str()).collect()
    }

    // ===========================================
    // Construction
    // ===========================================

    #[test]
    fn new_note_has_placeholder_and_is_empty() {
        let note = note();
        assert_eq!(note.title(), PLACEHOLDER_TITLE);
        assert_eq!(note.content(), "");
        assert!(note.tags().is_empty());
    }

    #[test]
    fn with_fields_dedups_tags() {
        let note = Note::with_fields(NoteId::from_raw(1), "t", "c", ["a", "b", "a", " "]);
        assert_eq!(tag_names(&note), vec!["a", "b"]);
    }

    // ===========================================
    // Tags
    // ===========================================

    #[test]
    fn add_tag_trims_and_appends() {
        let mut note = note();
        assert!(note.add_tag("  work "));
        assert_eq!(tag_names(&note), vec!["work"]);
    }

    #[test]
    fn add_tag_ignores_blank() {
        let mut note = note();
        assert!(!note.add_tag("   "));
        assert!(note.tags().is_empty());
    }

    #[test]
    fn add_tag_is_idempotent() {
        let mut note = note();
        note.add_tag("home");
        let after_first = note.clone();
        assert!(!note.add_tag("home"));
        assert_eq!(note, after_first);
    }

    #[test]
    fn add_tag_is_case_sensitive() {
        let mut note = note();
        note.add_tag("home");
        assert!(note.add_tag("Home"));
        assert_eq!(tag_names(&note), vec!["home", "Home"]);
    }

    #[test]
    fn remove_then_add_restores_membership() {
        let mut note = Note::with_fields(NoteId::from_raw(1), "t", "", ["a", "b", "c"]);
        assert!(note.remove_tag("a"));
        assert!(note.add_tag("a"));
        let mut names = tag_names(&note);
        names.sort();
        assert_eq!(names, vec!["a", "b", "c"]);
        // Order is not restored
        assert_eq!(tag_names(&note), vec!["b", "c", "a"]);
    }

    #[test]
    fn remove_missing_tag_is_noop() {
        let mut note = Note::with_fields(NoteId::from_raw(1), "t", "", ["a"]);
        assert!(!note.remove_tag("z"));
        assert_eq!(tag_names(&note), vec!["a"]);
    }

    // ===========================================
    // Image helpers
    // ===========================================

    #[test]
    fn image_url_and_text_follow_leading_image() {
        let mut note = note();
        note.set_content("![x](data:abc)\nHello");
        assert_eq!(note.image_url(), Some("data:abc"));
        assert_eq!(note.text(), "Hello");
    }

    // ===========================================
    // Serde
    // ===========================================

    #[test]
    fn serializes_to_document_shape() {
        let note = Note::with_fields(NoteId::from_raw(5), "Plan", "buy milk", ["home"]);
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 5, "title": "Plan", "content": "buy milk", "tags": ["home"]})
        );
    }

    #[test]
    fn missing_tags_deserialize_as_empty() {
        let note: Note =
            serde_json::from_str(r#"{"id": 1, "title": "t", "content": "c"}"#).unwrap();
        assert!(note.tags().is_empty());
    }

    #[test]
    fn blank_and_duplicate_tags_are_dropped_on_read() {
        let note: Note = serde_json::from_str(
            r#"{"id": 1, "title": "t", "content": "", "tags": ["a", "", "a", " b "]}"#,
        )
        .unwrap();
        assert_eq!(tag_names(&note), vec!["a", "b"]);
    }

    #[test]
    fn missing_id_is_rejected() {
        let result: Result<Note, _> = serde_json::from_str(r#"{"title": "t"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn contains_lowercase_checks_all_fields() {
        let note = Note::with_fields(NoteId::from_raw(1), "Plan", "buy milk", ["Home"]);
        assert!(note.contains_lowercase("plan"));
        assert!(note.contains_lowercase("milk"));
        assert!(note.contains_lowercase("hom"));
        assert!(!note.contains_lowercase("work"));
    }
}
