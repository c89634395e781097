//! Builder for seeded notes with sensible defaults.

#![allow(dead_code)]

use jot::domain::{Note, NoteId};

/// Builder for notes written straight into storage before a command runs.
#[derive(Debug, Clone)]
pub struct TestNote {
    id: i64,
    title: String,
    content: String,
    tags: Vec<String>,
}

impl TestNote {
    /// Creates a note with the given id and title and no content or tags.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            tags: Vec::new(),
        }
    }

    /// Sets the full content, including any leading image.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Adds a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn id_str(&self) -> String {
        self.id.to_string()
    }

    /// Converts to a domain note.
    pub fn to_note(&self) -> Note {
        Note::with_fields(NoteId::from_raw(self.id), &self.title, &self.content, &self.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_defaults() {
        let note = TestNote::new(7, "Plan").to_note();
        assert_eq!(note.id().as_i64(), 7);
        assert_eq!(note.title(), "Plan");
        assert_eq!(note.content(), "");
        assert!(note.tags().is_empty());
    }

    #[test]
    fn test_note_builder_fields() {
        let note = TestNote::new(7, "Plan")
            .content("buy milk")
            .tag("home")
            .tag("errands")
            .to_note();
        assert_eq!(note.content(), "buy milk");
        assert!(note.has_tag("home"));
        assert!(note.has_tag("errands"));
    }
}
