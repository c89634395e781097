//! Core types: Note, NoteId, Tag, TagFilter, and the leading-image convention

mod filter;
pub mod image;
mod note;
mod note_id;
mod tag;

pub use filter::{ALL_TAGS, ParseTagFilterError, TagFilter, matches};
pub use note::{Note, PLACEHOLDER_TITLE};
pub use note_id::{NoteId, ParseNoteIdError};
pub use tag::{ParseTagError, Tag};
