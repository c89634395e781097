//! Search query and tag filter matching.

use crate::domain::Note;
use std::fmt;
use std::str::FromStr;

/// Keyword that selects every note in the tag filter.
pub const ALL_TAGS: &str = "all";

/// Restricts a search to notes carrying one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    /// No restriction.
    #[default]
    All,
    /// Only notes carrying this exact tag.
    Tag(String),
}

impl TagFilter {
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => note.has_tag(tag),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::All => write!(f, "{ALL_TAGS}"),
            TagFilter::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

/// Error returned when parsing an empty tag filter.
#[derive(Debug, Clone, thiserror::Error)]
#[error("tag filter cannot be empty")]
pub struct ParseTagFilterError;

impl FromStr for TagFilter {
    type Err = ParseTagFilterError;

    /// Parses `all` as [`TagFilter::All`]; anything else is a tag name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "" => Err(ParseTagFilterError),
            ALL_TAGS => Ok(TagFilter::All),
            tag => Ok(TagFilter::Tag(tag.to_string())),
        }
    }
}

/// Returns true if `note` passes both the tag filter and the text query.
///
/// The query matches case-insensitively against the title, the content and
/// every tag. An empty query matches everything.
pub fn matches(note: &Note, query: &str, filter: &TagFilter) -> bool {
    filter.matches(note) && (query.is_empty() || note.contains_lowercase(&query.to_lowercase()))
}
