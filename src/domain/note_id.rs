//! Time-derived integer note identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A unique identifier for notes.
///
/// Ids are the creation time in milliseconds since the Unix epoch. They are
/// serialized as plain JSON numbers so existing documents stay readable.
///
/// # Examples
///
/// ```
/// use jot::domain::NoteId;
///
/// let id: NoteId = "1700000000000".parse().unwrap();
/// assert_eq!(id.as_i64(), 1_700_000_000_000);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wraps a raw id value.
    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Generates an id for a note created at `now` that is strictly greater
    /// than every id in `existing`.
    ///
    /// Ids follow the clock, but two notes created within the same millisecond
    /// (or after the clock stepped backwards) still get distinct ids. When the
    /// largest existing id is `i64::MAX` there is nothing above it, so the
    /// nearest free id at or below `now` is used instead.
    pub fn generate<I>(now: DateTime<Utc>, existing: I) -> Self
    where
        I: IntoIterator<Item = NoteId>,
    {
        let now_ms = now.timestamp_millis();
        let existing: Vec<NoteId> = existing.into_iter().collect();
        match existing.iter().max() {
            Some(max) if max.0 >= now_ms => match max.0.checked_add(1) {
                Some(next) => Self(next),
                None => Self::first_free(now_ms, &existing),
            },
            _ => Self(now_ms),
        }
    }

    /// Scans down from `start`, then up, for an id not in `existing`.
    fn first_free(start: i64, existing: &[NoteId]) -> Self {
        let taken: HashSet<i64> = existing.iter().map(|id| id.0).collect();
        (i64::MIN..=start)
            .rev()
            .chain(start.saturating_add(1)..=i64::MAX)
            .find(|candidate| !taken.contains(candidate))
            .map_or(Self(start), Self)
    }

    /// Returns the raw id value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Returns the creation time encoded in this id, if it is a valid timestamp.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId({})", self.0)
    }
}

/// Error returned when parsing an invalid note id.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid note id '{value}': {reason}")]
pub struct ParseNoteIdError {
    value: String,
    reason: String,
}

impl ParseNoteIdError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(NoteId)
            .map_err(|e| ParseNoteIdError {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}
