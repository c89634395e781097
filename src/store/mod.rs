//! In-memory note collection with debounced persistence.
//!
//! [`NoteStore`] is the single writer of the collection. Every mutation is
//! applied in memory immediately. Tag changes, creation and deletion are
//! written to storage straight away; title and content edits go through a
//! [`Debouncer`] per field so that a burst of keystrokes becomes one write.
//! Storage failures are logged and otherwise ignored: the in-memory
//! collection stays authoritative.

mod debounce;

pub use debounce::{Clock, DEFAULT_QUIET_PERIOD, Debouncer, ManualClock, SystemClock};

use crate::domain::{Note, NoteId, Tag, TagFilter, image, matches};
use crate::storage::NoteStorage;
use chrono::Utc;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Debounced field of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Content,
}

/// The authoritative note collection and the active selection.
pub struct NoteStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    notes: Vec<Note>,
    active: Option<NoteId>,
    // Pending slots hold the id of the edited note; the value is already
    // applied in memory.
    title_write: Debouncer<NoteId>,
    content_write: Debouncer<NoteId>,
}

impl<S: NoteStorage> NoteStore<S> {
    /// Creates an empty store over `storage` using the real clock.
    pub fn new(storage: S, quiet: Duration) -> Self {
        Self::with_clock(storage, SystemClock, quiet)
    }
}

impl<S: NoteStorage, C: Clock> NoteStore<S, C> {
    /// Creates an empty store over `storage` with an explicit clock.
    pub fn with_clock(storage: S, clock: C, quiet: Duration) -> Self {
        Self {
            storage,
            clock,
            notes: Vec::new(),
            active: None,
            title_write: Debouncer::new(quiet),
            content_write: Debouncer::new(quiet),
        }
    }

    /// Replaces the collection with what storage holds.
    ///
    /// A read failure leaves the store empty; it is logged, not returned.
    pub fn load(&mut self) {
        self.notes = match self.storage.read() {
            Ok(notes) => notes,
            Err(e) => {
                tracing::warn!(error = %e, kind = ?e.kind(), "could not read notes; starting empty");
                Vec::new()
            }
        };
        self.dedup_ids();
        self.active = None;
        self.title_write.cancel();
        self.content_write.cancel();
        tracing::info!(count = self.notes.len(), location = %self.storage.location(), "loaded notes");
    }

    /// Drops records whose id repeats an earlier one, keeping the first.
    fn dedup_ids(&mut self) {
        let mut seen = HashSet::new();
        let before = self.notes.len();
        self.notes.retain(|n| seen.insert(n.id()));
        if self.notes.len() != before {
            tracing::warn!(dropped = before - self.notes.len(), "dropped notes with duplicate ids");
        }
    }

    // ===========================================
    // Queries
    // ===========================================

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == id)
    }

    pub fn active_id(&self) -> Option<NoteId> {
        self.active
    }

    pub fn active(&self) -> Option<&Note> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Notes passing the tag filter and containing `query`, in collection order.
    pub fn search(&self, query: &str, filter: &TagFilter) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| matches(n, query, filter))
            .collect()
    }

    /// Every tag in use, once, in the order first seen.
    pub fn all_tags(&self) -> Vec<&Tag> {
        let mut seen = HashSet::new();
        self.notes
            .iter()
            .flat_map(|n| n.tags())
            .filter(|t| seen.insert(*t))
            .collect()
    }

    // ===========================================
    // Selection
    // ===========================================

    /// Makes `id` the active note. Returns false if no such note exists.
    pub fn select(&mut self, id: NoteId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.active = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.active = None;
    }

    // ===========================================
    // Mutations
    // ===========================================

    /// Creates an untitled note at the front of the list and makes it active.
    pub fn create(&mut self) -> NoteId {
        let id = NoteId::generate(Utc::now(), self.notes.iter().map(Note::id));
        self.notes.insert(0, Note::new(id));
        self.active = Some(id);
        tracing::debug!(%id, "created note");
        self.persist();
        id
    }

    /// Sets the title of note `id`. The write is debounced.
    pub fn update_title(&mut self, id: NoteId, title: &str) -> bool {
        self.edit_field(id, Field::Title, title.to_string())
    }

    /// Sets the content of note `id`. The write is debounced.
    pub fn update_content(&mut self, id: NoteId, content: &str) -> bool {
        self.edit_field(id, Field::Content, content.to_string())
    }

    /// Replaces the text after the leading image, keeping the image.
    pub fn update_body(&mut self, id: NoteId, text: &str) -> bool {
        let Some(note) = self.get(id) else {
            return self.ignore(id, "update body");
        };
        let content = image::with_text(note.content(), text);
        self.edit_field(id, Field::Content, content)
    }

    /// Replaces or prepends the leading image, keeping the text.
    pub fn set_image(&mut self, id: NoteId, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() || url.contains(')') {
            tracing::debug!(%id, "ignoring unusable image url");
            return false;
        }
        let Some(note) = self.get(id) else {
            return self.ignore(id, "set image");
        };
        let content = image::with_image(note.content(), url);
        self.edit_field(id, Field::Content, content)
    }

    /// Adds a tag to note `id`. Blank and duplicate tags are ignored.
    pub fn add_tag(&mut self, id: NoteId, tag: &str) -> bool {
        let Some(note) = self.get_mut(id) else {
            return self.ignore(id, "add tag");
        };
        if !note.add_tag(tag) {
            tracing::debug!(%id, tag, "tag ignored");
            return false;
        }
        self.persist();
        true
    }

    /// Removes a tag from note `id` if present.
    pub fn remove_tag(&mut self, id: NoteId, tag: &str) -> bool {
        let Some(note) = self.get_mut(id) else {
            return self.ignore(id, "remove tag");
        };
        if !note.remove_tag(tag) {
            return false;
        }
        self.persist();
        true
    }

    /// Removes note `id`, clearing the selection if it was active.
    pub fn delete_note(&mut self, id: NoteId) -> bool {
        let Some(pos) = self.notes.iter().position(|n| n.id() == id) else {
            return self.ignore(id, "delete");
        };
        self.notes.remove(pos);
        if self.active == Some(id) {
            self.active = None;
        }
        tracing::debug!(%id, "deleted note");
        self.persist();
        true
    }

    // ===========================================
    // Debounced Writes
    // ===========================================

    /// Writes every field whose quiet period has elapsed.
    ///
    /// Returns the number of writes performed.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now();
        let due = [
            (Field::Title, self.title_write.take_due(now)),
            (Field::Content, self.content_write.take_due(now)),
        ];
        self.commit(due)
    }

    /// Writes every pending field now.
    pub fn flush(&mut self) -> usize {
        let pending = [
            (Field::Title, self.title_write.take()),
            (Field::Content, self.content_write.take()),
        ];
        self.commit(pending)
    }

    /// Drops pending writes. Their edits stay in memory but are not persisted
    /// until something else writes the collection.
    pub fn discard_pending(&mut self) -> bool {
        let title = self.title_write.cancel();
        let content = self.content_write.cancel();
        title || content
    }

    pub fn has_pending(&self) -> bool {
        self.title_write.is_pending() || self.content_write.is_pending()
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.title_write.deadline(), self.content_write.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.title_write.quiet_period()
    }

    // ===========================================
    // Internals
    // ===========================================

    fn get_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id() == id)
    }

    fn ignore(&self, id: NoteId, op: &str) -> bool {
        tracing::debug!(%id, op, "no such note; ignoring");
        false
    }

    fn edit_field(&mut self, id: NoteId, field: Field, value: String) -> bool {
        let Some(note) = self.get_mut(id) else {
            return self.ignore(id, "edit");
        };
        match field {
            Field::Title => note.set_title(&value),
            Field::Content => note.set_content(&value),
        }

        let now = self.clock.now();
        let slot = match field {
            Field::Title => &mut self.title_write,
            Field::Content => &mut self.content_write,
        };
        if slot.schedule(id, now) {
            tracing::trace!(%id, ?field, "debounced write rescheduled");
        }
        true
    }

    fn commit<const N: usize>(&self, edits: [(Field, Option<NoteId>); N]) -> usize {
        let mut writes = 0;
        for (field, edit) in edits {
            let Some(id) = edit else {
                continue;
            };
            tracing::debug!(%id, ?field, "debounced write firing");
            self.persist();
            writes += 1;
        }
        writes
    }

    /// Writes the whole collection. Failures are logged, never returned.
    fn persist(&self) {
        if let Err(e) = self.storage.write(&self.notes) {
            tracing::warn!(
                error = %e,
                kind = ?e.kind(),
                location = %self.storage.location(),
                "failed to save notes"
            );
        }
    }
}
