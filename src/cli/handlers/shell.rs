//! Interactive editing session.
//!
//! The shell plays the part of the two-pane editor: `ls`/`search`/`filter`
//! drive the list pane, `select` picks the active note, and the editing
//! commands act on it. Title and text edits are saved after the debounce
//! quiet period even while the shell sits idle waiting for input.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use super::list::format_listing;
use super::open_store;
use super::resolve::{ResolveResult, resolve_note};
use super::show::render_note;
use crate::cli::config::Settings;
use crate::domain::{NoteId, TagFilter};
use crate::storage::NoteStorage;
use crate::store::{Clock, NoteStore};

const HELP: &str = "\
commands:
  new                 create a note and select it
  ls                  list notes matching the current search and filter
  search [QUERY]      set the search query (empty clears it)
  filter TAG|all      restrict the list to one tag
  tags                list all tags
  select NOTE         select a note by id or title
  show                show the selected note
  title TEXT          set the title
  write TEXT          replace the text (\\n for newlines), keeping the image
  image URL           attach an image at the top of the note
  tag TAG             add a tag
  untag TAG           remove a tag
  delete              delete the selected note
  flush               save pending edits now
  discard             drop pending edits without saving
  quit                save pending edits and leave";

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    Help,
    New,
    List,
    Search(String),
    Filter(String),
    Tags,
    Select(String),
    Show,
    Title(String),
    Write(String),
    Image(String),
    Tag(String),
    Untag(String),
    Delete,
    Flush,
    Discard,
    Quit,
}

/// Error returned for unparseable shell input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseShellError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

impl FromStr for ShellCommand {
    type Err = ParseShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let required = |name: &'static str| {
            if rest.is_empty() {
                Err(ParseShellError::MissingArgument(name))
            } else {
                Ok(rest.to_string())
            }
        };

        Ok(match word {
            "" => ShellCommand::Empty,
            "help" | "?" => ShellCommand::Help,
            "new" => ShellCommand::New,
            "ls" | "list" => ShellCommand::List,
            "search" => ShellCommand::Search(rest.to_string()),
            "filter" => ShellCommand::Filter(required("filter")?),
            "tags" => ShellCommand::Tags,
            "select" => ShellCommand::Select(required("select")?),
            "show" => ShellCommand::Show,
            "title" => ShellCommand::Title(rest.to_string()),
            "write" => ShellCommand::Write(rest.replace("\\n", "\n")),
            "image" => ShellCommand::Image(required("image")?),
            "tag" => ShellCommand::Tag(required("tag")?),
            "untag" => ShellCommand::Untag(required("untag")?),
            "delete" | "rm" => ShellCommand::Delete,
            "flush" => ShellCommand::Flush,
            "discard" => ShellCommand::Discard,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(ParseShellError::Unknown(other.to_string())),
        })
    }
}

/// List pane state: the search box and the tag filter selector.
#[derive(Debug, Clone, Default)]
pub struct ShellState {
    pub query: String,
    pub filter: TagFilter,
}

/// Whether the session continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs one line of input against the store, writing feedback to `out`.
pub fn execute<S, C, W>(
    store: &mut NoteStore<S, C>,
    state: &mut ShellState,
    line: &str,
    out: &mut W,
) -> io::Result<Flow>
where
    S: NoteStorage,
    C: Clock,
    W: Write,
{
    let command = match line.parse::<ShellCommand>() {
        Ok(command) => command,
        Err(e) => {
            writeln!(out, "{e}")?;
            return Ok(Flow::Continue);
        }
    };
    tracing::trace!(?command, "shell command");

    match command {
        ShellCommand::Empty => {}
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::New => {
            let id = store.create();
            writeln!(out, "created [{id}]")?;
        }
        ShellCommand::List => {
            let notes = store.search(&state.query, &state.filter);
            if notes.is_empty() {
                writeln!(out, "No notes found.")?;
            }
            for line in format_listing(&notes, store.active_id()) {
                writeln!(out, "{line}")?;
            }
        }
        ShellCommand::Search(query) => {
            state.query = query;
            let count = store.search(&state.query, &state.filter).len();
            writeln!(out, "{count} match(es)")?;
        }
        ShellCommand::Filter(tag) => match tag.parse::<TagFilter>() {
            Ok(filter) => {
                state.filter = filter;
                let count = store.search(&state.query, &state.filter).len();
                writeln!(out, "filter: {} ({count} match(es))", state.filter)?;
            }
            Err(e) => writeln!(out, "{e}")?,
        },
        ShellCommand::Tags => {
            let tags: Vec<_> = store.all_tags().iter().map(|t| t.to_string()).collect();
            if tags.is_empty() {
                writeln!(out, "No tags found.")?;
            } else {
                writeln!(out, "{}", tags.join(", "))?;
            }
        }
        ShellCommand::Select(identifier) => match resolve_note(store, &identifier) {
            ResolveResult::Unique(note) => {
                let id = note.id();
                store.select(id);
                writeln!(out, "selected [{id}]")?;
            }
            ResolveResult::Ambiguous(notes) => {
                let ids: Vec<_> = notes.iter().map(|n| n.id().to_string()).collect();
                writeln!(out, "ambiguous: {}", ids.join(", "))?;
            }
            ResolveResult::NotFound => writeln!(out, "note not found: {identifier}")?,
        },
        ShellCommand::Quit => return Ok(Flow::Quit),
        ShellCommand::Flush => {
            let writes = store.flush();
            writeln!(out, "saved {writes} pending edit(s)")?;
        }
        ShellCommand::Discard => {
            if store.discard_pending() {
                writeln!(out, "discarded pending edits")?;
            } else {
                writeln!(out, "nothing pending")?;
            }
        }
        editing => {
            let Some(id) = store.active_id() else {
                writeln!(out, "no note selected")?;
                return Ok(Flow::Continue);
            };
            edit_active(store, id, editing, out)?;
        }
    }
    Ok(Flow::Continue)
}

/// Commands that act on the selected note.
fn edit_active<S, C, W>(
    store: &mut NoteStore<S, C>,
    id: NoteId,
    command: ShellCommand,
    out: &mut W,
) -> io::Result<()>
where
    S: NoteStorage,
    C: Clock,
    W: Write,
{
    match command {
        ShellCommand::Show => {
            if let Some(note) = store.get(id) {
                for line in render_note(note) {
                    writeln!(out, "{line}")?;
                }
            }
        }
        ShellCommand::Title(title) => {
            store.update_title(id, &title);
        }
        ShellCommand::Write(text) => {
            store.update_body(id, &text);
        }
        ShellCommand::Image(url) => {
            if !store.set_image(id, &url) {
                writeln!(out, "invalid image URL")?;
            }
        }
        ShellCommand::Tag(tag) => {
            store.add_tag(id, &tag);
        }
        ShellCommand::Untag(tag) => {
            store.remove_tag(id, &tag);
        }
        ShellCommand::Delete => {
            store.delete_note(id);
            writeln!(out, "deleted [{id}]")?;
        }
        other => tracing::debug!(?other, "not an editing command"),
    }
    Ok(())
}

pub fn handle_shell(settings: &Settings) -> Result<()> {
    let mut store = open_store(settings)?;
    let mut state = ShellState::default();

    // stdin blocks, so it is read on its own thread; the main loop wakes up
    // for debounce deadlines in between lines.
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut stdout = io::stdout();
    tracing::info!(count = store.len(), "shell started");

    loop {
        let received = match store.next_deadline() {
            Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(line) => {
                let line = line.context("failed to read input")?;
                let flow = execute(&mut store, &mut state, &line, &mut stdout)
                    .context("failed to write output")?;
                stdout.flush().context("failed to write output")?;
                store.tick();
                if flow == Flow::Quit {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                store.tick();
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    let writes = store.flush();
    tracing::info!(writes, "shell closed");
    Ok(())
}
