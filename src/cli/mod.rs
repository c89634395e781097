//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// jot - small personal notes with tags and a leading image
#[derive(Parser, Debug)]
#[command(name = "jot", version, about, long_about = None)]
pub struct Cli {
    /// Data directory holding the notes (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Quiet period in milliseconds before title/content edits are saved
    #[arg(long, global = true, value_name = "MS")]
    pub quiet_ms: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// List notes, optionally filtered by tag
    #[command(name = "ls")]
    List(ListArgs),

    /// Search titles, contents and tags
    Search(SearchArgs),

    /// Show a note
    Show(ShowArgs),

    /// Set a note's title
    Title(TitleArgs),

    /// Replace a note's text (keeps the leading image)
    Write(WriteArgs),

    /// Attach an image to the top of a note, replacing any existing one
    Image(ImageArgs),

    /// Add a tag to a note
    Tag(TagArgs),

    /// Remove a tag from a note
    Untag(UntagArgs),

    /// Delete a note
    Rm(RmArgs),

    /// List all tags in use
    Tags(TagsArgs),

    /// Show which storage backend is in use
    Where(WhereArgs),

    /// Interactive editing session
    Shell,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note title (defaults to a placeholder)
    #[arg(short = 'T', long)]
    pub title: Option<String>,

    /// Initial content
    #[arg(short, long)]
    pub content: Option<String>,

    /// Tag for the note (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only notes carrying this tag ("all" for every note)
    #[arg(short, long = "tag", default_value = "all")]
    pub tag: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query (case-insensitive substring)
    pub query: String,

    /// Only notes carrying this tag ("all" for every note)
    #[arg(short, long = "tag", default_value = "all")]
    pub tag: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID or title
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `title` command
#[derive(Parser, Debug)]
pub struct TitleArgs {
    /// Note ID or title
    pub note: String,

    /// New title
    pub title: String,
}

/// Arguments for the `write` command
#[derive(Parser, Debug)]
pub struct WriteArgs {
    /// Note ID or title
    pub note: String,

    /// New text (read from stdin when omitted)
    pub text: Option<String>,

    /// Replace the whole content, including any leading image
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for the `image` command
#[derive(Parser, Debug)]
pub struct ImageArgs {
    /// Note ID or title
    pub note: String,

    /// Image URL (http(s), file or data URL)
    pub url: String,
}

/// Arguments for the `tag` command (add tag to note)
#[derive(Parser, Debug)]
pub struct TagArgs {
    /// Note ID or title
    pub note: String,

    /// Tag to add
    pub tag: String,
}

/// Arguments for the `untag` command (remove tag from note)
#[derive(Parser, Debug)]
pub struct UntagArgs {
    /// Note ID or title
    pub note: String,

    /// Tag to remove
    pub tag: String,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note ID or title
    pub note: String,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Show note counts for each tag
    #[arg(long)]
    pub counts: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `where` command
#[derive(Parser, Debug)]
pub struct WhereArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
