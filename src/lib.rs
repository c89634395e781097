//! jot - small personal notes with tags and a leading image

pub mod cli;
pub mod domain;
pub mod logging;
pub mod storage;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_image, handle_list, handle_new, handle_rm, handle_search, handle_shell,
        handle_show, handle_tag, handle_tags, handle_title, handle_untag, handle_where,
        handle_write,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load()?;
    let settings = config.settings(cli.dir.as_ref(), cli.quiet_ms);
    tracing::debug!(data_dir = %settings.data_dir.display(), quiet = ?settings.quiet, "settings resolved");

    match &cli.command {
        Command::New(args) => handle_new(args, &settings),
        Command::List(args) => handle_list(args, &settings),
        Command::Search(args) => handle_search(args, &settings),
        Command::Show(args) => handle_show(args, &settings),
        Command::Title(args) => handle_title(args, &settings),
        Command::Write(args) => handle_write(args, &settings),
        Command::Image(args) => handle_image(args, &settings),
        Command::Tag(args) => handle_tag(args, &settings),
        Command::Untag(args) => handle_untag(args, &settings),
        Command::Rm(args) => handle_rm(args, &settings),
        Command::Tags(args) => handle_tags(args, &settings),
        Command::Where(args) => handle_where(args, &settings),
        Command::Shell => handle_shell(&settings),
        Command::Completions(args) => {
            clap_complete::generate(args.shell, &mut Cli::command(), "jot", &mut io::stdout());
            Ok(())
        }
    }
}
