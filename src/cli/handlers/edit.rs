//! Editing command handlers (title, write, image, rm).

use anyhow::{Context, Result, bail};
use std::io::Read;

use super::open_store;
use super::resolve::resolve_id;
use crate::cli::config::Settings;
use crate::cli::{ImageArgs, RmArgs, TitleArgs, WriteArgs};

pub fn handle_title(args: &TitleArgs, settings: &Settings) -> Result<()> {
    let mut store = open_store(settings)?;
    let id = resolve_id(&store, &args.note)?;

    store.update_title(id, &args.title);
    store.flush();

    println!("Renamed: {} [{}]", args.title, id);
    Ok(())
}

pub fn handle_write(args: &WriteArgs, settings: &Settings) -> Result<()> {
    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read note text from stdin")?;
            buf
        }
    };

    let mut store = open_store(settings)?;
    let id = resolve_id(&store, &args.note)?;

    if args.raw {
        store.update_content(id, &text);
    } else {
        store.update_body(id, &text);
    }
    store.flush();

    println!("Updated: [{}]", id);
    Ok(())
}

pub fn handle_image(args: &ImageArgs, settings: &Settings) -> Result<()> {
    let mut store = open_store(settings)?;
    let id = resolve_id(&store, &args.note)?;

    if !store.set_image(id, &args.url) {
        bail!("invalid image URL: '{}'", args.url);
    }
    store.flush();

    println!("Image set: [{}]", id);
    Ok(())
}

pub fn handle_rm(args: &RmArgs, settings: &Settings) -> Result<()> {
    let mut store = open_store(settings)?;
    let id = resolve_id(&store, &args.note)?;
    let title = store.get(id).map(|n| n.title().to_string()).unwrap_or_default();

    store.delete_note(id);

    println!("Deleted: {} [{}]", title, id);
    Ok(())
}
