//! Metadata command handlers (tags, tag, untag, where).

use anyhow::Result;
use std::collections::HashMap;

use super::open_store;
use super::resolve::resolve_id;
use crate::cli::config::Settings;
use crate::cli::output::{Output, OutputFormat, StorageListing, TagListing};
use crate::cli::{TagArgs, TagsArgs, UntagArgs, WhereArgs};
use crate::storage::{self, NoteStorage};

pub fn handle_tags(args: &TagsArgs, settings: &Settings) -> Result<()> {
    let store = open_store(settings)?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for note in store.notes() {
        for tag in note.tags() {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }
    let tags = store.all_tags();

    match args.format {
        OutputFormat::Human => {
            if tags.is_empty() {
                println!("No tags found.");
            } else {
                for t in &tags {
                    if args.counts {
                        println!("{} ({})", t, counts[t.as_str()]);
                    } else {
                        println!("{}", t);
                    }
                }
            }
        }
        OutputFormat::Json => {
            let listings: Vec<TagListing> = tags
                .iter()
                .map(|t| TagListing {
                    name: t.to_string(),
                    count: args.counts.then(|| counts[t.as_str()]),
                })
                .collect();
            let out = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

pub fn handle_tag(args: &TagArgs, settings: &Settings) -> Result<()> {
    let mut store = open_store(settings)?;
    let id = resolve_id(&store, &args.note)?;

    if store.add_tag(id, &args.tag) {
        println!("Tagged [{}] with '{}'", id, args.tag.trim());
    } else {
        println!("Unchanged: [{}]", id);
    }
    Ok(())
}

pub fn handle_untag(args: &UntagArgs, settings: &Settings) -> Result<()> {
    let mut store = open_store(settings)?;
    let id = resolve_id(&store, &args.note)?;

    if store.remove_tag(id, &args.tag) {
        println!("Removed tag '{}' from [{}]", args.tag, id);
    } else {
        println!("Unchanged: [{}]", id);
    }
    Ok(())
}

pub fn handle_where(args: &WhereArgs, settings: &Settings) -> Result<()> {
    let backend = storage::detect(&settings.data_dir);
    let storage = backend.open()?;
    let listing = StorageListing {
        backend: backend.name().to_string(),
        location: storage.location(),
    };

    match args.format {
        OutputFormat::Human => println!("{}: {}", listing.backend, listing.location),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&Output::new(listing))?),
    }
    Ok(())
}
