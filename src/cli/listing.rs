//! trk prioritized and history command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{item_line, open_tracker};
use crate::error::Result;
use crate::model::Item;
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct ListingOptions {
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ItemListReport {
    count: usize,
    items: Vec<Item>,
}

pub fn run_prioritized(opts: ListingOptions) -> Result<()> {
    let tracker = open_tracker(&opts.root)?;
    let items = tracker.prioritized();

    let mut human = HumanOutput::new(format!(
        "trk prioritized: {} scheduled item(s)",
        items.len()
    ));
    for item in &items {
        human.push_detail(item_line(item, item.kind().as_tag()));
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "prioritized",
        &ItemListReport {
            count: items.len(),
            items,
        },
        Some(&human),
    )
}

pub fn run_history(opts: ListingOptions) -> Result<()> {
    let tracker = open_tracker(&opts.root)?;
    let items = tracker.history();

    let mut human = HumanOutput::new(format!(
        "trk history: {} recently viewed item(s), oldest first",
        items.len()
    ));
    for item in &items {
        human.push_detail(item_line(item, item.kind().as_tag()));
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "history",
        &ItemListReport {
            count: items.len(),
            items,
        },
        Some(&human),
    )
}
