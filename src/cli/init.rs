//! trk init command implementation
//!
//! Creates the initial trk config and an empty tracker data file.

use std::path::PathBuf;

use crate::cli::resolve_root;
use crate::config::{Config, CONFIG_FILE};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::FileBackedManager;

#[derive(serde::Serialize)]
struct InitReport {
    root: PathBuf,
    created: InitCreated,
}

#[derive(serde::Serialize)]
struct InitCreated {
    config: bool,
    data_file: bool,
}

pub fn run(root: Option<PathBuf>, json: bool, quiet: bool) -> Result<()> {
    let root = resolve_root(&root)?;
    std::fs::create_dir_all(&root)?;

    let config_path = root.join(CONFIG_FILE);
    let created_config = if config_path.exists() {
        false
    } else {
        Config::default().save(&config_path)?;
        true
    };

    let config = Config::load_from_root(&root);
    let data_file = config.data_file(&root);
    let created_data_file = if data_file.exists() {
        false
    } else {
        FileBackedManager::create(&data_file).save()?;
        true
    };

    let report = InitReport {
        root: root.clone(),
        created: InitCreated {
            config: created_config,
            data_file: created_data_file,
        },
    };

    let mut created_items = Vec::new();
    if created_config {
        created_items.push(CONFIG_FILE.to_string());
    }
    if created_data_file {
        created_items.push(data_file.display().to_string());
    }

    let header = if created_items.is_empty() {
        "trk init: nothing to do".to_string()
    } else {
        "trk init: initialized tracker".to_string()
    };

    let mut human = HumanOutput::new(header);
    human.push_summary("root", root.display().to_string());
    human.push_summary(
        "created",
        if created_items.is_empty() {
            "none".to_string()
        } else {
            created_items.join(", ")
        },
    );

    emit_success(OutputOptions { json, quiet }, "init", &report, Some(&human))
}
