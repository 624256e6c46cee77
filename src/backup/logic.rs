// databasedumper/src/backup/logic.rs
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::dumper::{Dumper, Engine};
use crate::utils::find_executable;
use crate::utils::process::CommandRunner;

/// Name of a dump file: `<db>_<timestamp>.<ext>`, `.gz` appended when compressed.
pub fn backup_file_name(engine: Engine, db_name: &str, compress: bool, timestamp: &str) -> String {
    let db_name = if db_name.is_empty() { "backup" } else { db_name };
    let extension = if compress {
        format!("{}.gz", engine.dump_extension())
    } else {
        engine.dump_extension().to_string()
    };
    format!("{}_{}.{}", db_name, timestamp, extension)
}

/// Resolves where the dump goes and makes sure its directory exists.
fn prepare_destination(app_config: &AppConfig) -> Result<PathBuf> {
    let options = &app_config.options;
    let destination = if options.destination_path.is_empty() {
        let timestamp = Local::now().format("%Y-%m-%d_%H_%M_%S").to_string();
        app_config.backup_dir.join(backup_file_name(
            app_config.engine,
            &options.db_name,
            options.compress,
            &timestamp,
        ))
    } else {
        PathBuf::from(&options.destination_path)
    };

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create backup directory: {}", parent.display()))?;
    }
    Ok(destination)
}

pub async fn perform_backup_orchestration<R: CommandRunner>(
    app_config: &AppConfig,
    runner: &R,
) -> Result<PathBuf> {
    let destination = prepare_destination(app_config)?;

    let mut options = app_config.options.clone();
    options.destination_path = destination.display().to_string();
    let dumper = Dumper::new(app_config.engine, options);

    let executable = find_executable(&dumper.binary_path(app_config.engine.dump_binary()))?;
    println!("Found {} executable at: {}", app_config.engine.dump_binary(), executable.display());

    println!("🔍 Backing up {} database: {}", dumper.name(), dumper.options().db_name);
    dumper
        .dump(runner)
        .await
        .with_context(|| format!("Dump of database '{}' failed", dumper.options().db_name))?;

    match written_size(&destination) {
        Some(bytes) => println!("✓ Dump written to {} ({} bytes)", destination.display(), bytes),
        None => println!(
            "⚠️ Dump command finished but {} is missing or empty. Check the log for errors from {}.",
            destination.display(),
            app_config.engine.dump_binary()
        ),
    }
    Ok(destination)
}

/// Size of the dump at `path`, or `None` when nothing was written.
fn written_size(path: &Path) -> Option<u64> {
    fs::metadata(path).ok().map(|m| m.len()).filter(|&len| len > 0)
}
