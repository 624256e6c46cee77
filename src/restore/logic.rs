// databasedumper/src/restore/logic.rs
use anyhow::{Context, Result};
use std::path::Path;

use crate::config::AppConfig;
use crate::dumper::Dumper;
use crate::utils::find_executable;
use crate::utils::process::CommandRunner;

pub async fn perform_restore_orchestration<R: CommandRunner>(
    app_config: &AppConfig,
    runner: &R,
) -> Result<()> {
    let dumper = Dumper::new(app_config.engine, app_config.options.clone());
    let restore_path = Path::new(&dumper.options().restore_path);

    if restore_path.as_os_str().is_empty() {
        anyhow::bail!("restore_path must be set in config.json for restore");
    }
    if !restore_path.is_file() {
        return Err(anyhow::anyhow!(
            "Dump file for restore not found: {}",
            restore_path.display()
        ));
    }

    let binary = app_config.engine.restore_binary();
    let executable = find_executable(&dumper.binary_path(binary))?;
    println!("Found {} executable at: {}", binary, executable.display());

    println!(
        "🔄 Restoring {} database {} from {}",
        dumper.name(),
        dumper.options().db_name,
        restore_path.display()
    );
    dumper
        .restore(runner)
        .await
        .with_context(|| format!("Restore of database '{}' failed", dumper.options().db_name))?;

    println!("✓ Restore of {} completed", dumper.options().db_name);
    Ok(())
}
