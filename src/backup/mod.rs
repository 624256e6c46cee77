mod logic;

use anyhow::Result;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::utils::process::CommandRunner;

/// Public entry point for the backup process.
/// Dumps the configured database and returns the path of the written dump.
pub async fn run_backup_flow<R: CommandRunner>(app_config: &AppConfig, runner: &R) -> Result<PathBuf> {
    logic::perform_backup_orchestration(app_config, runner).await
}
