mod logic;

use anyhow::Result;

use crate::config::AppConfig;
use crate::utils::process::CommandRunner;

/// Public entry point for the restore process.
/// Loads `restore_path` into the configured database.
pub async fn run_restore_flow<R: CommandRunner>(app_config: &AppConfig, runner: &R) -> Result<()> {
    logic::perform_restore_orchestration(app_config, runner).await
}
