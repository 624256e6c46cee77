//! Database Dump/Restore Tool
//!
//! Builds mysqldump, pg_dump and mongodump (or their restore counterparts)
//! command lines from one set of options and runs them.

// databasedumper/src/main.rs
use anyhow::{Context, Result};
use databasedumper::Dumper;
use databasedumper::config::AppConfig;
use databasedumper::utils::process::ShellCommandRunner;
use databasedumper::{backup, restore};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Main entry point for the dump/restore tool
#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run_app().await {
        Ok(_) => {
            println!("✅ Operation finished.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_app() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config_path = PathBuf::from(args.get(2).map(String::as_str).unwrap_or(DEFAULT_CONFIG_PATH));
    let app_config = AppConfig::load_from_json(&config_path)
        .context(format!("Failed to load application configuration from {}", config_path.display()))?;

    let choice = if args.len() > 1 {
        args[1].trim().to_string()
    } else {
        prompt_choice()?
    };

    let runner = ShellCommandRunner::default();

    match choice.as_str() {
        "1" | "backup" => {
            println!("🚀 Starting Backup Process...");
            let written = backup::run_backup_flow(&app_config, &runner)
                .await
                .context("Backup process failed")?;
            println!("Backup file: {}", written.display());
        }
        "2" | "restore" => {
            println!("🔄 Starting Restore Process...");
            restore::run_restore_flow(&app_config, &runner)
                .await
                .context("Restore process failed")?;
        }
        "3" | "command" => {
            let dumper = Dumper::new(app_config.engine, app_config.options.clone());
            let credential_file = &dumper.options().credential_source;
            println!("Dump:    {}", dumper.get_dump_command(credential_file, ""));
            println!("Restore: {}", dumper.get_restore_command(credential_file, ""));
        }
        _ => {
            println!("❌ Invalid choice. Please enter '1' (backup), '2' (restore), or '3' (command).");
            anyhow::bail!("Invalid operation choice");
        }
    }
    Ok(())
}

/// Prompts user to select an operation
///
/// Returns the user's choice as String
fn prompt_choice() -> Result<String> {
    use std::io::{stdin, stdout, Write};

    println!("Select an operation:");
    println!("1. Take Backup (or type 'backup')");
    println!("2. Restore Backup (or type 'restore')");
    println!("3. Print Dump/Restore Commands (or type 'command')");
    print!("Enter your choice: ");
    stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    stdin().read_line(&mut input).context("Failed to read user input")?;
    Ok(input.trim().to_string())
}
