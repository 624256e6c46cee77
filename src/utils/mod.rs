pub mod process;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use which::which;

/// Finds a client executable, either by explicit path or in the system PATH.
pub fn find_executable(binary: &Path) -> Result<PathBuf> {
    which(binary).with_context(|| {
        format!(
            "{} executable not found. Please ensure the database client tools are installed and in your PATH, or set command_binary_path.",
            binary.display()
        )
    })
}
