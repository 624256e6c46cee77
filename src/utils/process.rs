// databasedumper/src/utils/process.rs
use log::{debug, warn};
use std::future::Future;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::errors::{DumperError, Result};

/// What a finished (or abandoned) shell command left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal or timed out.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Runs a shell command line, bounded by an optional timeout.
///
/// Implementations report exit status and timeouts through [`CommandOutput`];
/// only a failure to launch the process is an `Err`.
pub trait CommandRunner {
    fn execute(
        &self,
        command: &str,
        timeout: Option<Duration>,
    ) -> impl Future<Output = Result<CommandOutput>> + Send;
}

/// Runs commands through `bash -o pipefail -c` on the tokio runtime.
///
/// `pipefail` makes a compressed dump report the dump tool's exit status
/// instead of the compressor's. Each command runs in its own process group,
/// and the whole group is killed when the timeout fires.
#[derive(Debug, Clone)]
pub struct ShellCommandRunner {
    shell: String,
    shell_args: Vec<String>,
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        ShellCommandRunner {
            shell: "bash".to_string(),
            shell_args: vec!["-o".to_string(), "pipefail".to_string(), "-c".to_string()],
        }
    }
}

impl CommandRunner for ShellCommandRunner {
    async fn execute(&self, command: &str, timeout: Option<Duration>) -> Result<CommandOutput> {
        debug!("Spawning `{} {} {}`", self.shell, self.shell_args.join(" "), command);

        let mut shell = Command::new(&self.shell);
        shell
            .args(&self.shell_args)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        shell.process_group(0);

        let child = shell
            .spawn()
            .map_err(|e| DumperError::Process(format!("Failed to launch `{}`: {}", command, e)))?;
        let pid = child.id();

        let wait = child.wait_with_output();
        let output = match timeout {
            Some(limit) => match tokio::time::timeout(limit, wait).await {
                Ok(output) => output,
                Err(_) => {
                    if let Some(pid) = pid {
                        kill_process_group(pid);
                    }
                    return Ok(CommandOutput {
                        timed_out: true,
                        ..Default::default()
                    });
                }
            },
            None => wait.await,
        }
        .map_err(|e| DumperError::Process(format!("Failed to wait for `{}`: {}", command, e)))?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            timed_out: false,
        })
    }
}

/// Sends SIGKILL to the process group the shell `pid` created, reaching the
/// dump tool and every pipeline member.
#[cfg(unix)]
fn kill_process_group(pid: u32) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    match i32::try_from(pid) {
        Ok(raw) => {
            if let Err(e) = killpg(Pid::from_raw(raw), Signal::SIGKILL) {
                debug!("Could not signal process group {}: {}", pid, e);
            }
        }
        Err(_) => warn!("Process id {} out of range, cannot signal its group", pid),
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shell_runner_captures_output() -> anyhow::Result<()> {
        let output = ShellCommandRunner::default()
            .execute("echo dumped && echo warn 1>&2", Some(Duration::from_secs(10)))
            .await?;
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "dumped");
        assert_eq!(output.stderr.trim(), "warn");
        Ok(())
    }

    #[tokio::test]
    async fn test_shell_runner_reports_exit_code() -> anyhow::Result<()> {
        let output = ShellCommandRunner::default().execute("exit 3", None).await?;
        assert!(!output.success());
        assert_eq!(output.exit_code, Some(3));
        Ok(())
    }

    #[tokio::test]
    async fn test_shell_runner_times_out() -> anyhow::Result<()> {
        let output = ShellCommandRunner::default()
            .execute("sleep 5", Some(Duration::from_millis(100)))
            .await?;
        assert!(output.timed_out);
        assert!(!output.success());
        Ok(())
    }

    #[tokio::test]
    async fn test_shell_runner_pipeline_reports_first_failure() -> anyhow::Result<()> {
        let output = ShellCommandRunner::default()
            .execute("sh -c 'exit 2' | gzip > /dev/null", None)
            .await?;
        assert_eq!(output.exit_code, Some(2));
        Ok(())
    }

    /// A process counts as gone once it no longer exists or is a zombie.
    #[cfg(target_os = "linux")]
    fn process_is_gone(pid: &str) -> bool {
        match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
            Ok(stat) => stat
                .rsplit(')')
                .next()
                .map(|rest| rest.trim_start().starts_with('Z'))
                .unwrap_or(true),
            Err(_) => true,
        }
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_shell_runner_timeout_kills_spawned_tools() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let pid_file = dir.path().join("tool.pid");
        let record_pid = format!("sh -c 'echo $$ > {}; exec sleep 30'", pid_file.display());
        let commands = [record_pid.clone(), format!("{} | gzip > /dev/null", record_pid)];

        for command in commands {
            let output = ShellCommandRunner::default()
                .execute(&command, Some(Duration::from_millis(500)))
                .await?;
            assert!(output.timed_out);

            tokio::time::sleep(Duration::from_millis(200)).await;
            let pid = std::fs::read_to_string(&pid_file)?;
            assert!(process_is_gone(pid.trim()), "`{}` left pid {} running", command, pid.trim());
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_shell_runner_launch_failure() {
        let runner = ShellCommandRunner {
            shell: "/nonexistent/shell".to_string(),
            ..Default::default()
        };
        let result = runner.execute("true", None).await;
        assert!(matches!(result, Err(DumperError::Process(_))));
    }
}
