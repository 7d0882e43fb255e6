//! Shell command execution
//!
//! Commands are handed to the platform shell as a single line, so the
//! configured tool paths are used exactly as written.

use std::io;

use tokio::process::Command;
use tracing::debug;

/// Captured result of one shell command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShellOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ShellOutput {
    /// Output of a command that exited cleanly and printed nothing to stderr
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
            ..Self::default()
        }
    }

    /// Output of a command that exited with `code` after printing `stderr`
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Why the command counts as failed, if it does
    ///
    /// A non-zero exit fails, and so does any diagnostic text on stderr.
    pub fn failure_message(&self) -> Option<String> {
        let stderr = self.stderr.trim();

        if !self.success {
            let status = match self.code {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            };
            return Some(if stderr.is_empty() {
                status
            } else {
                format!("{status}: {stderr}")
            });
        }

        if !stderr.is_empty() {
            return Some(stderr.to_string());
        }

        None
    }
}

/// Something that can run a shell command line to completion
#[allow(async_fn_in_trait)]
pub trait Shell {
    async fn run(&self, command_line: &str) -> io::Result<ShellOutput>;
}

impl<S: Shell + ?Sized> Shell for &S {
    async fn run(&self, command_line: &str) -> io::Result<ShellOutput> {
        (**self).run(command_line).await
    }
}

/// Runs commands through `sh -c` (`cmd /C` on Windows)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl Shell for SystemShell {
    async fn run(&self, command_line: &str) -> io::Result<ShellOutput> {
        debug!(command = command_line, "spawning shell command");

        let output = shell_command(command_line).output().await?;

        Ok(ShellOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(command_line);
    command
}
