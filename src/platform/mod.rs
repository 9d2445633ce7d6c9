//! Operating system collaborators
//!
//! Everything that shells out lives behind [`CommandRunner`] so the focus
//! detector and the notifier can be exercised with scripted output in tests.
//!
//! Platform: macOS only. Other platforms get no-op handlers (see
//! [`crate::router::NotifyPlugin`]).

pub mod focus;
pub mod notifier;

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Captured result of an external program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs an external program and captures its output
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// [`CommandRunner`] backed by `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await
            .with_context(|| format!("Failed to spawn {}", program))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status.code(),
        })
    }
}

/// Run an AppleScript snippet and return its trimmed output.
///
/// A spawn failure, non-zero exit or empty output all yield `None`.
pub async fn run_osascript(runner: &dyn CommandRunner, script: &str) -> Option<String> {
    match runner.run("osascript", &["-e", script]).await {
        Ok(output) if output.success() => {
            let trimmed = output.stdout.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Ok(output) => {
            tracing::debug!(
                "osascript exited with {:?}: {}",
                output.status,
                output.stderr.trim()
            );
            None
        }
        Err(e) => {
            tracing::debug!("osascript unavailable: {}", e);
            None
        }
    }
}

/// Whether this build targets the platform the notifier supports
pub fn is_supported_platform() -> bool {
    cfg!(target_os = "macos")
}

/// Escape a string for embedding inside an AppleScript double-quoted string.
///
/// Backslashes go first so later replacements are not double-escaped.
pub fn escape_for_applescript(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
