//! External command execution
//!
//! Collectors never talk to subprocess machinery directly; they go through
//! the [`CommandRunner`] trait so tests can substitute canned output.

use crate::{CollectError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Trait defining the interface for running external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute a shell command and capture its standard output as text.
    ///
    /// Returns `CollectError::Command` when the process cannot be spawned
    /// or exits non-zero; a raw fault never escapes this boundary. Retry
    /// policy belongs to the caller (and no caller retries; a single
    /// failure degrades that collector's portion of the snapshot).
    async fn run(&self, command: &str) -> Result<String>;
}

/// Production runner that executes commands through `sh -c`.
///
/// Uses tokio's async subprocess primitive so a blocked tool never stalls
/// the runtime's other tasks. No timeout is imposed: a stuck external tool
/// stalls that single request's collector indefinitely. That is a known
/// availability gap, kept deliberately until the intended behavior of the
/// tools under load is confirmed.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    /// Create a new shell runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<String> {
        debug!("Executing command: {}", command);

        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| CollectError::Command {
                command: command.to_string(),
                stderr: format!("failed to spawn: {e}"),
            })?;

        if !output.status.success() {
            return Err(CollectError::Command {
                command: command.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_stdout() {
        let runner = ShellRunner::new();
        let output = runner.run("echo hello").await.unwrap();
        assert_eq!(output, "hello\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_command_failure() {
        let runner = ShellRunner::new();
        let err = runner.run("exit 3").await.unwrap_err();
        assert!(matches!(err, CollectError::Command { .. }));
    }

    #[tokio::test]
    async fn test_missing_binary_is_command_failure() {
        let runner = ShellRunner::new();
        let err = runner
            .run("definitely-not-a-real-tool --version")
            .await
            .unwrap_err();
        match err {
            CollectError::Command { command, stderr } => {
                assert!(command.starts_with("definitely-not-a-real-tool"));
                assert!(!stderr.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stderr_is_not_mixed_into_stdout() {
        let runner = ShellRunner::new();
        let output = runner.run("echo out; echo err >&2").await.unwrap();
        assert_eq!(output, "out\n");
    }
}
