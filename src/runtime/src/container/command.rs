//! Invocation of the docker-compatible runtime CLI.

use std::process::Stdio;

use nodeload_core::error::{LoadError, Result};
use tokio::process::Command;

/// A runtime CLI invocation, e.g. `docker exec kind-worker crictl images`.
#[derive(Debug, Clone)]
pub(crate) struct RuntimeCommand {
    binary: String,
    args: Vec<String>,
}

impl RuntimeCommand {
    pub(crate) fn new(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
            args: Vec::new(),
        }
    }

    pub(crate) fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub(crate) fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Short form for error messages: binary plus the first two arguments.
    pub(crate) fn display_name(&self) -> String {
        std::iter::once(self.binary.as_str())
            .chain(self.args.iter().take(2).map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion and return stdout.
    pub(crate) async fn output(&self) -> Result<String> {
        self.run(Stdio::null()).await
    }

    /// Run to completion with `stdin` connected to the child.
    pub(crate) async fn output_with_stdin(&self, stdin: impl Into<Stdio>) -> Result<String> {
        self.run(stdin.into()).await
    }

    async fn run(&self, stdin: Stdio) -> Result<String> {
        tracing::debug!(command = %self.binary, args = ?self.args, "Running runtime command");

        let output = Command::new(&self.binary)
            .args(&self.args)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| LoadError::CommandFailed {
                command: self.display_name(),
                message: format!("failed to spawn: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(LoadError::CommandFailed {
                command: self.display_name(),
                message: if stderr.is_empty() {
                    output.status.to_string()
                } else {
                    stderr
                },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
