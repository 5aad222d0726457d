//! Builder for executing external tool commands with timeout support.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Command;

/// Default command timeout: 30 seconds.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// A hung tool must never stall a scan indefinitely, so every
/// execution is bounded by a timeout; hitting it reports the same
/// [`vv_core::Error::Tool`] shape as a spawn failure.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Set the maximum execution time.
    pub fn timeout(&mut self, d: Duration) -> &mut Self {
        self.timeout = d;
        self
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - [`vv_core::Error::Tool`] if spawning fails, the process exits
    ///   non-zero (message includes stderr), or the timeout elapses.
    pub async fn execute(&self) -> vv_core::Result<ToolOutput> {
        let program_name = self
            .program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(std::process::Stdio::null());
        cmd.stdout(std::process::Stdio::piped());
        cmd.stderr(std::process::Stdio::piped());
        cmd.kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| vv_core::Error::Tool {
            tool: program_name.clone(),
            message: format!("failed to spawn: {e}"),
        })?;

        let result = tokio::time::timeout(self.timeout, child.wait_with_output()).await;

        match result {
            Ok(Ok(output)) => {
                let tool_output = ToolOutput {
                    status: output.status,
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                };
                if !tool_output.status.success() {
                    return Err(vv_core::Error::Tool {
                        tool: program_name,
                        message: format!(
                            "exited with {}: {}",
                            tool_output.status,
                            tool_output.stderr.trim()
                        ),
                    });
                }
                Ok(tool_output)
            }
            Ok(Err(e)) => Err(vv_core::Error::Tool {
                tool: program_name,
                message: format!("failed to wait: {e}"),
            }),
            Err(_) => Err(vv_core::Error::Tool {
                tool: program_name,
                message: format!("timed out after {:?}", self.timeout),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_reports_tool_error() {
        let err = ToolCommand::new(PathBuf::from("definitely-not-a-real-tool"))
            .execute()
            .await
            .unwrap_err();
        match err {
            vv_core::Error::Tool { tool, message } => {
                assert_eq!(tool, "definitely-not-a-real-tool");
                assert!(message.contains("failed to spawn"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_reports_tool_error() {
        let mut cmd = ToolCommand::new(PathBuf::from("sleep"));
        cmd.arg("5").timeout(Duration::from_millis(50));
        let err = cmd.execute().await.unwrap_err();
        match err {
            vv_core::Error::Tool { message, .. } => {
                assert!(message.contains("timed out"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout() {
        let mut cmd = ToolCommand::new(PathBuf::from("echo"));
        cmd.arg("hello");
        let out = cmd.execute().await.unwrap();
        assert!(out.status.success());
        assert_eq!(out.stdout.trim(), "hello");
    }
}
