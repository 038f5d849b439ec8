//! External tool invocation with timeout support.
//!
//! [`ToolCommand`] is an async builder around `tokio::process::Command` that
//! captures stdout/stderr, enforces a bounded execution time, and kills the
//! child on expiry. [`ToolRunner`] is the narrow capability seam the rest of
//! the application talks through, so tests can substitute a fake executor.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sp_core::{Error, Result};
use tokio::process::Command;

use crate::tools::ToolConfig;

/// Default command timeout: 5 minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Output captured from a tool execution.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

impl ToolOutput {
    /// Stdout followed by stderr, the way the original service consumed
    /// combined output for parsing and diagnostics.
    pub fn combined(&self) -> String {
        let mut combined = self.stdout.clone();
        combined.push_str(&self.stderr);
        combined
    }
}

/// A builder for constructing and executing external tool invocations.
///
/// # Example
///
/// ```no_run
/// use sp_av::ToolCommand;
/// use std::path::PathBuf;
///
/// # async fn example() -> sp_core::Result<()> {
/// let output = ToolCommand::new(PathBuf::from("ffprobe"))
///     .arg("-v").arg("quiet")
///     .arg("-print_format").arg("json")
///     .arg("-show_streams")
///     .arg("/path/to/video.mkv")
///     .execute()
///     .await?;
/// println!("{}", output.stdout);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
    current_dir: Option<PathBuf>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            current_dir: None,
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

    /// Set the working directory for the child process.
    ///
    /// Relative output paths in the argument list resolve against this, which
    /// keeps packager output inside a per-request scratch directory.
    pub fn current_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - [`Error::Tool`] if spawning fails or the process times out (the
    ///   child is killed on expiry).
    /// - [`Error::Tool`] if the process exits with non-zero status; the
    ///   captured combined output is attached for diagnostics.
    pub async fn execute(&self) -> Result<ToolOutput> {
        let program_name = self
            .program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        cmd.stdout(std::process::Stdio::piped());
        cmd.stderr(std::process::Stdio::piped());
        // Dropping the wait future on timeout must take the child with it.
        cmd.kill_on_drop(true);

        tracing::debug!(tool = %program_name, args = ?self.args, "running external tool");

        let child = cmd.spawn().map_err(|e| {
            Error::tool(program_name.clone(), format!("failed to spawn: {e}"))
        })?;

        let result = tokio::time::timeout(self.timeout, child.wait_with_output()).await;

        match result {
            Ok(Ok(output)) => {
                let tool_output = ToolOutput {
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                };

                if !output.status.success() {
                    return Err(Error::tool_with_output(
                        program_name,
                        format!("exited with status {}", output.status),
                        tool_output.combined(),
                    ));
                }

                Ok(tool_output)
            }
            Ok(Err(e)) => Err(Error::tool(
                program_name,
                format!("I/O error waiting for process: {e}"),
            )),
            Err(_elapsed) => Err(Error::tool(
                program_name,
                format!("timed out after {:?}", self.timeout),
            )),
        }
    }
}

/// Capability interface for running external tools.
///
/// The production implementation is [`ProcessRunner`]; tests substitute a
/// scripted fake so no real binaries are needed.
#[async_trait::async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run a tool to completion with the given arguments, capturing output.
    ///
    /// `cwd`, when set, becomes the child's working directory.
    async fn run(
        &self,
        tool: &ToolConfig,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<ToolOutput>;
}

/// [`ToolRunner`] backed by real child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

#[async_trait::async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(
        &self,
        tool: &ToolConfig,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<ToolOutput> {
        let mut cmd = ToolCommand::new(tool.path.clone());
        cmd.args(args.iter().cloned()).timeout(tool.timeout);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        cmd.execute().await
    }
}
