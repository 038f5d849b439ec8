//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which wires a full [`AppContext`] around a
//! scripted [`FakeRunner`] so no real ffmpeg/ffprobe/packager binaries are
//! needed. The [`TestHarness::with_server`] constructor starts Axum on a
//! random port for HTTP-level testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sp_av::{ToolConfig, ToolOutput, ToolRegistry, ToolRunner};
use sp_core::{Config, Error};
use streampack::server::{create_router, AppContext};

/// One recorded tool invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub tool: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// File names present in the working directory at invocation time.
    /// Scratch dirs are gone by the time a response arrives, so isolation
    /// assertions rely on this snapshot.
    pub cwd_files: Vec<String>,
}

#[derive(Debug, Clone)]
enum Script {
    Succeed { stdout: String, stderr: String },
    Fail { message: String, output: String },
}

#[derive(Default)]
struct FakeInner {
    calls: Vec<RecordedCall>,
    scripts: HashMap<String, Script>,
}

/// Scripted [`ToolRunner`]: records every invocation and replays the
/// configured response per tool. Unscripted tools succeed with empty output.
#[derive(Clone, Default)]
pub struct FakeRunner {
    inner: Arc<Mutex<FakeInner>>,
}

impl FakeRunner {
    pub fn succeed_with(&self, tool: &str, stdout: &str, stderr: &str) {
        self.inner.lock().unwrap().scripts.insert(
            tool.to_string(),
            Script::Succeed {
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
    }

    pub fn fail_with(&self, tool: &str, message: &str, output: &str) {
        self.inner.lock().unwrap().scripts.insert(
            tool.to_string(),
            Script::Fail {
                message: message.to_string(),
                output: output.to_string(),
            },
        );
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn calls_for(&self, tool: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.tool == tool).collect()
    }
}

#[async_trait]
impl ToolRunner for FakeRunner {
    async fn run(
        &self,
        tool: &ToolConfig,
        args: &[String],
        cwd: Option<&Path>,
    ) -> sp_core::Result<ToolOutput> {
        let cwd_files = cwd
            .and_then(|dir| std::fs::read_dir(dir).ok())
            .map(|entries| {
                let mut names: Vec<String> = entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect();
                names.sort();
                names
            })
            .unwrap_or_default();

        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedCall {
            tool: tool.name.clone(),
            args: args.to_vec(),
            cwd: cwd.map(Path::to_path_buf),
            cwd_files,
        });

        match inner.scripts.get(&tool.name) {
            Some(Script::Succeed { stdout, stderr }) => Ok(ToolOutput {
                stdout: stdout.clone(),
                stderr: stderr.clone(),
            }),
            Some(Script::Fail { message, output }) => Err(Error::tool_with_output(
                tool.name.clone(),
                message.clone(),
                output.clone(),
            )),
            None => Ok(ToolOutput::default()),
        }
    }
}

/// Test harness wrapping a fully-constructed [`AppContext`] backed by a
/// [`FakeRunner`].
pub struct TestHarness {
    pub ctx: AppContext,
    pub runner: FakeRunner,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let runner = FakeRunner::default();

        let tools = ToolRegistry::with_tools(["ffmpeg", "ffprobe", "packager"].map(|name| {
            ToolConfig {
                name: name.to_string(),
                path: PathBuf::from(format!("/usr/bin/{name}")),
                timeout: Duration::from_secs(config.tools.timeout_secs),
            }
        }));

        let ctx = AppContext {
            config: Arc::new(config),
            tools: Arc::new(tools),
            runner: Arc::new(runner.clone()),
        };

        Self { ctx, runner }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = create_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}
