//! # sp-av
//!
//! External-tool plumbing and packaging logic for streampack.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache paths to
//!   ffmpeg, ffprobe, and the packager binary.
//! - **Command execution** ([`ToolCommand`], [`ToolRunner`]) -- async
//!   builder with timeout support for running external processes, behind a
//!   swappable capability trait.
//! - **Workspace management** ([`Workspace`]) -- per-request scratch
//!   directory lifecycle with unconditional cleanup.
//! - **Probing** ([`probe`]) -- ffprobe JSON passthrough plus typed stream
//!   records for planning.
//! - **Stream-info parsing** ([`stream_info`]) -- structured records from
//!   the packager's `--dump_stream_info` text output.
//! - **Plan building** ([`plan`]) -- pure derivation of packager argv from
//!   probed metadata or upload parameters.
//! - **Conversion presets** ([`convert`]) -- ffmpeg argument sets for the
//!   container-conversion endpoints.

pub mod command;
pub mod convert;
pub mod plan;
pub mod probe;
pub mod stream_info;
pub mod tools;
pub mod workspace;

// ---- Re-exports for convenience ----

pub use command::{ProcessRunner, ToolCommand, ToolOutput, ToolRunner};
pub use plan::{PackagingDirective, PackagingPlan, StreamRole, DEFAULT_SEGMENT_DURATION};
pub use probe::ProbedStream;
pub use stream_info::{PackagingStatus, StreamDump, StreamRecord};
pub use tools::{ToolConfig, ToolInfo, ToolRegistry};
pub use workspace::Workspace;
