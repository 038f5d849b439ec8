//! Streampack: an HTTP media-packaging service.
//!
//! Uploads are written into a per-request scratch directory, handed to
//! external tools (ffmpeg, ffprobe, packager) as child processes, and the
//! tools' output is parsed into structured JSON responses. See [`server`]
//! for the HTTP surface; the packaging logic lives in the `sp-av` crate.

pub mod server;
