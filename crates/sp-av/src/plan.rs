//! Packaging-plan derivation.
//!
//! A [`PackagingPlan`] is a pure description of one packager invocation:
//! per-stream directives plus the master-playlist and segment-duration
//! terminals. Plans are built either from probed stream metadata
//! ([`plan_from_probe`]) or directly from upload request parameters
//! ([`plan_from_uploads`]), and rendered to the packager's argv with
//! [`PackagingPlan::to_args`]. No process execution happens here; running
//! the tool is the caller's job.
//!
//! The rendered argument names (`input=`, `stream=`, `stream_selector=`,
//! `language=`, `output=`, `playlist_name=`, `--hls_master_playlist_output`,
//! `--segment_duration`) are a fixed wire contract with the packager binary.

use std::path::{Path, PathBuf};

use crate::probe::ProbedStream;

/// Default HLS segment duration in seconds.
pub const DEFAULT_SEGMENT_DURATION: u32 = 6;

/// Master playlist file name.
pub const MASTER_PLAYLIST_NAME: &str = "master.m3u8";

/// Fixed output name for the explicit-upload video track.
pub const UPLOAD_VIDEO_OUTPUT: &str = "video_out.mp4";

/// Role a stream plays in the packaged output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamRole {
    Video,
    Audio,
    Text,
}

impl StreamRole {
    /// The packager's `stream=` descriptor value.
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamRole::Video => "video",
            StreamRole::Audio => "audio",
            StreamRole::Text => "text",
        }
    }
}

/// One stream-selection directive of a packaging plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PackagingDirective {
    /// Source file to read the stream from.
    pub input: PathBuf,
    /// Stream role within the output.
    pub role: StreamRole,
    /// Zero-based stream index within the input (probe-driven plans only).
    pub selector: Option<usize>,
    /// Language tag ("und" when the source did not specify one).
    pub language: Option<String>,
    /// Output media file path.
    pub output: PathBuf,
    /// Media playlist name (audio/text streams only).
    pub playlist: Option<String>,
}

impl PackagingDirective {
    /// Render the directive as a single packager stream descriptor.
    pub fn to_arg(&self) -> String {
        let mut arg = format!("input={},stream={}", self.input.display(), self.role.as_str());
        if let Some(selector) = self.selector {
            arg.push_str(&format!(",stream_selector={selector}"));
        }
        if let Some(ref language) = self.language {
            arg.push_str(&format!(",language={language}"));
        }
        arg.push_str(&format!(",output={}", self.output.display()));
        if let Some(ref playlist) = self.playlist {
            arg.push_str(&format!(",playlist_name={playlist}"));
        }
        arg
    }
}

/// A complete packager invocation: directives plus terminal flags.
#[derive(Debug, Clone, PartialEq)]
pub struct PackagingPlan {
    pub directives: Vec<PackagingDirective>,
    /// Master playlist output path.
    pub master_playlist: PathBuf,
    /// HLS segment duration in seconds.
    pub segment_duration: u32,
}

impl PackagingPlan {
    /// Render the full packager argv.
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = self.directives.iter().map(|d| d.to_arg()).collect();
        args.push("--hls_master_playlist_output".to_string());
        args.push(self.master_playlist.display().to_string());
        args.push("--segment_duration".to_string());
        args.push(self.segment_duration.to_string());
        args
    }

    /// Output media files the plan will produce.
    pub fn output_files(&self) -> Vec<PathBuf> {
        self.directives.iter().map(|d| d.output.clone()).collect()
    }
}

/// Derive a plan from probed stream metadata.
///
/// Video and audio streams are selected by their zero-based position in the
/// probe's stream array; audio carries its language tag (or "und"). Other
/// stream kinds (subtitle, data, attachment) are not packaged on this path —
/// the explicit-upload path is the supported way to package subtitles.
pub fn plan_from_probe(
    input: &Path,
    streams: &[ProbedStream],
    out_dir: &Path,
    segment_duration: u32,
) -> PackagingPlan {
    let mut directives = Vec::new();

    for (i, stream) in streams.iter().enumerate() {
        match stream.codec_type.as_deref() {
            Some("video") => directives.push(PackagingDirective {
                input: input.to_path_buf(),
                role: StreamRole::Video,
                selector: Some(i),
                language: None,
                output: out_dir.join(format!("video_{i}.mp4")),
                playlist: None,
            }),
            Some("audio") => {
                let language = stream.language_or_und().to_string();
                directives.push(PackagingDirective {
                    input: input.to_path_buf(),
                    role: StreamRole::Audio,
                    selector: Some(i),
                    output: out_dir.join(format!("audio_{language}_{i}.mp4")),
                    playlist: Some(format!("audio_{language}_{i}.m3u8")),
                    language: Some(language),
                });
            }
            _ => {}
        }
    }

    PackagingPlan {
        directives,
        master_playlist: out_dir.join(MASTER_PLAYLIST_NAME),
        segment_duration,
    }
}

/// Build a plan directly from upload request parameters.
///
/// One video directive with the fixed `video_out.mp4` output; one directive
/// per audio file with its caller-supplied language tag; one text directive
/// per subtitle file with language fixed to "en". Audio and subtitle outputs
/// are numbered with a 1-based counter. Output paths are relative and
/// resolve against the packager's working directory (the request scratch
/// dir), keeping concurrent requests isolated.
pub fn plan_from_uploads(
    video: &Path,
    audio: &[(PathBuf, String)],
    subtitles: &[PathBuf],
    segment_duration: u32,
) -> PackagingPlan {
    let mut directives = vec![PackagingDirective {
        input: video.to_path_buf(),
        role: StreamRole::Video,
        selector: None,
        language: None,
        output: PathBuf::from(UPLOAD_VIDEO_OUTPUT),
        playlist: None,
    }];

    for (n, (path, language)) in audio.iter().enumerate() {
        let n = n + 1;
        directives.push(PackagingDirective {
            input: path.clone(),
            role: StreamRole::Audio,
            selector: None,
            language: Some(language.clone()),
            output: PathBuf::from(format!("audio_{n}.mp4")),
            playlist: Some(format!("audio_{n}.m3u8")),
        });
    }

    for (n, path) in subtitles.iter().enumerate() {
        let n = n + 1;
        directives.push(PackagingDirective {
            input: path.clone(),
            role: StreamRole::Text,
            selector: None,
            language: Some("en".to_string()),
            output: PathBuf::from(format!("subtitle_{n}.mp4")),
            playlist: Some(format!("subtitle_{n}.m3u8")),
        });
    }

    PackagingPlan {
        directives,
        master_playlist: PathBuf::from(MASTER_PLAYLIST_NAME),
        segment_duration,
    }
}
