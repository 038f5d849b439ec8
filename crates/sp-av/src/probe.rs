//! FFprobe-based media probing.
//!
//! Shells out to `ffprobe -v quiet -print_format json -show_streams` through
//! the [`ToolRunner`] seam. The tool's JSON is kept as a raw
//! [`serde_json::Value`] for passthrough responses (its schema belongs to
//! ffprobe, not to us) and additionally lifted into typed [`ProbedStream`]
//! records for packaging-plan derivation.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use sp_core::{Error, Result};

use crate::command::ToolRunner;
use crate::tools::ToolConfig;

/// One stream as reported by ffprobe, reduced to the fields planning needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbedStream {
    /// Stream kind: "video", "audio", "subtitle", "data", ...
    #[serde(default)]
    pub codec_type: Option<String>,
    #[serde(default)]
    pub tags: ProbedTags,
}

/// Container-level tags attached to a stream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbedTags {
    #[serde(default)]
    pub language: Option<String>,
}

impl ProbedStream {
    /// Language tag, defaulting to "und" when unspecified.
    pub fn language_or_und(&self) -> &str {
        self.tags.language.as_deref().unwrap_or("und")
    }
}

/// Probe a media file, returning ffprobe's own JSON document.
pub async fn probe_json(
    runner: &dyn ToolRunner,
    ffprobe: &ToolConfig,
    path: &Path,
) -> Result<Value> {
    let args = vec![
        "-v".to_string(),
        "quiet".to_string(),
        "-print_format".to_string(),
        "json".to_string(),
        "-show_streams".to_string(),
        path.display().to_string(),
    ];

    let output = runner.run(ffprobe, &args, None).await?;

    serde_json::from_str(&output.stdout)
        .map_err(|e| Error::parse("ffprobe", format!("invalid JSON output: {e}")))
}

/// Lift the `streams` array out of an ffprobe document.
///
/// A document without a `streams` array is a parse error; individual
/// malformed entries degrade to empty records (which planning then skips)
/// so stream indices stay aligned with the source array.
pub fn probed_streams(doc: &Value) -> Result<Vec<ProbedStream>> {
    let streams = doc
        .get("streams")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::parse("ffprobe", "no streams found in metadata"))?;

    Ok(streams
        .iter()
        .map(|s| serde_json::from_value(s.clone()).unwrap_or_default())
        .collect())
}
