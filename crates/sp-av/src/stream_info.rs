//! Parser for the packager's `--dump_stream_info` text output.
//!
//! The dump is line-oriented: each stream opens with a `Stream [...]` header
//! line carrying a `type:` field, followed by `key: value` attribute lines
//! until a blank line or the next header. The attribute set is whatever the
//! tool emits, so records are open-ended string maps rather than a fixed
//! struct. Parsing never fails; unparseable pieces are dropped silently.

use serde::Serialize;
use serde_json::{Map, Value};

/// Line prefix that opens a stream block.
const STREAM_PREFIX: &str = "Stream [";

/// Literal marker the packager prints after a successful run.
pub const COMPLETION_MARKER: &str = "Packaging completed successfully";

/// Overall packaging status reported in the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PackagingStatus {
    /// No completion marker was seen.
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
    /// The completion marker occurred somewhere in the dump.
    #[serde(rename = "completed successfully")]
    CompletedSuccessfully,
}

/// One stream's attributes: verbatim `key: value` pairs from the dump plus
/// the derived `duration_seconds` field when it can be computed.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct StreamRecord {
    fields: Map<String, Value>,
}

impl StreamRecord {
    /// The stream's `type` attribute (Video, Audio, Text, ...).
    pub fn kind(&self) -> &str {
        self.get("type").unwrap_or("unknown")
    }

    /// Look up a string attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// The derived duration in seconds, when present.
    pub fn duration_seconds(&self) -> Option<f64> {
        self.fields.get("duration_seconds").and_then(Value::as_f64)
    }

    fn insert(&mut self, key: &str, value: &str) {
        self.fields
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    /// Derive `duration_seconds` from `duration` and `time_scale`.
    ///
    /// Present iff both parse as integers and the time scale is non-zero;
    /// otherwise the field is omitted rather than failing the parse.
    fn derive_duration(&mut self) {
        let duration = self.get("duration").and_then(|s| s.parse::<i64>().ok());
        let time_scale = self.get("time_scale").and_then(|s| s.parse::<i64>().ok());

        if let (Some(duration), Some(time_scale)) = (duration, time_scale) {
            if time_scale != 0 {
                let seconds = duration as f64 / time_scale as f64;
                self.fields
                    .insert("duration_seconds".to_string(), seconds.into());
            }
        }
    }
}

/// Structured result of parsing a stream-info dump.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StreamDump {
    /// Streams in order of appearance.
    pub streams: Vec<StreamRecord>,
    /// Completion status.
    #[serde(rename = "packaging_status")]
    pub status: PackagingStatus,
}

/// Parse a stream-info dump into structured records.
///
/// Malformed input degrades gracefully: a dump with no stream blocks yields
/// an empty list and [`PackagingStatus::Unknown`], never an error.
pub fn parse(raw: &str) -> StreamDump {
    let lines: Vec<&str> = raw.lines().collect();
    let mut streams = Vec::new();
    let mut status = PackagingStatus::Unknown;

    for (i, line) in lines.iter().enumerate() {
        if line.contains(COMPLETION_MARKER) {
            status = PackagingStatus::CompletedSuccessfully;
        }

        if !line.starts_with(STREAM_PREFIX) {
            continue;
        }
        // A header without a type field does not open a record.
        let Some((_, stream_type)) = line.split_once("type:") else {
            continue;
        };

        let mut record = StreamRecord::default();
        record.insert("type", stream_type.trim());

        for inner in &lines[i + 1..] {
            let inner = inner.trim();
            if inner.is_empty() || inner.starts_with(STREAM_PREFIX) {
                break;
            }
            // Later duplicates overwrite earlier ones; lines without a
            // separator are skipped.
            if let Some((key, value)) = inner.split_once(':') {
                record.insert(key.trim(), value.trim());
            }
        }

        record.derive_duration();
        streams.push(record);
    }

    StreamDump { streams, status }
}
