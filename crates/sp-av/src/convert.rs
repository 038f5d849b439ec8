//! Container conversion presets.
//!
//! Each preset pairs an expected upload extension with the ffmpeg argument
//! set that re-encodes or remuxes it into MP4. The preset only builds the
//! argv; running ffmpeg is the caller's job.

use std::path::Path;

/// Suffix appended to the input's stem for the converted output.
pub const CONVERTED_SUFFIX: &str = "_converted.mp4";

/// One supported conversion.
#[derive(Debug, Clone, Copy)]
pub struct ConversionPreset {
    /// Display label for messages ("MP3", "MKV").
    pub label: &'static str,
    /// Required upload extension, without the dot.
    pub expected_ext: &'static str,
    /// Codec arguments inserted between input and output.
    pub codec_args: &'static [&'static str],
}

/// Re-encode MP3 audio into an MP4 container.
pub const MP3_TO_MP4: ConversionPreset = ConversionPreset {
    label: "MP3",
    expected_ext: "mp3",
    codec_args: &["-c:a", "aac"],
};

/// Remux MKV into MP4, copying video and re-encoding audio.
pub const MKV_TO_MP4: ConversionPreset = ConversionPreset {
    label: "MKV",
    expected_ext: "mkv",
    codec_args: &["-c:v", "copy", "-c:a", "aac"],
};

impl ConversionPreset {
    /// Whether an uploaded file name carries the expected extension.
    pub fn matches(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.expected_ext)
    }

    /// Output file name for a given input name: `<stem>_converted.mp4`.
    pub fn output_name(&self, file_name: &str) -> String {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        format!("{stem}{CONVERTED_SUFFIX}")
    }

    /// Build the full ffmpeg argv for this conversion.
    pub fn ffmpeg_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let mut args = vec!["-i".to_string(), input.display().to_string()];
        args.extend(self.codec_args.iter().map(|s| s.to_string()));
        args.push(output.display().to_string());
        args
    }
}
