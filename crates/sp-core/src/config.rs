//! Application configuration types.
//!
//! The top-level [`Config`] is deserialized from TOML and carries the server,
//! tools, and packaging sections. Every section defaults sensibly so a
//! missing or empty config file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub tools: ToolsConfig,
    pub packaging: PackagingConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_bytes: 512 * 1024 * 1024,
        }
    }
}

/// External tool settings.
///
/// Path overrides take precedence over `PATH` lookup when they exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg_path: Option<PathBuf>,
    pub ffprobe_path: Option<PathBuf>,
    pub packager_path: Option<PathBuf>,
    /// Maximum execution time for a single tool invocation, in seconds.
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            ffprobe_path: None,
            packager_path: None,
            timeout_secs: 300,
        }
    }
}

/// Adaptive-packaging defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingConfig {
    /// HLS segment duration in seconds.
    pub segment_duration: u32,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            segment_duration: 6,
        }
    }
}

impl Config {
    /// Deserialize a `Config` from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }
        if self.server.max_upload_bytes == 0 {
            warnings.push("server.max_upload_bytes is 0; all uploads will be rejected".into());
        }
        if self.tools.timeout_secs == 0 {
            warnings.push("tools.timeout_secs is 0; every invocation will time out".into());
        }
        if self.packaging.segment_duration == 0 {
            warnings.push("packaging.segment_duration is 0; the packager will reject it".into());
        }

        for (name, path) in [
            ("ffmpeg", &self.tools.ffmpeg_path),
            ("ffprobe", &self.tools.ffprobe_path),
            ("packager", &self.tools.packager_path),
        ] {
            if let Some(p) = path {
                if !p.exists() {
                    warnings.push(format!(
                        "tools.{name}_path {} does not exist; falling back to PATH lookup",
                        p.display()
                    ));
                }
            }
        }

        warnings
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Validation(format!("failed to read config file {}: {e}", path.display()))
    })?;
    Config::from_toml(&content)
}

/// Load config from a custom path, default locations, or fall back to
/// defaults when no file is found.
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./streampack.toml",
        "~/.config/streampack/config.toml",
        "/etc/streampack/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}
