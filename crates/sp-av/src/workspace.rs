//! Per-request scratch workspace.
//!
//! Every incoming request that touches the filesystem gets its own uniquely
//! named temporary directory. Uploads are persisted into it, external tools
//! run with it as their working directory, and the whole tree is removed when
//! the [`Workspace`] drops — on success, validation failure, and tool failure
//! alike.

use std::path::{Path, PathBuf};

use sp_core::{Error, Result};
use tempfile::TempDir;

/// Scratch directory scoped to a single request.
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    /// Create a fresh uniquely-named scratch directory.
    pub fn create() -> Result<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix("streampack-")
            .tempdir()
            .map_err(|e| Error::Workspace(format!("failed to create scratch directory: {e}")))?;
        Ok(Self { temp_dir })
    }

    /// Path of the scratch directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of a file inside the scratch directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Persist uploaded bytes under the given file name.
    ///
    /// Only the final path component of `name` is used, so a hostile
    /// `../../etc/passwd` upload name cannot escape the workspace.
    pub fn save(&self, name: &str, data: &[u8]) -> Result<PathBuf> {
        let file_name = Path::new(name)
            .file_name()
            .ok_or_else(|| Error::validation(format!("invalid upload file name: {name:?}")))?;
        let path = self.temp_dir.path().join(file_name);
        std::fs::write(&path, data)?;
        Ok(path)
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("path", &self.temp_dir.path())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_is_unique() {
        let a = Workspace::create().unwrap();
        let b = Workspace::create().unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn save_writes_inside_workspace() {
        let ws = Workspace::create().unwrap();
        let path = ws.save("clip.mp4", b"data").unwrap();
        assert!(path.starts_with(ws.path()));
        assert_eq!(std::fs::read(&path).unwrap(), b"data");
    }

    #[test]
    fn save_strips_directories_from_name() {
        let ws = Workspace::create().unwrap();
        let path = ws.save("../../escape.mp4", b"data").unwrap();
        assert!(path.starts_with(ws.path()));
        assert_eq!(path.file_name().unwrap(), "escape.mp4");
    }

    #[test]
    fn save_rejects_empty_name() {
        let ws = Workspace::create().unwrap();
        assert!(ws.save("..", b"data").is_err());
    }

    #[test]
    fn dropped_workspace_is_removed() {
        let path;
        {
            let ws = Workspace::create().unwrap();
            ws.save("clip.mp4", b"data").unwrap();
            path = ws.path().to_path_buf();
        }
        assert!(!path.exists());
    }
}
