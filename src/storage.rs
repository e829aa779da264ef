//! Temporary-file persistence for captured and upscaled photos.

use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::error::Result;

/// Writes PNG files into a scratch directory when persistence is enabled.
#[derive(Debug, Clone)]
pub struct TempStore {
    dir: PathBuf,
    persist: bool,
}

impl TempStore {
    pub fn new(dir: impl Into<PathBuf>, persist: bool) -> Self {
        Self {
            dir: dir.into(),
            persist,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_persistent(&self) -> bool {
        self.persist
    }

    /// Create the scratch directory if persistence is enabled.
    pub fn ensure_dir(&self) -> Result<()> {
        if self.persist {
            std::fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }

    /// Save `bytes` as `<dir>/<prefix>_<16 hex>.png`.
    ///
    /// Returns `None` without touching the filesystem when persistence is off.
    pub fn save(&self, prefix: &str, bytes: &[u8]) -> Result<Option<PathBuf>> {
        if !self.persist {
            return Ok(None);
        }

        let path = self.dir.join(unique_name(prefix));
        std::fs::write(&path, bytes)?;
        debug!(path = %path.display(), size = bytes.len(), "Saved image file");
        Ok(Some(path))
    }
}

fn unique_name(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}_{}.png", prefix, &id[..16])
}
