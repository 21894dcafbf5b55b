mod types;

pub use types::{VideoFile, VideoSource};

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

impl VideoFile {
    /// Describes a video on the local disk without reading its contents.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to read video file {}", path.display()))?;

        if !metadata.is_file() {
            return Err(anyhow::anyhow!("{} is not a file", path.display()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow::anyhow!("Invalid video file path: {}", path.display()))?;

        debug!("Selected video file {} ({} bytes)", name, metadata.len());

        Ok(Self {
            name,
            size: metadata.len(),
            path: Some(path.to_path_buf()),
        })
    }
}
