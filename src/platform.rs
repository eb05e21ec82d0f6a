//! Shell collaborators: file saving and clipboard access

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{ClientError, ClientResult};

/// Terminal effect of a successful download
#[async_trait]
pub trait FileSaver: Send + Sync {
    /// Write `contents` under `file_name`, returning the path written to.
    async fn save(&self, file_name: &str, contents: Vec<u8>) -> std::io::Result<PathBuf>;
}

/// Saves into a fixed directory, creating it on first use
pub struct DiskSaver {
    directory: PathBuf,
}

impl DiskSaver {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl FileSaver for DiskSaver {
    async fn save(&self, file_name: &str, contents: Vec<u8>) -> std::io::Result<PathBuf> {
        // Server-provided names are not trusted as paths.
        let file_name = Path::new(file_name)
            .file_name()
            .map(|n| n.to_owned())
            .unwrap_or_else(|| "download.bin".into());
        tokio::fs::create_dir_all(&self.directory).await?;
        let path = self.directory.join(file_name);
        tokio::fs::write(&path, contents).await?;
        Ok(path)
    }
}

/// Convenience clipboard access (copy a development credential)
pub trait ClipboardAccess: Send {
    fn copy_text(&self, text: &str) -> ClientResult<()>;
}

/// System clipboard via arboard
pub struct SystemClipboard;

impl ClipboardAccess for SystemClipboard {
    fn copy_text(&self, text: &str) -> ClientResult<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClientError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| ClientError::Clipboard(e.to_string()))
    }
}
