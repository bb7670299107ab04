use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use shared::domain::PlatformClass;
use tracing::debug;

/// Platform-appropriate content handle for a picked document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// On-disk reference; bytes are read when the upload is dispatched.
    Path(PathBuf),
    /// Contents buffered at pick time, with the media type recorded then.
    Memory { bytes: Vec<u8>, media_type: String },
}

/// Unified shape produced by every acquisition strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub source: FileSource,
    pub size: Option<u64>,
}

/// Capability seam over the native file-selection surface, restricted to PDF
/// documents. `Ok(None)` means the user cancelled; cancellation is not an
/// error and must leave caller state untouched.
#[async_trait]
pub trait FileAcquisition: Send + Sync {
    async fn pick_document(&self) -> anyhow::Result<Option<SelectedFile>>;
}

/// Native-class strategy: blocking dialog, path handle, lazy byte access.
pub struct DialogFilePicker;

#[async_trait]
impl FileAcquisition for DialogFilePicker {
    async fn pick_document(&self) -> anyhow::Result<Option<SelectedFile>> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF documents", &["pdf"])
            .pick_file()
        else {
            return Ok(None);
        };

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("document.pdf")
            .to_string();
        let size = std::fs::metadata(&path).map(|meta| meta.len()).ok();
        debug!(file = %name, "dialog picker selected document");

        Ok(Some(SelectedFile {
            name,
            source: FileSource::Path(path),
            size,
        }))
    }
}

/// Web-class strategy: the dialog handle is read eagerly into memory, the
/// way a browser hands over a `File` object, and the media type is recorded
/// at pick time.
pub struct BufferedFilePicker;

#[async_trait]
impl FileAcquisition for BufferedFilePicker {
    async fn pick_document(&self) -> anyhow::Result<Option<SelectedFile>> {
        let Some(handle) = rfd::AsyncFileDialog::new()
            .add_filter("PDF documents", &["pdf"])
            .pick_file()
            .await
        else {
            return Ok(None);
        };

        let name = handle.file_name();
        let bytes = handle.read().await;
        let media_type = mime_guess::from_path(&name)
            .first_raw()
            .unwrap_or("application/pdf")
            .to_string();
        let size = Some(bytes.len() as u64);
        debug!(file = %name, media_type = %media_type, "buffered picker selected document");

        Ok(Some(SelectedFile {
            name,
            source: FileSource::Memory { bytes, media_type },
            size,
        }))
    }
}

/// Startup strategy selection: one picker per platform class, chosen once,
/// instead of per-call platform conditionals.
pub fn select_picker(platform: PlatformClass) -> Arc<dyn FileAcquisition> {
    match platform {
        PlatformClass::Native => Arc::new(DialogFilePicker),
        PlatformClass::Web => Arc::new(BufferedFilePicker),
    }
}
