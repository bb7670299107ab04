use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use file_access::{FileAcquisition, FileSource, SelectedFile};
use reqwest::{multipart, Client};
use shared::domain::UploadedFileRecord;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub mod config;
pub mod error;
pub mod session;

pub use config::{load_settings, Settings};
pub use error::UploadError;
pub use session::{SessionEvent, SessionState, UploadPhase};

/// Media type asserted for path-source uploads regardless of what the file
/// actually contains, carried over unchanged from the native upload branch
/// of the original client. Memory sources send their recorded type instead.
const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Null strategy for platforms without a selection surface wired up.
pub struct MissingFilePicker;

#[async_trait]
impl FileAcquisition for MissingFilePicker {
    async fn pick_document(&self) -> Result<Option<SelectedFile>> {
        Err(anyhow::anyhow!("no file picker available on this platform"))
    }
}

/// Read-only view of the session for a display layer.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub selected_name: Option<String>,
    pub selected_size: Option<u64>,
    pub in_flight: bool,
    pub history: Vec<UploadedFileRecord>,
}

/// Owns the session state and drives the two workflow operations against
/// the remote upload service. One instance per running app; the command
/// queue in front of it serializes operations, and the session mutex is
/// never held across the dialog or the network await.
pub struct UploadController {
    http: Client,
    base_url: String,
    picker: Arc<dyn FileAcquisition>,
    session: Mutex<SessionState>,
}

impl UploadController {
    pub fn new(base_url: impl Into<String>, picker: Arc<dyn FileAcquisition>) -> Arc<Self> {
        Arc::new(Self {
            http: Client::new(),
            base_url: base_url.into(),
            picker,
            session: Mutex::new(SessionState::new()),
        })
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.lock().await;
        SessionSnapshot {
            selected_name: session.selected().map(|file| file.name.clone()),
            selected_size: session.selected().and_then(|file| file.size),
            in_flight: session.in_flight(),
            history: session.history().to_vec(),
        }
    }

    /// Present the platform picker and record the confirmed selection.
    /// `Ok(None)` is a user cancel and leaves the previous selection as-is.
    pub async fn pick_file(&self) -> Result<Option<SelectedFile>> {
        let Some(file) = self.picker.pick_document().await? else {
            info!("file selection cancelled");
            return Ok(None);
        };

        info!(file = %file.name, size = file.size, "file selected");
        let mut session = self.session.lock().await;
        session.apply(SessionEvent::FileSelected(file.clone()));
        Ok(Some(file))
    }

    /// Dispatch the selected file as one multipart POST to
    /// `{base_url}/api/upload`. No timeout, no retry, no cancellation.
    ///
    /// Every exit path applies a terminal session event, so the in-flight
    /// flag cannot survive a return.
    pub async fn upload_file(&self) -> Result<UploadedFileRecord, UploadError> {
        let file = {
            let mut session = self.session.lock().await;
            if session.in_flight() {
                return Err(UploadError::UploadInFlight);
            }
            let Some(file) = session.selected().cloned() else {
                return Err(UploadError::NoFileSelected);
            };
            session.apply(SessionEvent::UploadStarted);
            file
        };

        let outcome = self.perform_upload(&file).await;

        let mut session = self.session.lock().await;
        match outcome {
            Ok(()) => {
                let record = UploadedFileRecord::new(file.name.clone());
                session.apply(SessionEvent::UploadSucceeded {
                    record: record.clone(),
                });
                Ok(record)
            }
            Err(err) => {
                warn!(file = %file.name, error = %err, "upload attempt failed");
                session.apply(SessionEvent::UploadFailed);
                Err(err)
            }
        }
    }

    async fn perform_upload(&self, file: &SelectedFile) -> Result<(), UploadError> {
        let (bytes, media_type) = match &file.source {
            FileSource::Path(path) => {
                let bytes =
                    tokio::fs::read(path)
                        .await
                        .map_err(|source| UploadError::FileRead {
                            name: file.name.clone(),
                            source,
                        })?;
                (bytes, PDF_MEDIA_TYPE.to_string())
            }
            FileSource::Memory { bytes, media_type } => (bytes.clone(), media_type.clone()),
        };

        let part = multipart::Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&media_type)
            .map_err(|err| {
                UploadError::Transport(format!("unusable media type '{media_type}': {err}"))
            })?;
        let form = multipart::Form::new().part("file", part);

        info!(file = %file.name, size = file.size, "uploading");
        let response = self
            .http
            .post(format!("{}/api/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|err| UploadError::Transport(err.to_string()))?;

        // The body is parsed before the status check, as the original client
        // did; the schema is not consumed beyond logging.
        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| UploadError::InvalidResponse(err.to_string()))?;

        if !status.is_success() {
            return Err(UploadError::Rejected {
                status: status.as_u16(),
            });
        }

        info!(file = %file.name, response = %body, "upload acknowledged");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
