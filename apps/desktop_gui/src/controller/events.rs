//! UI/backend events and error modeling for the upload screen.

use shared::domain::UploadedFileRecord;
use upload_core::UploadError;

pub enum UiEvent {
    BackendReady,
    FileSelected { name: String, size: Option<u64> },
    PickCancelled,
    UploadStarted { name: String },
    UploadSucceeded { record: UploadedFileRecord },
    UploadFailed { message: String },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Rejection,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    PickFile,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("rejected") || message_lower.contains("status") {
            UiErrorCategory::Rejection
        } else if message_lower.contains("no file selected")
            || message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("timed out")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
            || message_lower.contains("dns")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Rejection => "Server",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

/// User-facing notice for a failed upload attempt, one text per error class.
pub fn upload_failure_notice(err: &UploadError) -> String {
    match err {
        UploadError::NoFileSelected => "No file selected. Please choose a file first.".to_string(),
        UploadError::UploadInFlight => "An upload is already in progress.".to_string(),
        UploadError::Rejected { status } => {
            format!("Upload failed: server responded with {status}")
        }
        UploadError::FileRead { name, .. } => {
            format!("Could not read '{name}' from disk.")
        }
        UploadError::Transport(_) | UploadError::InvalidResponse(_) => {
            "Something went wrong during upload.".to_string()
        }
    }
}
