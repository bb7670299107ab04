use thiserror::Error;

/// Terminal outcomes of a single upload attempt. None of these is fatal to
/// the process; every one leaves the session back in the idle phase.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("an upload is already in flight")]
    UploadInFlight,
    #[error("failed to read selected file '{name}': {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server rejected upload with status {status}")]
    Rejected { status: u16 },
    #[error("upload transport failure: {0}")]
    Transport(String),
    #[error("malformed response payload: {0}")]
    InvalidResponse(String),
}
