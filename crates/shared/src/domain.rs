use chrono::Utc;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(UploadId);

impl UploadId {
    /// Generation-timestamp token: milliseconds since the Unix epoch.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }
}

/// One entry of the session upload history. Immutable once created and only
/// ever appended; the sequence order is the upload order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFileRecord {
    pub id: UploadId,
    pub name: String,
}

impl UploadedFileRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UploadId::now(),
            name: name.into(),
        }
    }
}

/// Runtime platform discriminator. Decides which file-acquisition strategy
/// and which base-URL environment value apply, once, at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformClass {
    Native,
    Web,
}

impl PlatformClass {
    /// Compile-target detection with an environment override
    /// (`UPLOADER_PLATFORM=web|native`); unknown values fall back to the
    /// compile target.
    pub fn detect() -> Self {
        match std::env::var("UPLOADER_PLATFORM").as_deref() {
            Ok("web") => return Self::Web,
            Ok("native") => return Self::Native,
            _ => {}
        }

        if cfg!(target_family = "wasm") {
            Self::Web
        } else {
            Self::Native
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Web => "web",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_ids_are_monotonic_enough_for_session_tokens() {
        let first = UploadId::now();
        let second = UploadId::now();
        assert!(second.0 >= first.0);
    }

    #[test]
    fn records_keep_their_original_filename() {
        let record = UploadedFileRecord::new("report.pdf");
        assert_eq!(record.name, "report.pdf");
    }
}
