//! Session state and its reducer. The three fields the workflow owns live
//! behind a single mutation entry point so the upload state machine stays
//! testable without a rendering surface or a network.

use file_access::SelectedFile;
use shared::domain::UploadedFileRecord;

/// Workflow phase projection: `Idle` is both the initial state and the only
/// one a new upload may be dispatched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Uploading,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    FileSelected(SelectedFile),
    UploadStarted,
    UploadSucceeded { record: UploadedFileRecord },
    UploadFailed,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    selected: Option<SelectedFile>,
    history: Vec<UploadedFileRecord>,
    in_flight: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn history(&self) -> &[UploadedFileRecord] {
        &self.history
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn phase(&self) -> UploadPhase {
        if self.in_flight {
            UploadPhase::Uploading
        } else {
            UploadPhase::Idle
        }
    }

    /// Upload may only be dispatched with a selection present and nothing in
    /// flight; the display layer disables the trigger on the same predicate.
    pub fn can_upload(&self) -> bool {
        self.selected.is_some() && !self.in_flight
    }

    /// Single mutation entry point for the session.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::FileSelected(file) => {
                // A new pick replaces the selection, also mid-upload; the
                // in-flight attempt keeps its own clone.
                self.selected = Some(file);
            }
            SessionEvent::UploadStarted => {
                self.in_flight = true;
            }
            SessionEvent::UploadSucceeded { record } => {
                self.history.push(record);
                self.selected = None;
                self.in_flight = false;
            }
            SessionEvent::UploadFailed => {
                self.in_flight = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use file_access::FileSource;

    use super::*;

    fn picked(name: &str) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            source: FileSource::Memory {
                bytes: b"%PDF-1.4".to_vec(),
                media_type: "application/pdf".to_string(),
            },
            size: Some(8),
        }
    }

    #[test]
    fn walks_idle_uploading_idle_on_success() {
        let mut state = SessionState::new();
        assert_eq!(state.phase(), UploadPhase::Idle);

        state.apply(SessionEvent::FileSelected(picked("report.pdf")));
        state.apply(SessionEvent::UploadStarted);
        assert_eq!(state.phase(), UploadPhase::Uploading);
        assert!(!state.can_upload());

        state.apply(SessionEvent::UploadSucceeded {
            record: UploadedFileRecord::new("report.pdf"),
        });
        assert_eq!(state.phase(), UploadPhase::Idle);
        assert!(state.selected().is_none());
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.history()[0].name, "report.pdf");
    }

    #[test]
    fn returns_to_idle_on_failure_without_touching_selection_or_history() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::FileSelected(picked("a.pdf")));
        state.apply(SessionEvent::UploadStarted);
        state.apply(SessionEvent::UploadFailed);

        assert_eq!(state.phase(), UploadPhase::Idle);
        assert_eq!(state.selected().map(|f| f.name.as_str()), Some("a.pdf"));
        assert!(state.history().is_empty());
        assert!(state.can_upload());
    }

    #[test]
    fn upload_requires_selection_and_idle_phase() {
        let mut state = SessionState::new();
        assert!(!state.can_upload());

        state.apply(SessionEvent::FileSelected(picked("a.pdf")));
        assert!(state.can_upload());

        state.apply(SessionEvent::UploadStarted);
        assert!(!state.can_upload());
    }

    #[test]
    fn selection_may_be_replaced_while_an_upload_is_in_flight() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::FileSelected(picked("a.pdf")));
        state.apply(SessionEvent::UploadStarted);
        state.apply(SessionEvent::FileSelected(picked("b.pdf")));

        assert!(state.in_flight());
        assert_eq!(state.selected().map(|f| f.name.as_str()), Some("b.pdf"));
    }

    #[test]
    fn history_preserves_insertion_order() {
        let mut state = SessionState::new();
        for name in ["x.pdf", "y.pdf"] {
            state.apply(SessionEvent::FileSelected(picked(name)));
            state.apply(SessionEvent::UploadStarted);
            state.apply(SessionEvent::UploadSucceeded {
                record: UploadedFileRecord::new(name),
            });
        }

        let names: Vec<_> = state.history().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["x.pdf", "y.pdf"]);
    }
}
