//! Modal lifecycle and submission state machine.
//!
//! ```text
//! Idle(open) --submit--> Saving --ok--> Idle(closed, draft cleared)
//!                               \--err-> Idle(open, error shown, draft kept)
//! ```
//!
//! The editor never performs I/O itself: `begin_submit` hands out the payload
//! and the caller reports the result through `finish_submit`.

use tracing::{debug, warn};

use super::{SegmentDraft, SegmentPayload};
use crate::submit::SubmitError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Saving,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SegmentEditor {
    open: bool,
    draft: SegmentDraft,
    submission: SubmissionState,
    error: Option<String>,
}

impl SegmentEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_saving(&self) -> bool {
        self.submission == SubmissionState::Saving
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn draft(&self) -> &SegmentDraft {
        &self.draft
    }

    /// Mutable access for list editing. Refused while a request is in flight.
    pub fn draft_mut(&mut self) -> Option<&mut SegmentDraft> {
        (!self.is_saving()).then_some(&mut self.draft)
    }

    /// Reveal the modal with an empty draft.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.draft.clear();
        self.error = None;
    }

    /// Discard the draft and hide the modal. Ignored while saving since the
    /// cancel control is disabled then.
    pub fn cancel(&mut self) -> bool {
        if self.is_saving() {
            debug!("cancel ignored while a submission is in flight");
            return false;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.open = false;
        self.draft.clear();
        self.error = None;
    }

    /// Idle -> Saving. Returns the payload to send, or `None` when the editor
    /// is closed or a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<SegmentPayload> {
        if !self.open || self.is_saving() {
            return None;
        }
        self.error = None;
        self.submission = SubmissionState::Saving;
        Some(self.draft.payload())
    }

    /// Saving -> Idle. Success closes and resets, failure keeps the draft and
    /// shows the message.
    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) {
        if !self.is_saving() {
            warn!("submission result arrived while idle; ignoring");
            return;
        }
        self.submission = SubmissionState::Idle;
        match result {
            Ok(()) => self.reset(),
            Err(err) => self.error = Some(err.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn vip_editor() -> SegmentEditor {
        let mut editor = SegmentEditor::new();
        editor.open();
        let draft = editor.draft_mut().unwrap();
        draft.set_name("VIP Users");
        draft.set_pending("first_name");
        draft.add_pending();
        draft.set_pending("city");
        draft.add_pending();
        editor
    }

    #[test]
    fn open_starts_empty() {
        let mut editor = SegmentEditor::new();
        assert!(!editor.is_open());
        editor.open();
        assert!(editor.is_open());
        assert!(editor.draft().is_empty());
        assert_eq!(editor.error(), None);
    }

    #[test]
    fn cancel_resets_from_any_idle_state() {
        let mut editor = vip_editor();
        editor.draft_mut().unwrap().set_pending("age");
        assert!(editor.cancel());
        assert!(!editor.is_open());
        assert_eq!(editor.draft().name(), "");
        assert!(editor.draft().selected().is_empty());
        assert_eq!(editor.draft().pending(), None);

        let mut failed = vip_editor();
        failed.begin_submit();
        failed.finish_submit(Err(SubmitError::Status(500)));
        assert!(failed.error().is_some());
        failed.cancel();
        assert_eq!(failed.error(), None);
        assert!(failed.draft().is_empty());
    }

    #[test]
    fn success_closes_and_clears() {
        let mut editor = vip_editor();
        let payload = editor.begin_submit().unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "segment_name": "VIP Users",
                "schema": [{"first_name": "First Name"}, {"city": "City"}]
            })
        );
        assert!(editor.is_saving());
        editor.finish_submit(Ok(()));
        assert!(!editor.is_open());
        assert!(!editor.is_saving());
        assert!(editor.draft().is_empty());
    }

    #[test]
    fn not_found_keeps_draft_and_shows_error() {
        let mut editor = vip_editor();
        let before = editor.draft().clone();
        editor.begin_submit().unwrap();
        editor.finish_submit(Err(SubmitError::NotFound));
        assert!(editor.is_open());
        assert!(!editor.is_saving());
        assert_eq!(editor.draft(), &before);
        assert!(editor.error().unwrap().contains("verify the webhook URL"));
    }

    #[test]
    fn single_flight_while_saving() {
        let mut editor = vip_editor();
        assert!(editor.begin_submit().is_some());
        assert!(editor.begin_submit().is_none());
        assert!(!editor.cancel());
        assert!(editor.draft_mut().is_none());
        assert!(editor.is_open());
    }

    #[test]
    fn retry_clears_previous_error() {
        let mut editor = vip_editor();
        editor.begin_submit();
        editor.finish_submit(Err(SubmitError::Forbidden));
        assert!(editor.error().is_some());
        editor.begin_submit();
        assert_eq!(editor.error(), None);
    }

    #[test]
    fn closed_editor_does_not_submit() {
        let mut editor = SegmentEditor::new();
        assert!(editor.begin_submit().is_none());
        editor.finish_submit(Ok(()));
        assert_eq!(editor.submission(), SubmissionState::Idle);
    }
}
