use strum::Display;

use crate::submit::SubmitError;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    Update,
    /// Launcher control: show the segment modal.
    OpenEditor,
    /// Cancel / close control of the modal.
    CloseEditor,
    /// Submit control; the app spawns the HTTP request for the draft.
    Submit,
    /// Result of a spawned request, routed back into the editor.
    SubmissionFinished(Result<(), SubmitError>),
}
