use crate::segment::SegmentEditor;

/// Shared UI state handed to every component.
#[derive(Default)]
pub struct State {
    pub input_mode: InputMode,
    pub editor: SegmentEditor,
    /// One-line status shown on the launcher (e.g. after a successful save).
    pub notice: Option<String>,
    pub endpoint: String,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// A text field has focus; plain keys are typed, not interpreted.
    Insert,
}

impl State {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}
