//! Segment form state: the draft being edited, its wire payload and the
//! editor that owns both while the modal is open.
pub mod draft;
pub mod editor;
pub mod payload;

pub use draft::SegmentDraft;
pub use editor::{SegmentEditor, SubmissionState};
pub use payload::{SchemaEntry, SegmentPayload};
