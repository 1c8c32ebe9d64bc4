//! Editable segment draft.
//!
//! Holds the segment name, the ordered rows of selected schema keys and the
//! pending-addition slot. Every key stored here is a catalog key; the public
//! setters refuse anything else.

use crate::catalog::{self, SchemaField};

use super::payload::SegmentPayload;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SegmentDraft {
    name: String,
    selected: Vec<&'static str>,
    pending: Option<&'static str>,
}

impl SegmentDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free text, no validation.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn selected(&self) -> &[&'static str] {
        &self.selected
    }

    pub fn pending(&self) -> Option<&'static str> {
        self.pending
    }

    /// Stage `key` for addition. Only keys the "add" control offers are
    /// accepted; anything else returns false and leaves the slot alone.
    pub fn set_pending(&mut self, key: &str) -> bool {
        match self.available_options().into_iter().find(|f| f.key == key) {
            Some(field) => {
                self.pending = Some(field.key);
                true
            }
            None => false,
        }
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    /// Append the staged key and clear the slot. No-op on an empty slot.
    pub fn add_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(key) => {
                self.selected.push(key);
                true
            }
            None => false,
        }
    }

    /// Remove the row at `index`, keeping the others in order.
    pub fn remove(&mut self, index: usize) -> Option<&'static str> {
        (index < self.selected.len()).then(|| self.selected.remove(index))
    }

    /// Replace the key of row `index`. Duplicates are allowed here.
    pub fn edit(&mut self, index: usize, key: &str) -> bool {
        let Some(field) = catalog::find(key) else {
            return false;
        };
        match self.selected.get_mut(index) {
            Some(slot) => {
                *slot = field.key;
                true
            }
            None => false,
        }
    }

    /// Catalog entries still offered by the "add" control.
    pub fn available_options(&self) -> Vec<&'static SchemaField> {
        catalog::available_options(&self.selected)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.selected.is_empty() && self.pending.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Wire representation, rows in display order.
    pub fn payload(&self) -> SegmentPayload {
        SegmentPayload::new(
            self.name.clone(),
            self.selected.iter().filter_map(|key| catalog::find(key)),
        )
    }
}
