//! JSON body posted to the webhook.
//!
//! ```json
//! {"segment_name": "VIP Users", "schema": [{"first_name": "First Name"}, {"city": "City"}]}
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::catalog::SchemaField;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SegmentPayload {
    pub segment_name: String,
    pub schema: Vec<SchemaEntry>,
}

impl SegmentPayload {
    pub fn new(
        segment_name: impl Into<String>,
        fields: impl IntoIterator<Item = &'static SchemaField>,
    ) -> Self {
        Self {
            segment_name: segment_name.into(),
            schema: fields.into_iter().map(SchemaEntry).collect(),
        }
    }
}

/// One row on the wire: a single-key object `{<key>: <label>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaEntry(pub &'static SchemaField);

impl Serialize for SchemaEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0.key, self.0.label)?;
        map.end()
    }
}
