//! Parse-time capture of the patch document.
//!
//! A PATCH request body is consumed two ways: once to materialize the typed
//! patch entity and once to learn which fields the caller actually sent.
//! Parsing the body a single time and handing the tree from the
//! deserialization site to the extraction site keeps the two views
//! consistent. The slot is an owned value scoped to one unit of work (one
//! request); concurrent requests each hold their own and cannot observe
//! each other's documents.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::tree_dirty_fields;

/// Holds the most recently parsed patch document for one unit of work.
#[derive(Debug, Default)]
pub struct DocumentSlot {
    document: Option<Value>,
}

impl DocumentSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `json` once, keeps the tree in the slot (replacing any
    /// previous document), and deserializes the patch entity from that same
    /// tree.
    pub fn capture<T: DeserializeOwned>(&mut self, json: &str) -> Result<T, serde_json::Error> {
        let document: Value = serde_json::from_str(json)?;
        let entity = T::deserialize(&document)?;
        debug!("captured patch document ({} bytes)", json.len());
        self.document = Some(document);
        Ok(entity)
    }

    /// The held document, if any.
    #[must_use]
    pub fn get(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// Stores `document`, replacing any previous one.
    pub fn set(&mut self, document: Value) {
        self.document = Some(document);
    }

    /// Removes and returns the held document.
    pub fn take(&mut self) -> Option<Value> {
        self.document.take()
    }

    /// Empties the slot.
    pub fn clear(&mut self) {
        self.document = None;
    }

    /// Runs dirty-field extraction over the held document.
    ///
    /// An empty slot yields no fields.
    #[must_use]
    pub fn dirty_fields(&self) -> Vec<String> {
        self.document.as_ref().map(tree_dirty_fields).unwrap_or_default()
    }
}

/// A patch payload read once and viewed both ways.
#[derive(Debug)]
pub struct ParsedPatch<T> {
    /// The typed patch entity.
    pub entity: T,
    /// Paths of every field the payload explicitly supplied.
    pub dirty_fields: Vec<String>,
    /// The parsed document both views were derived from.
    pub document: Value,
}

/// Parses a JSON patch body once, yielding the typed patch entity together
/// with its dirty-field set.
pub fn parse_patch<T: DeserializeOwned>(json: &str) -> Result<ParsedPatch<T>, serde_json::Error> {
    let document: Value = serde_json::from_str(json)?;
    let entity = T::deserialize(&document)?;
    let dirty_fields = tree_dirty_fields(&document);
    debug!("parsed patch payload with {} dirty fields", dirty_fields.len());
    Ok(ParsedPatch {
        entity,
        dirty_fields,
        document,
    })
}
