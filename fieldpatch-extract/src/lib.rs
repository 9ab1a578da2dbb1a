//! Dirty-field extraction for PATCH payloads.
//!
//! A partial update carries only the fields the caller chose to send. This
//! crate recovers that set as canonical path strings:
//! - [`tree_dirty_fields`] — walk a parsed JSON document
//! - [`form_dirty_fields`] — rewrite flat form-encoded keys
//! - [`DocumentSlot`] / [`parse_patch`] — capture the parsed tree at
//!   deserialization time so the typed patch entity and the dirty-field
//!   set come from a single parse
//!
//! Extraction never invents fields: a path is emitted only for keys that
//! are present in the payload. Explicit `null` values count as present.

mod form;
mod payload;
mod tree;

pub use form::form_dirty_fields;
pub use payload::{DocumentSlot, ParsedPatch, parse_patch};
pub use tree::tree_dirty_fields;
