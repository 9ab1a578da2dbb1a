//! Selective field merge for PATCH updates.
//!
//! Applies exactly the fields named in a dirty-field set from a patch
//! entity onto an existing entity, leaving every other field untouched:
//! - [`EntityMerger`] — the merge operation plus its ignore-list
//!   configuration
//! - [`PropertyAccess`] — path-addressed get/set, implemented for
//!   [`serde_json::Value`]; typed entities go through their serde
//!   representation
//! - [`MergeError`] / [`MergeResult`] — how failures are reported
//!
//! Merging is in-place and not transactional: the first path that fails to
//! resolve aborts the call, and fields applied before it stay applied.

mod access;
mod error;
mod merger;

pub use access::PropertyAccess;
pub use error::{MergeError, MergeResult};
pub use merger::EntityMerger;
