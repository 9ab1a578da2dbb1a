//! Canonical field-path notation for fieldpatch.
//!
//! Both pipelines — dirty-field extraction and selective merge — speak one
//! path grammar, defined here:
//! - [`PathRef`] — a parsed field path (`child.array[2]`, `meta(color)`)
//! - [`PathSegment`] — one step of a path (field, index, or map key)
//! - [`PathParseError`] — what can go wrong reading the string form
//!
//! The string form is the interchange format: extraction emits path strings,
//! merging parses them back. `PathRef` round-trips losslessly through
//! [`PathRef::parse`] and `Display`.

mod path;

pub use path::{PathParseError, PathRef, PathSegment};
