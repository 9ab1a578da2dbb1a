//! The entity merger.

use fieldpatch_types::PathRef;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{MergeError, MergeResult, PropertyAccess};

const NO_IGNORED: &[&str] = &[];

/// Merges two entities of the same type, copying only the fields named in
/// a dirty-field set.
///
/// Construction fixes the default ignore-list; each call may pass further
/// ignored fields. Ignore entries are compared by exact string equality
/// against the full path string, so an entry of `"text"` does not suppress
/// `"child.text"`.
#[derive(Debug, Clone, Default)]
pub struct EntityMerger {
    default_ignored: Vec<String>,
}

impl EntityMerger {
    /// Creates a merger with no default ignored fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a merger that always skips the given fields.
    #[must_use]
    pub fn with_ignored_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            default_ignored: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Copies the dirty fields from `patch` onto `existing`.
    ///
    /// Shorthand for [`merge_with`](Self::merge_with) without per-call
    /// ignored fields.
    pub fn merge<'a, T, S>(
        &self,
        existing: &'a mut T,
        patch: &T,
        dirty_fields: &[S],
    ) -> MergeResult<&'a mut T>
    where
        T: PropertyAccess,
        S: AsRef<str>,
    {
        self.merge_with(existing, patch, dirty_fields, NO_IGNORED)
    }

    /// Copies the dirty fields from `patch` onto `existing`, skipping any
    /// path found in the default or per-call ignore-list.
    ///
    /// Fields are applied in the order given, duplicates included. The
    /// first path that cannot be read from `patch` or written to `existing`
    /// aborts the call; fields applied before it remain applied. Returns
    /// the mutated `existing`.
    pub fn merge_with<'a, T, S, R>(
        &self,
        existing: &'a mut T,
        patch: &T,
        dirty_fields: &[S],
        ignored_fields: &[R],
    ) -> MergeResult<&'a mut T>
    where
        T: PropertyAccess,
        S: AsRef<str>,
        R: AsRef<str>,
    {
        for field in dirty_fields {
            let field = field.as_ref();
            if self.is_ignored(field, ignored_fields) {
                debug!("skipping ignored field '{field}'");
                continue;
            }
            let path = PathRef::parse(field).map_err(|source| MergeError::InvalidPath {
                path: field.to_string(),
                source,
            })?;
            let value = patch
                .get_path(&path)
                .inspect_err(|err| warn!("merge aborted: {err}"))?;
            existing
                .set_path(&path, value)
                .inspect_err(|err| warn!("merge aborted: {err}"))?;
            debug!("copied field '{field}'");
        }
        Ok(existing)
    }

    /// Merges typed entities through their serde representation.
    ///
    /// Shorthand for [`merge_typed_with`](Self::merge_typed_with) without
    /// per-call ignored fields.
    pub fn merge_typed<'a, T, S>(
        &self,
        existing: &'a mut T,
        patch: &T,
        dirty_fields: &[S],
    ) -> MergeResult<&'a mut T>
    where
        T: Serialize + DeserializeOwned,
        S: AsRef<str>,
    {
        self.merge_typed_with(existing, patch, dirty_fields, NO_IGNORED)
    }

    /// Merges typed entities through their serde representation.
    ///
    /// Both entities are serialized, the dirty fields are applied to the
    /// existing entity's document form, and the result is deserialized back
    /// into `existing`. When a field fails mid-merge, the fields applied
    /// before it are still written back before the error propagates.
    pub fn merge_typed_with<'a, T, S, R>(
        &self,
        existing: &'a mut T,
        patch: &T,
        dirty_fields: &[S],
        ignored_fields: &[R],
    ) -> MergeResult<&'a mut T>
    where
        T: Serialize + DeserializeOwned,
        S: AsRef<str>,
        R: AsRef<str>,
    {
        let mut existing_doc = serde_json::to_value(&*existing)?;
        let patch_doc = serde_json::to_value(patch)?;
        let applied = self
            .merge_with(&mut existing_doc, &patch_doc, dirty_fields, ignored_fields)
            .map(|_| ());
        match serde_json::from_value(existing_doc) {
            Ok(rebuilt) => *existing = rebuilt,
            Err(err) => {
                // A field failure is the primary error when both went wrong.
                applied?;
                return Err(err.into());
            }
        }
        applied?;
        Ok(existing)
    }

    fn is_ignored<R: AsRef<str>>(&self, field: &str, ignored_fields: &[R]) -> bool {
        self.default_ignored.iter().any(|f| f == field)
            || ignored_fields.iter().any(|f| f.as_ref() == field)
    }
}
