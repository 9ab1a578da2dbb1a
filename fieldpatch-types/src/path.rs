//! Field-path parsing and rendering.
//!
//! A path addresses one leaf inside an entity graph as a sequence of
//! segments: `.field` for object fields (the leading dot is dropped at the
//! start of a path), `[N]` for an element of the collection named by the
//! preceding segment, `(key)` for an entry of the map named by the
//! preceding segment. Field names and map keys match
//! `[a-zA-Z][a-zA-Z0-9_]*`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named object field (`text`, the `child` in `child.text`).
    Field(String),
    /// An element of the collection named by the preceding segment (`[0]`).
    Index(usize),
    /// An entry of the map named by the preceding segment (`(color)`).
    Key(String),
}

/// A parsed field path.
///
/// The canonical string form round-trips: `PathRef::parse("child.array[2]")`
/// renders back as `child.array[2]` through `Display`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathRef {
    segments: Vec<PathSegment>,
}

/// Errors produced when parsing the string form of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathParseError {
    /// The input was empty.
    #[error("path is empty")]
    Empty,

    /// A field name was missing or did not start with a letter.
    #[error("invalid field name at offset {0}")]
    InvalidField(usize),

    /// A `[N]` group held something other than a valid index.
    #[error("invalid collection index at offset {0}")]
    InvalidIndex(usize),

    /// A `(key)` group held something other than an identifier.
    #[error("invalid map key at offset {0}")]
    InvalidKey(usize),

    /// A character that fits no segment kind.
    #[error("unexpected character '{1}' at offset {0}")]
    UnexpectedChar(usize, char),
}

impl PathRef {
    /// Creates an empty path, ready to be built up with [`push`](Self::push).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the canonical string form.
    ///
    /// A path opens with a field name; further segments attach with `.name`,
    /// `[N]`, or `(key)`. Index and key groups bind to the preceding field
    /// without a separating dot.
    pub fn parse(input: &str) -> Result<Self, PathParseError> {
        let bytes = input.as_bytes();
        if bytes.is_empty() {
            return Err(PathParseError::Empty);
        }
        let mut segments = Vec::new();
        let mut pos = 0;
        loop {
            let end = ident_end(bytes, pos).ok_or(PathParseError::InvalidField(pos))?;
            segments.push(PathSegment::Field(input[pos..end].to_string()));
            pos = end;

            // Index and key groups attach directly, in any number.
            while pos < bytes.len() {
                match bytes[pos] {
                    b'[' => {
                        let start = pos + 1;
                        let mut digits = start;
                        while digits < bytes.len() && bytes[digits].is_ascii_digit() {
                            digits += 1;
                        }
                        if digits == start || bytes.get(digits) != Some(&b']') {
                            return Err(PathParseError::InvalidIndex(start));
                        }
                        let index = input[start..digits]
                            .parse::<usize>()
                            .map_err(|_| PathParseError::InvalidIndex(start))?;
                        segments.push(PathSegment::Index(index));
                        pos = digits + 1;
                    }
                    b'(' => {
                        let start = pos + 1;
                        let end = ident_end(bytes, start).ok_or(PathParseError::InvalidKey(start))?;
                        if bytes.get(end) != Some(&b')') {
                            return Err(PathParseError::InvalidKey(start));
                        }
                        segments.push(PathSegment::Key(input[start..end].to_string()));
                        pos = end + 1;
                    }
                    _ => break,
                }
            }

            if pos == bytes.len() {
                return Ok(Self { segments });
            }
            if bytes[pos] == b'.' {
                pos += 1;
                continue;
            }
            return Err(PathParseError::UnexpectedChar(pos, char_at(input, pos)));
        }
    }

    /// The segments of this path, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True when the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Removes and returns the last segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// The final segment together with everything leading up to it.
    #[must_use]
    pub fn split_last(&self) -> Option<(&PathSegment, &[PathSegment])> {
        self.segments.split_last()
    }
}

impl fmt::Display for PathRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) => write!(f, "({key})")?,
            }
        }
        Ok(())
    }
}

impl FromStr for PathRef {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<PathSegment>> for PathRef {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

/// End offset of the identifier starting at `start`, or `None` when the
/// first byte is not a letter.
fn ident_end(bytes: &[u8], start: usize) -> Option<usize> {
    match bytes.get(start) {
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return None,
    }
    let mut end = start + 1;
    while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
        end += 1;
    }
    Some(end)
}

fn char_at(input: &str, offset: usize) -> char {
    input[offset..].chars().next().unwrap_or('\u{FFFD}')
}
