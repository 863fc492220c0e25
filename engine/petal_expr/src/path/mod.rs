//! The path expression grammar.
//!
//! A path is an ordered set of *alternates* separated by `|`; each
//! alternate is an ordered list of *segments* separated by `/`. A segment
//! is a literal name, or an interpolated reference written `?name` whose
//! runtime name is resolved from a variable at evaluation time.

mod walker;

use smallvec::SmallVec;
use thiserror::Error;

pub use walker::PathWalker;

/// A parsed path expression. Immutable after parsing.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Path {
    alternates: SmallVec<[Alternate; 2]>,
}

/// One `|`-separated alternate within a path.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Alternate {
    segments: SmallVec<[Segment; 4]>,
}

/// One `/`-separated segment within an alternate.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Segment {
    name: String,
    interpolated: bool,
}

/// Path text that does not conform to the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct PathSyntaxError {
    /// What was wrong with the text.
    pub detail: String,
}

impl PathSyntaxError {
    fn new(detail: impl Into<String>) -> Self {
        PathSyntaxError {
            detail: detail.into(),
        }
    }
}

impl Path {
    /// Parse path expression content.
    pub fn parse(content: &str) -> Result<Self, PathSyntaxError> {
        let mut alternates = SmallVec::new();
        for raw in content.split('|') {
            alternates.push(Alternate::parse(raw.trim())?);
        }
        Ok(Path { alternates })
    }

    /// The alternates, in the order they are tried.
    pub fn alternates(&self) -> &[Alternate] {
        &self.alternates
    }
}

impl Alternate {
    fn parse(raw: &str) -> Result<Self, PathSyntaxError> {
        if raw.is_empty() {
            return Err(PathSyntaxError::new("an alternate expression is empty"));
        }
        let mut segments = SmallVec::new();
        for (index, part) in raw.split('/').enumerate() {
            segments.push(Segment::parse(part, index == 0)?);
        }
        Ok(Alternate { segments })
    }

    /// The segments of this alternate, root first.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl Segment {
    fn parse(part: &str, is_root: bool) -> Result<Self, PathSyntaxError> {
        if part.is_empty() {
            return Err(PathSyntaxError::new("a path segment is empty"));
        }
        let (name, interpolated) = match part.strip_prefix('?') {
            Some(rest) => (rest, true),
            None => (part, false),
        };
        if interpolated || is_root {
            // A variable name: stricter than a general segment.
            if !is_variable_name(name) {
                return Err(PathSyntaxError::new(format!(
                    "'{part}' is not a valid variable name"
                )));
            }
        } else if !is_segment_name(name) {
            return Err(PathSyntaxError::new(format!(
                "'{part}' is not a valid path segment"
            )));
        }
        Ok(Segment {
            name: name.to_string(),
            interpolated,
        })
    }

    /// The segment name (without any `?` marker).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` if the runtime name is resolved from a variable.
    pub fn is_interpolated(&self) -> bool {
        self.interpolated
    }
}

/// `[A-Za-z][A-Za-z0-9_]*`
fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `[A-Za-z0-9 _.,~-]+`
fn is_segment_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '.' | ',' | '~' | '-'))
}
