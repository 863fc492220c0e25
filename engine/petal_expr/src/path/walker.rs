//! Cursor over a parsed path.

use super::{Alternate, Path, Segment};

/// A cursor over a parsed [`Path`]: tracks the current alternate and the
/// current segment within it. Used only during evaluation.
#[derive(Debug)]
pub struct PathWalker<'a> {
    path: &'a Path,
    alternate: usize,
    segment: usize,
}

impl<'a> PathWalker<'a> {
    /// Start at the first segment of the first alternate.
    pub fn new(path: &'a Path) -> Self {
        PathWalker {
            path,
            alternate: 0,
            segment: 0,
        }
    }

    /// The alternate currently pointed to.
    pub fn current_alternate(&self) -> Option<&'a Alternate> {
        self.path.alternates().get(self.alternate)
    }

    /// The segment currently pointed to.
    pub fn current_segment(&self) -> Option<&'a Segment> {
        self.current_alternate()
            .and_then(|a| a.segments().get(self.segment))
    }

    /// Move to the next segment of the current alternate.
    ///
    /// Returns `false` when the current alternate is exhausted.
    pub fn advance_segment(&mut self) -> bool {
        let Some(alternate) = self.current_alternate() else {
            return false;
        };
        if self.segment + 1 < alternate.segments().len() {
            self.segment += 1;
            true
        } else {
            false
        }
    }

    /// Move to the start of the next alternate.
    ///
    /// Returns `false` when there is no further alternate.
    pub fn advance_alternate(&mut self) -> bool {
        if self.alternate + 1 < self.path.alternates().len() {
            self.alternate += 1;
            self.segment = 0;
            true
        } else {
            self.alternate = self.path.alternates().len();
            self.segment = 0;
            false
        }
    }

    /// Rewind to the first segment of the first alternate.
    pub fn reset(&mut self) {
        self.alternate = 0;
        self.segment = 0;
    }
}
