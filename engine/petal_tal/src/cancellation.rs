//! Cooperative cancellation for long renders.

use std::cell::Cell;
use std::rc::Rc;

/// A shared flag checked between worklist iterations.
///
/// Cancelling never leaves the document in a state requiring repair:
/// partially-applied directive results are valid, just incomplete.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Rc<Cell<bool>>,
}

impl CancellationToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.set(true);
    }

    /// `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.get()
    }
}
