//! Petal DOM - Arena-backed document tree for the petal template engine.
//!
//! The tree is an arena of nodes addressed by stable [`NodeId`] indices.
//! Clone, replace, and flatten operations are index rewrites rather than
//! pointer surgery; parent back-references are plain index fields. Detached
//! nodes simply become unreferenced slots in the arena.
//!
//! Subtree clone and serialization are iterative (explicit stacks), so no
//! operation here bounds its recursion depth by document depth.

mod document;
mod markup;
mod node;
mod qname;

pub use document::Document;
pub use markup::MarkupError;
pub use node::{Attribute, Element, NodeId, NodeKind};
pub use qname::QName;
