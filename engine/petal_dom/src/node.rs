//! Node storage for the arena document tree.

use smallvec::SmallVec;

use crate::qname::QName;

/// Stable index of a node within a [`crate::Document`] arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Create from a raw arena index.
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(u32::try_from(index).is_ok());
        NodeId(index as u32)
    }

    /// The raw arena index.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// A single attribute on an element.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Attribute {
    /// Qualified attribute name.
    pub name: QName,
    /// Raw attribute value.
    pub value: String,
}

/// Element payload: name, attributes, and ordered children.
#[derive(Clone, Debug)]
pub struct Element {
    /// Qualified element name.
    pub name: QName,
    /// Attributes in document order.
    pub attributes: SmallVec<[Attribute; 4]>,
    /// Child nodes in document order.
    pub(crate) children: Vec<NodeId>,
}

impl Element {
    pub(crate) fn new(name: QName) -> Self {
        Element {
            name,
            attributes: SmallVec::new(),
            children: Vec::new(),
        }
    }

    /// The value of the attribute with the given qualified name.
    pub fn attribute(&self, name: &QName) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| &a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// What a node is.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// An element with a name, attributes, and children.
    Element(Element),
    /// A run of character data.
    Text(String),
    /// A comment; carried through to output verbatim.
    Comment(String),
}

/// One arena slot: the node payload plus its parent back-reference.
#[derive(Clone, Debug)]
pub(crate) struct NodeData {
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
}
