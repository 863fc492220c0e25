//! The arena document tree and its mutation operations.

use tracing::trace;

use crate::markup;
use crate::node::{Attribute, Element, NodeData, NodeId, NodeKind};
use crate::qname::QName;
use crate::MarkupError;

/// A document tree held in an arena of nodes.
///
/// Every structural operation (insert, detach, replace, flatten, clone)
/// rewrites index fields; nodes are never moved or freed. A node removed
/// from the tree remains in the arena as an unreferenced slot until the
/// document is dropped.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Document {
    /// Create a document whose root is a fresh element with the given name.
    pub fn with_root(name: QName) -> Self {
        let mut doc = Document {
            nodes: Vec::new(),
            root: NodeId::from_index(0),
        };
        let root = doc.push_node(NodeKind::Element(Element::new(name)));
        doc.root = root;
        doc
    }

    /// Parse a whole document from markup text.
    ///
    /// The markup must contain exactly one top-level element; surrounding
    /// whitespace and comments are permitted and dropped.
    pub fn parse(text: &str) -> Result<Self, MarkupError> {
        markup::parse_document(text)
    }

    /// The root element.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Re-point the root at an existing node. Used by the document parser.
    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }

    /// Number of arena slots, including detached nodes. Test support.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    // Node creation

    /// Create a detached element node.
    pub fn create_element(&mut self, name: QName) -> NodeId {
        self.push_node(NodeKind::Element(Element::new(name)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push_node(NodeKind::Text(text.into()))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push_node(NodeKind::Comment(text.into()))
    }

    pub(crate) fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeData { parent: None, kind });
        id
    }

    // Read access

    /// The payload of a node.
    #[inline]
    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.index()].kind
    }

    /// The element payload, if `node` is an element.
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes[node.index()].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Mutable element payload, if `node` is an element.
    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node.index()].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// `true` if `node` is an element.
    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.index()].kind, NodeKind::Element(_))
    }

    /// The parent of a node, if attached.
    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    /// The children of a node, in document order. Empty for non-elements.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match &self.nodes[node.index()].kind {
            NodeKind::Element(element) => &element.children,
            _ => &[],
        }
    }

    /// The element name, if `node` is an element.
    pub fn element_name(&self, node: NodeId) -> Option<&QName> {
        self.element(node).map(|e| &e.name)
    }

    /// `true` if `node` is an element whose name lives under `prefix`.
    pub fn is_element_in_namespace(&self, node: NodeId, prefix: &str) -> bool {
        self.element(node)
            .is_some_and(|e| e.name.is_in_namespace(prefix))
    }

    // Attributes

    /// The value of a namespace-qualified attribute.
    pub fn attribute(&self, node: NodeId, name: &QName) -> Option<&str> {
        self.element(node).and_then(|e| e.attribute(name))
    }

    /// Set an attribute, replacing any existing value for the same name.
    pub fn set_attribute(&mut self, node: NodeId, name: QName, value: impl Into<String>) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        let value = value.into();
        if let Some(existing) = element.attributes.iter_mut().find(|a| a.name == name) {
            existing.value = value;
        } else {
            element.attributes.push(Attribute { name, value });
        }
    }

    /// Remove an attribute. Returns `true` if it was present.
    pub fn remove_attribute(&mut self, node: NodeId, name: &QName) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        let before = element.attributes.len();
        element.attributes.retain(|a| &a.name != name);
        element.attributes.len() != before
    }

    // Structural mutation

    /// Append `child` to `parent`'s child list, detaching it first if needed.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let Some(element) = self.element_mut(parent) {
            element.children.push(child);
            self.nodes[child.index()].parent = Some(parent);
        }
    }

    /// Insert `new` as a sibling immediately before `anchor`.
    ///
    /// Returns `false` (and does nothing) if `anchor` has no parent.
    pub fn insert_before(&mut self, new: NodeId, anchor: NodeId) -> bool {
        let Some(parent) = self.parent(anchor) else {
            return false;
        };
        self.detach(new);
        let Some(element) = self.element_mut(parent) else {
            return false;
        };
        let Some(position) = element.children.iter().position(|&c| c == anchor) else {
            return false;
        };
        element.children.insert(position, new);
        self.nodes[new.index()].parent = Some(parent);
        true
    }

    /// Detach a node from its parent. The node stays in the arena.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes[node.index()].parent.take() else {
            return;
        };
        if let Some(element) = self.element_mut(parent) {
            element.children.retain(|&c| c != node);
        }
    }

    /// Replace `node` with a sequence of nodes at its position.
    ///
    /// With an empty sequence this is a plain removal. Returns `false` if
    /// `node` has no parent.
    pub fn replace_with(&mut self, node: NodeId, replacements: &[NodeId]) -> bool {
        let Some(parent) = self.parent(node) else {
            return false;
        };
        for &replacement in replacements {
            self.detach(replacement);
        }
        let Some(element) = self.element_mut(parent) else {
            return false;
        };
        let Some(position) = element.children.iter().position(|&c| c == node) else {
            return false;
        };
        element.children.splice(position..=position, replacements.iter().copied());
        self.nodes[node.index()].parent = None;
        for &replacement in replacements {
            self.nodes[replacement.index()].parent = Some(parent);
        }
        trace!(replaced = node.raw(), count = replacements.len(), "replaced node");
        true
    }

    /// Replace `node` with its own children (flatten).
    ///
    /// Returns the children, which are now siblings at the node's old
    /// position. The root cannot be flattened (a document has exactly one
    /// root); flattening it is a no-op returning an empty list.
    pub fn flatten(&mut self, node: NodeId) -> Vec<NodeId> {
        if self.parent(node).is_none() {
            return Vec::new();
        }
        let children: Vec<NodeId> = self.children(node).to_vec();
        if let Some(element) = self.element_mut(node) {
            element.children.clear();
        }
        for &child in &children {
            self.nodes[child.index()].parent = None;
        }
        self.replace_with(node, &children);
        children
    }

    /// Detach all children of a node.
    pub fn clear_children(&mut self, node: NodeId) {
        let children: Vec<NodeId> = self.children(node).to_vec();
        for child in children {
            self.nodes[child.index()].parent = None;
        }
        if let Some(element) = self.element_mut(node) {
            element.children.clear();
        }
    }

    /// Replace the children of `node` with the given sequence.
    pub fn set_children(&mut self, node: NodeId, children: &[NodeId]) {
        self.clear_children(node);
        for &child in children {
            self.append_child(node, child);
        }
    }

    /// Deep-copy a subtree, returning the detached copy's root.
    ///
    /// Iterative: the work stack holds (source, copy) pairs, so the depth
    /// of the subtree never bounds the native call stack.
    pub fn clone_subtree(&mut self, node: NodeId) -> NodeId {
        let copy_root = self.shallow_copy(node);
        let mut work: Vec<(NodeId, NodeId)> = vec![(node, copy_root)];
        while let Some((source, copy)) = work.pop() {
            let source_children: Vec<NodeId> = self.children(source).to_vec();
            for source_child in source_children {
                let copy_child = self.shallow_copy(source_child);
                self.append_child(copy, copy_child);
                work.push((source_child, copy_child));
            }
        }
        copy_root
    }

    fn shallow_copy(&mut self, node: NodeId) -> NodeId {
        let kind = match &self.nodes[node.index()].kind {
            NodeKind::Element(element) => NodeKind::Element(Element {
                name: element.name.clone(),
                attributes: element.attributes.clone(),
                children: Vec::new(),
            }),
            NodeKind::Text(text) => NodeKind::Text(text.clone()),
            NodeKind::Comment(text) => NodeKind::Comment(text.clone()),
        };
        self.push_node(kind)
    }

    // Markup

    /// Parse a markup fragment into this document's arena.
    ///
    /// Returns the top-level nodes of the fragment, detached.
    pub fn parse_fragment(&mut self, text: &str) -> Result<Vec<NodeId>, MarkupError> {
        markup::parse_fragment(self, text)
    }

    /// Serialize a single subtree to markup text.
    pub fn serialize_node(&self, node: NodeId) -> String {
        markup::serialize(self, node)
    }

    /// Serialize the whole document to markup text.
    pub fn serialize(&self) -> String {
        markup::serialize(self, self.root)
    }
}

#[cfg(test)]
mod tests;
