use smallvec::SmallVec;

use crate::document::kind::ElementKind;

/// Index of a node inside a [`Document`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena position (preorder).
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

pub(crate) type Attrs = SmallVec<[(String, String); 6]>;

#[derive(Clone, Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: ElementKind,
    pub(crate) tag: String,
    pub(crate) attrs: Attrs,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

/// Read-only, already-parsed FCPXML tree stored as a preorder arena.
///
/// The engine only reads from it; every traversal result refers back into it by [`NodeId`].
#[derive(Clone, Debug)]
pub struct Document {
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) root: NodeId,
}

impl Document {
    /// Root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` when the arena is empty (never the case for a built document).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrowing view of a node.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { doc: self, id }
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    /// Element kind of `id`.
    pub fn kind(&self, id: NodeId) -> ElementKind {
        self.data(id).kind
    }

    /// Raw tag of `id`.
    pub fn tag(&self, id: NodeId) -> &str {
        &self.data(id).tag
    }

    /// Attribute string by name.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.data(id)
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes, sorted by name.
    pub fn attrs(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.data(id)
            .attrs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Ordered direct children.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.data(id).children
    }

    /// Direct children of one kind.
    pub fn children_of_kind(
        &self,
        id: NodeId,
        kind: ElementKind,
    ) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&c| self.kind(c) == kind)
    }

    /// First direct child of one kind.
    pub fn find_child(&self, id: NodeId, kind: ElementKind) -> Option<NodeId> {
        self.children_of_kind(id, kind).next()
    }

    /// Document parent.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    /// Document ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// All nodes of one kind in document order.
    pub fn nodes_of_kind(&self, kind: ElementKind) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.kind == kind)
            .map(|(i, _)| NodeId(i as u32))
    }
}

/// A node together with the document it lives in.
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// Arena id.
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Element kind.
    pub fn kind(self) -> ElementKind {
        self.doc.kind(self.id)
    }

    /// Raw tag.
    pub fn tag(self) -> &'a str {
        self.doc.tag(self.id)
    }

    /// Attribute string by name.
    pub fn attr(self, name: &str) -> Option<&'a str> {
        self.doc.attr(self.id, name)
    }

    /// `name` attribute.
    pub fn name(self) -> Option<&'a str> {
        self.attr("name")
    }

    /// Ordered direct children.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> {
        let doc = self.doc;
        doc.children(self.id)
            .iter()
            .map(move |&id| NodeRef { doc, id })
    }

    /// Document parent.
    pub fn parent(self) -> Option<NodeRef<'a>> {
        self.doc.parent(self.id).map(|id| NodeRef { doc: self.doc, id })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/tree.rs"]
mod tests;
