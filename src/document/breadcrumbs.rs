use std::sync::Arc;

use crate::document::tree::{Document, NodeId};

#[derive(Debug)]
struct Crumb {
    node: NodeId,
    rest: Option<Arc<Crumb>>,
}

/// Ancestor chain of a node as it was reached during traversal, nearest parent first.
///
/// This is a persistent list: [`Breadcrumbs::push`] returns an extended chain and leaves the
/// original untouched, so sibling branches of a walk share their common prefix. The chain is
/// not derived from document parentage; multicam and compound-clip indirection insert nodes that
/// have no direct parent/child edge in the document.
#[derive(Clone, Debug, Default)]
pub struct Breadcrumbs {
    head: Option<Arc<Crumb>>,
    len: usize,
}

impl Breadcrumbs {
    /// Empty chain (the node is a traversal root).
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain built from true document parentage of `node`.
    pub fn from_document(doc: &Document, node: NodeId) -> Self {
        let ancestors: Vec<NodeId> = doc.ancestors(node).collect();
        Self::from_outermost_first(ancestors.into_iter().rev())
    }

    /// Chain from nodes given outermost ancestor first.
    pub fn from_outermost_first(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        nodes
            .into_iter()
            .fold(Self::new(), |crumbs, n| crumbs.push(n))
    }

    /// Extend the chain with a new nearest ancestor.
    #[must_use]
    pub fn push(&self, node: NodeId) -> Self {
        Self {
            head: Some(Arc::new(Crumb {
                node,
                rest: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Nearest ancestor.
    pub fn nearest(&self) -> Option<NodeId> {
        self.head.as_ref().map(|c| c.node)
    }

    /// Chain without its nearest ancestor.
    pub fn parent_chain(&self) -> Self {
        match &self.head {
            Some(c) => Self {
                head: c.rest.clone(),
                len: self.len - 1,
            },
            None => Self::new(),
        }
    }

    /// Furthest ancestor.
    pub fn outermost(&self) -> Option<NodeId> {
        self.iter().last()
    }

    /// Number of ancestors.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` for a traversal root.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ancestors nearest first.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.head.as_deref(), |c| c.rest.as_deref()).map(|c| c.node)
    }

    /// Ancestors outermost first.
    pub fn to_vec_outermost_first(&self) -> Vec<NodeId> {
        let mut v: Vec<NodeId> = self.iter().collect();
        v.reverse();
        v
    }
}

impl PartialEq for Breadcrumbs {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for Breadcrumbs {}
