use crate::document::breadcrumbs::Breadcrumbs;
use crate::document::kind::ElementKind;
use crate::document::snapshot::Snapshot;
use crate::document::tree::{NodeId, NodeRef};

/// One element produced by an extraction.
///
/// Carries the chain it was reached through and the snapshot it belongs to, so every derived
/// value (see the context accessors) can be computed later without walking the document again.
#[derive(Clone, Debug)]
pub struct ExtractedElement {
    snapshot: Snapshot,
    node: NodeId,
    crumbs: Breadcrumbs,
}

impl ExtractedElement {
    /// Wrap `node` reached through `crumbs`.
    pub fn new(snapshot: Snapshot, node: NodeId, crumbs: Breadcrumbs) -> Self {
        Self {
            snapshot,
            node,
            crumbs,
        }
    }

    /// Handle for `node` using its document ancestry as the chain.
    pub fn from_document(snapshot: &Snapshot, node: NodeId) -> Self {
        let crumbs = Breadcrumbs::from_document(snapshot.doc(), node);
        Self::new(snapshot.clone(), node, crumbs)
    }

    /// Shared document and resources.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// The element's node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Ancestor chain at the time of visitation, nearest first.
    pub fn breadcrumbs(&self) -> &Breadcrumbs {
        &self.crumbs
    }

    /// Borrowed view of the node.
    pub fn node_ref(&self) -> NodeRef<'_> {
        self.snapshot.doc().node(self.node)
    }

    /// Element kind.
    pub fn kind(&self) -> ElementKind {
        self.snapshot.doc().kind(self.node)
    }

    /// Raw tag.
    pub fn tag(&self) -> &str {
        self.snapshot.doc().tag(self.node)
    }

    /// Attribute lookup.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.snapshot.doc().attr(self.node, name)
    }

    /// Whether the element is switched off in the edit.
    pub fn is_disabled(&self) -> bool {
        self.attr("enabled") == Some("0")
    }

    /// Number of nested timelines on the chain, the element included.
    pub fn container_depth(&self) -> usize {
        let doc = self.snapshot.doc();
        std::iter::once(self.node)
            .chain(self.crumbs.iter())
            .filter(|&n| doc.kind(n).is_timeline())
            .count()
    }
}
