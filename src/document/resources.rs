use std::collections::HashMap;

use crate::document::kind::ElementKind;
use crate::document::tree::{Document, NodeId};
use crate::foundation::error::{ResolveError, ResolveResult};

/// Resource table: `id` attribute of every shared resource to its node.
///
/// Elements reference it through foreign-key attributes such as `format` and `ref`.
#[derive(Clone, Debug, Default)]
pub struct Resources {
    by_id: HashMap<String, NodeId>,
}

impl Resources {
    /// Index all children of every `resources` element in the document.
    pub fn from_document(doc: &Document) -> ResolveResult<Self> {
        let mut by_id = HashMap::new();
        for table in doc.nodes_of_kind(ElementKind::Resources) {
            for &res in doc.children(table) {
                let Some(id) = doc.attr(res, "id") else {
                    continue;
                };
                if by_id.insert(id.to_owned(), res).is_some() {
                    return Err(ResolveError::validation(format!(
                        "duplicate resource id '{id}'"
                    )));
                }
            }
        }
        Ok(Self { by_id })
    }

    /// Look up a resource by id.
    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    /// Look up a resource by id and require a specific kind.
    pub fn get_of_kind(&self, doc: &Document, id: &str, kind: ElementKind) -> Option<NodeId> {
        self.get(id).filter(|&n| doc.kind(n) == kind)
    }

    /// Number of indexed resources.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Return `true` when no resources were indexed.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
