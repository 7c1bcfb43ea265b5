use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::kind::ElementKind;
use crate::document::tree::{Attrs, Document, NodeData, NodeId};
use crate::foundation::error::{ResolveError, ResolveResult};

/// Boundary form of an element: the JSON shape an upstream markup parser hands over.
///
/// ```json
/// { "tag": "sequence", "attrs": { "tcStart": "3600s" }, "children": [ ... ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementDef {
    /// Element tag, e.g. `"asset-clip"`.
    pub tag: String,
    /// Attribute strings by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    /// Ordered child elements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementDef>,
}

impl Document {
    /// Normalize a boundary tree into the arena. Nodes are allocated in DFS preorder.
    pub fn from_def(def: &ElementDef) -> ResolveResult<Self> {
        let mut nodes = Vec::new();
        let root = push_node(def, None, &mut nodes)?;
        Ok(Self { nodes, root })
    }

    /// Decode and normalize a JSON element tree.
    #[tracing::instrument(skip(s), fields(len = s.len()))]
    pub fn from_json_str(s: &str) -> ResolveResult<Self> {
        let def: ElementDef = serde_json::from_str(s)?;
        let doc = Self::from_def(&def)?;
        tracing::debug!(nodes = doc.len(), "document indexed");
        Ok(doc)
    }

    /// Convert a subtree back to its boundary form.
    pub fn to_def(&self, id: NodeId) -> ElementDef {
        ElementDef {
            tag: self.tag(id).to_owned(),
            attrs: self
                .attrs(id)
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
            children: self.children(id).iter().map(|&c| self.to_def(c)).collect(),
        }
    }
}

fn push_node(
    def: &ElementDef,
    parent: Option<NodeId>,
    nodes: &mut Vec<NodeData>,
) -> ResolveResult<NodeId> {
    if def.tag.trim().is_empty() {
        return Err(ResolveError::validation("element tag must be non-empty"));
    }
    let id = NodeId(
        u32::try_from(nodes.len()).map_err(|_| ResolveError::validation("too many nodes"))?,
    );
    nodes.push(NodeData {
        kind: ElementKind::from_tag(&def.tag),
        tag: def.tag.clone(),
        attrs: def
            .attrs
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<Attrs>(),
        children: Vec::with_capacity(def.children.len()),
        parent,
    });

    for child in &def.children {
        let c = push_node(child, Some(id), nodes)?;
        nodes[id.index()].children.push(c);
    }
    Ok(id)
}
