use std::collections::BTreeMap;

use crate::document::breadcrumbs::Breadcrumbs;
use crate::document::kind::ElementKind;
use crate::document::snapshot::Snapshot;
use crate::document::tree::NodeId;

fn merge_from(snapshot: &Snapshot, holder: NodeId, out: &mut BTreeMap<String, String>) {
    let doc = snapshot.doc();
    for md in doc
        .children_of_kind(holder, ElementKind::Metadata)
        .flat_map(|m| doc.children_of_kind(m, ElementKind::MetadataItem))
    {
        if let (Some(k), Some(v)) = (doc.attr(md, "key"), doc.attr(md, "value")) {
            out.insert(k.to_owned(), v.to_owned());
        }
    }
}

fn source_asset(snapshot: &Snapshot, node: NodeId, crumbs: &Breadcrumbs) -> Option<NodeId> {
    let doc = snapshot.doc();
    std::iter::once(node)
        .chain(crumbs.iter())
        .filter_map(|n| doc.attr(n, "ref"))
        .find_map(|id| snapshot.resources().get_of_kind(doc, id, ElementKind::Asset))
}

/// `metadata/md` key/value pairs applying to `node`.
///
/// The nearest referenced asset provides the base values; ancestors override them from the
/// outermost down, and the element's own entries win.
pub fn metadata(
    snapshot: &Snapshot,
    node: NodeId,
    crumbs: &Breadcrumbs,
) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    if let Some(asset) = source_asset(snapshot, node, crumbs) {
        merge_from(snapshot, asset, &mut out);
    }
    for anc in crumbs.to_vec_outermost_first() {
        merge_from(snapshot, anc, &mut out);
    }
    merge_from(snapshot, node, &mut out);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/context/metadata.rs"]
mod tests;
