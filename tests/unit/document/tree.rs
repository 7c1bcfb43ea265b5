use super::*;
use crate::document::breadcrumbs::Breadcrumbs;
use crate::document::dsl::element;
use crate::document::resources::Resources;

fn sample() -> Document {
    element("fcpxml")
        .child(
            element("resources")
                .child(element("format").attr("id", "r1").attr("frameDuration", "1/25s"))
                .child(element("asset").attr("id", "r2")),
        )
        .child(
            element("library").child(
                element("event").attr("name", "Day 1").child(
                    element("project").attr("name", "Cut").child(
                        element("sequence").attr("format", "r1").child(
                            element("spine")
                                .child(element("asset-clip").attr("ref", "r2"))
                                .child(element("filter-video")),
                        ),
                    ),
                ),
            ),
        )
        .into_document()
        .unwrap()
}

#[test]
fn arena_is_preorder_with_parent_links() {
    let doc = sample();
    assert_eq!(doc.kind(doc.root()), ElementKind::Root);
    assert_eq!(doc.len(), 11);

    let clip = doc.nodes_of_kind(ElementKind::AssetClip).next().unwrap();
    let chain: Vec<ElementKind> = doc.ancestors(clip).map(|n| doc.kind(n)).collect();
    assert_eq!(
        chain,
        vec![
            ElementKind::Spine,
            ElementKind::Sequence,
            ElementKind::Project,
            ElementKind::Event,
            ElementKind::Library,
            ElementKind::Root,
        ]
    );
    assert!(clip.index() > doc.root().index());
}

#[test]
fn unknown_tags_keep_their_name() {
    let doc = sample();
    let filter = doc.nodes_of_kind(ElementKind::Other).next().unwrap();
    assert_eq!(doc.tag(filter), "filter-video");
    assert_eq!(doc.node(filter).parent().unwrap().kind(), ElementKind::Spine);
}

#[test]
fn resources_index_by_id() {
    let doc = sample();
    let res = Resources::from_document(&doc).unwrap();
    assert_eq!(res.len(), 2);
    let fmt = res.get_of_kind(&doc, "r1", ElementKind::Format).unwrap();
    assert_eq!(doc.attr(fmt, "frameDuration"), Some("1/25s"));
    assert!(res.get_of_kind(&doc, "r2", ElementKind::Format).is_none());
    assert!(res.get("r9").is_none());
}

#[test]
fn duplicate_resource_ids_are_rejected() {
    let doc = element("fcpxml")
        .child(
            element("resources")
                .child(element("format").attr("id", "r1"))
                .child(element("asset").attr("id", "r1")),
        )
        .into_document()
        .unwrap();
    assert!(Resources::from_document(&doc).is_err());
}

#[test]
fn empty_tags_are_rejected() {
    assert!(element("fcpxml").child(element("")).into_document().is_err());
}

#[test]
fn json_roundtrip_through_def() {
    let doc = sample();
    let def = doc.to_def(doc.root());
    let json = serde_json::to_string(&def).unwrap();
    let again = Document::from_json_str(&json).unwrap();
    assert_eq!(again.to_def(again.root()), def);
}

#[test]
fn breadcrumbs_share_prefix_and_match_document_parentage() {
    let doc = sample();
    let clip = doc.nodes_of_kind(ElementKind::AssetClip).next().unwrap();
    let crumbs = Breadcrumbs::from_document(&doc, clip);
    assert_eq!(crumbs.len(), 6);
    assert_eq!(crumbs.nearest(), doc.parent(clip));
    assert_eq!(crumbs.outermost(), Some(doc.root()));
    assert_eq!(crumbs.iter().collect::<Vec<_>>(), doc.ancestors(clip).collect::<Vec<_>>());

    let a = crumbs.push(clip);
    let b = crumbs.push(doc.root());
    assert_eq!(a.len(), 7);
    assert_eq!(b.len(), 7);
    assert_eq!(a.parent_chain(), crumbs);
    assert_ne!(a, b);
}

#[test]
fn attributes_come_back_sorted_by_name() {
    let doc = element("asset-clip")
        .attr("offset", "0s")
        .attr("name", "a")
        .attr("duration", "5s")
        .into_document()
        .unwrap();
    let names: Vec<&str> = doc.attrs(doc.root()).map(|(k, _)| k).collect();
    assert_eq!(names, ["duration", "name", "offset"]);
}
