use super::*;
use crate::document::dsl::element;
use crate::fixtures::{by_name, crumbs, first_of, project, snapshot};

fn pairs(map: &BTreeMap<String, String>) -> Vec<(&str, &str)> {
    map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

#[test]
fn clip_entries_override_the_asset() {
    let s = project();
    let n = by_name(&s, "Interview");
    assert_eq!(
        pairs(&metadata(&s, n, &crumbs(&s, n))),
        [("reel", "A001"), ("scene", "2")]
    );
}

#[test]
fn annotations_see_their_clip_metadata() {
    let s = project();
    let marker = first_of(&s, ElementKind::Marker);
    assert_eq!(
        pairs(&metadata(&s, marker, &crumbs(&s, marker))),
        [("reel", "A001"), ("scene", "2")]
    );
}

#[test]
fn angle_clips_use_their_own_asset() {
    let s = project();
    let multi = by_name(&s, "Multi");
    let clip = by_name(&s, "A2 Clip");
    let k = crumbs(&s, multi).push(multi).push(by_name(&s, "Cam A2"));
    assert_eq!(
        pairs(&metadata(&s, clip, &k)),
        [("reel", "A001"), ("scene", "1")]
    );
}

#[test]
fn elements_without_sources_are_empty() {
    let s = project();
    let n = by_name(&s, "Lower Third");
    assert!(metadata(&s, n, &crumbs(&s, n)).is_empty());
}

#[test]
fn nearer_ancestors_win() {
    let s = snapshot(
        element("fcpxml").child(
            element("project")
                .child(element("metadata").child(element("md").attr("key", "k").attr("value", "project")))
                .child(
                    element("clip")
                        .attr("name", "c")
                        .child(element("metadata").child(element("md").attr("key", "k").attr("value", "clip")))
                        .child(element("marker").attr("name", "m"))
                        .child(element("metadata").child(element("md").attr("key", "only-key"))),
                ),
        ),
    );
    let m = by_name(&s, "m");
    assert_eq!(pairs(&metadata(&s, m, &crumbs(&s, m))), [("k", "clip")]);
}
