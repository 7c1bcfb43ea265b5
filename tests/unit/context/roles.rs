use super::*;
use crate::document::dsl::element;
use crate::fixtures::{by_name, crumbs, first_of, project, snapshot};

fn roles_of(s: &Snapshot, name: &str) -> Vec<InterpolatedRole> {
    let n = by_name(s, name);
    inherited_roles(s, n, &crumbs(s, n))
}

fn role(kind: RoleKind, value: &str) -> Role {
    Role::parse(kind, value)
}

#[test]
fn role_parsing_and_display() {
    let r = role(RoleKind::Audio, "dialogue.dialogue-1");
    assert_eq!(r.role, "dialogue");
    assert_eq!(r.subrole.as_deref(), Some("dialogue-1"));
    assert_eq!(r.to_string(), "dialogue.dialogue-1");

    let r = role(RoleKind::Video, "titles");
    assert_eq!(r.subrole, None);
    assert_eq!(r.to_string(), "titles");
    assert_eq!(role(RoleKind::Video, "video.").subrole, None);
}

#[test]
fn assigned_roles_win_and_asset_fills_the_rest() {
    let s = project();
    assert_eq!(
        roles_of(&s, "Interview"),
        [
            InterpolatedRole::Assigned(role(RoleKind::Audio, "dialogue.dialogue-1")),
            InterpolatedRole::Defaulted(role(RoleKind::Video, "Video")),
        ]
    );
}

#[test]
fn connected_clips_do_not_inherit_from_their_anchor() {
    let s = project();
    assert_eq!(
        roles_of(&s, "B-Roll"),
        [
            InterpolatedRole::Assigned(role(RoleKind::Video, "video.broll")),
            InterpolatedRole::Defaulted(role(RoleKind::Audio, "Dialogue")),
        ]
    );
}

#[test]
fn titles_and_gaps() {
    let s = project();
    assert_eq!(
        roles_of(&s, "Lower Third"),
        [InterpolatedRole::Assigned(role(
            RoleKind::Video,
            "titles.lower"
        ))]
    );
    assert_eq!(
        roles_of(&s, "Connected"),
        [InterpolatedRole::Defaulted(role(RoleKind::Video, "Titles"))]
    );
    assert!(roles_of(&s, "Gap").is_empty());
}

#[test]
fn annotations_report_their_clip_roles() {
    let s = project();
    let marker = first_of(&s, ElementKind::Marker);
    assert_eq!(
        inherited_roles(&s, marker, &crumbs(&s, marker)),
        [
            InterpolatedRole::Inherited(role(RoleKind::Audio, "dialogue.dialogue-1")),
            InterpolatedRole::Defaulted(role(RoleKind::Video, "Video")),
        ]
    );
}

#[test]
fn wrapping_clips_pass_roles_down() {
    let s = snapshot(
        element("fcpxml").child(
            element("sync-clip")
                .attr("audioRole", "effects")
                .attr("videoRole", "graphics")
                .child(element("asset-clip").attr("name", "a").attr("videoRole", "video.a"))
                .child(element("title").attr("name", "t")),
        ),
    );
    // Asset "a" has no resolvable asset, so both defaults would apply.
    assert_eq!(
        roles_of(&s, "a"),
        [
            InterpolatedRole::Assigned(role(RoleKind::Video, "video.a")),
            InterpolatedRole::Inherited(role(RoleKind::Audio, "effects")),
        ]
    );
    assert_eq!(
        roles_of(&s, "t"),
        [
            InterpolatedRole::Inherited(role(RoleKind::Video, "graphics")),
            InterpolatedRole::Inherited(role(RoleKind::Audio, "effects")),
        ]
    );
}

#[test]
fn connected_titles_default_on_any_wrapping_clip_kind() {
    for anchor in ["clip", "ref-clip", "mc-clip"] {
        let s = snapshot(
            element("fcpxml").child(
                element("spine").child(
                    element(anchor)
                        .attr("name", "anchor")
                        .attr("videoRole", "graphics")
                        .child(element("title").attr("name", "t").attr("lane", "1")),
                ),
            ),
        );
        assert_eq!(
            roles_of(&s, "t"),
            [InterpolatedRole::Defaulted(role(RoleKind::Video, "Titles"))],
            "{anchor}"
        );
    }
}

#[test]
fn sync_clip_lanes_still_take_the_clip_roles() {
    let s = snapshot(
        element("fcpxml").child(
            element("sync-clip")
                .attr("audioRole", "effects")
                .child(element("audio").attr("name", "fx").attr("lane", "-1")),
        ),
    );
    assert_eq!(
        roles_of(&s, "fx"),
        [InterpolatedRole::Inherited(role(RoleKind::Audio, "effects"))]
    );
}

#[test]
fn interpolated_roles_serialize_with_their_source() {
    let r = InterpolatedRole::Inherited(role(RoleKind::Audio, "music.score"));
    assert_eq!(
        serde_json::to_value(&r).unwrap(),
        serde_json::json!({
            "source": "inherited",
            "role": { "kind": "audio", "role": "music", "subrole": "score" }
        })
    );
}
