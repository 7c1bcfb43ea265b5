use std::fmt;

use smallvec::SmallVec;

use crate::document::breadcrumbs::Breadcrumbs;
use crate::document::kind::ElementKind;
use crate::document::snapshot::Snapshot;
use crate::document::tree::NodeId;

/// Media stream a role applies to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    /// Audio role (`audioRole`).
    Audio,
    /// Video role (`videoRole`, title `role`).
    Video,
    /// Caption role.
    Caption,
}

/// A role with an optional subrole, written `role.subrole` in documents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Role {
    /// Stream kind.
    pub kind: RoleKind,
    /// Main role name.
    pub role: String,
    /// Subrole, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subrole: Option<String>,
}

impl Role {
    /// Split an attribute value at the first `.`.
    pub fn parse(kind: RoleKind, value: &str) -> Self {
        let (role, subrole) = match value.split_once('.') {
            Some((r, s)) if !s.is_empty() => (r, Some(s.to_owned())),
            Some((r, _)) => (r, None),
            None => (value, None),
        };
        Self {
            kind,
            role: role.to_owned(),
            subrole,
        }
    }

    fn builtin(kind: RoleKind, role: &str) -> Self {
        Self {
            kind,
            role: role.to_owned(),
            subrole: None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subrole {
            Some(s) => write!(f, "{}.{s}", self.role),
            None => f.write_str(&self.role),
        }
    }
}

/// A role together with where it came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "source", content = "role", rename_all = "snake_case")]
pub enum InterpolatedRole {
    /// Declared on the element.
    Assigned(Role),
    /// Declared on a containing clip.
    Inherited(Role),
    /// Implied by the element type.
    Defaulted(Role),
}

impl InterpolatedRole {
    /// The role regardless of origin.
    pub fn role(&self) -> &Role {
        match self {
            Self::Assigned(r) | Self::Inherited(r) | Self::Defaulted(r) => r,
        }
    }

    fn inherited(self) -> Self {
        match self {
            Self::Assigned(r) => Self::Inherited(r),
            other => other,
        }
    }
}

type RoleSet = SmallVec<[InterpolatedRole; 3]>;

fn has_kind(set: &RoleSet, kind: RoleKind) -> bool {
    set.iter().any(|r| r.role().kind == kind)
}

fn assigned(snapshot: &Snapshot, node: NodeId) -> SmallVec<[Role; 3]> {
    let doc = snapshot.doc();
    let mut out = SmallVec::new();
    if let Some(v) = doc.attr(node, "videoRole") {
        out.push(Role::parse(RoleKind::Video, v));
    }
    if let Some(v) = doc.attr(node, "audioRole") {
        out.push(Role::parse(RoleKind::Audio, v));
    }
    if let Some(v) = doc.attr(node, "role") {
        let kind = match doc.kind(node) {
            ElementKind::Caption => RoleKind::Caption,
            ElementKind::Audio => RoleKind::Audio,
            _ => RoleKind::Video,
        };
        out.push(Role::parse(kind, v));
    }
    out
}

fn asset_flag(snapshot: &Snapshot, asset: NodeId, name: &str) -> bool {
    snapshot.doc().attr(asset, name) == Some("1")
}

fn defaults(snapshot: &Snapshot, node: NodeId) -> SmallVec<[Role; 2]> {
    let doc = snapshot.doc();
    let video = || Role::builtin(RoleKind::Video, "Video");
    let audio = || Role::builtin(RoleKind::Audio, "Dialogue");
    match doc.kind(node) {
        ElementKind::Title => [Role::builtin(RoleKind::Video, "Titles")].into_iter().collect(),
        ElementKind::Video => [video()].into_iter().collect(),
        ElementKind::Audio => [audio()].into_iter().collect(),
        ElementKind::AssetClip => {
            let asset = doc
                .attr(node, "ref")
                .and_then(|id| snapshot.resources().get_of_kind(doc, id, ElementKind::Asset));
            let Some(asset) = asset else {
                return [video(), audio()].into_iter().collect();
            };
            let mut out = SmallVec::new();
            if asset_flag(snapshot, asset, "hasVideo") {
                out.push(video());
            }
            if asset_flag(snapshot, asset, "hasAudio") {
                out.push(audio());
            }
            out
        }
        ElementKind::Clip | ElementKind::RefClip | ElementKind::McClip | ElementKind::SyncClip => {
            [video(), audio()].into_iter().collect()
        }
        _ => SmallVec::new(),
    }
}

// Containers whose roles apply to the media they wrap.
fn routes_roles(kind: ElementKind) -> bool {
    matches!(
        kind,
        ElementKind::Clip | ElementKind::RefClip | ElementKind::McClip | ElementKind::SyncClip
    )
}

// Nodes a role lookup passes through on the way to a routing container.
fn passes_roles(kind: ElementKind) -> bool {
    matches!(
        kind,
        ElementKind::Spine | ElementKind::Sequence | ElementKind::McAngle | ElementKind::Audition
    )
}

/// Roles of `node` reached through `crumbs`.
///
/// Assigned roles win. Streams without one take the nearest wrapping clip's assignment (through
/// compound, multicam and sync clips), then the element type's default. Connected elements do
/// not inherit from the clip they are attached to. Annotations report the roles of the clip they
/// are attached to.
pub fn inherited_roles(
    snapshot: &Snapshot,
    node: NodeId,
    crumbs: &Breadcrumbs,
) -> Vec<InterpolatedRole> {
    let doc = snapshot.doc();

    if doc.kind(node).is_annotation() {
        let Some(parent) = crumbs.nearest() else {
            return Vec::new();
        };
        return inherited_roles(snapshot, parent, &crumbs.parent_chain())
            .into_iter()
            .map(InterpolatedRole::inherited)
            .collect();
    }

    let mut set: RoleSet = assigned(snapshot, node)
        .into_iter()
        .map(InterpolatedRole::Assigned)
        .collect();

    let mut below = node;
    for anc in crumbs.iter() {
        let kind = doc.kind(anc);
        // A laned child is connected to `anc`, not wrapped by it; sync-clip lanes stay in the clip.
        if doc.attr(below, "lane").is_some() && kind != ElementKind::SyncClip {
            break;
        }
        below = anc;
        if routes_roles(kind) {
            for role in assigned(snapshot, anc) {
                if !has_kind(&set, role.kind) {
                    set.push(InterpolatedRole::Inherited(role));
                }
            }
        } else if !passes_roles(kind) {
            break;
        }
    }

    for role in defaults(snapshot, node) {
        if !has_kind(&set, role.kind) {
            set.push(InterpolatedRole::Defaulted(role));
        }
    }

    set.into_vec()
}

#[cfg(test)]
#[path = "../../tests/unit/context/roles.rs"]
mod tests;
