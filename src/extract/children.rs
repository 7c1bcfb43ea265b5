use smallvec::SmallVec;

use crate::document::kind::ElementKind;
use crate::document::snapshot::Snapshot;
use crate::document::tree::NodeId;
use crate::extract::scope::{AuditionMask, ExtractionScope, McAngleMask};

pub(crate) type Children = SmallVec<[NodeId; 8]>;

/// Children a traversal descends into, in visiting order.
///
/// Auditions hide inactive takes. Multicam and compound clips expose the angle or sequence they
/// reference ahead of their own children; those nodes live in the resource table and are only
/// reachable this way.
pub(crate) fn resolve_children(
    snapshot: &Snapshot,
    node: NodeId,
    scope: &ExtractionScope,
) -> Children {
    let doc = snapshot.doc();
    match doc.kind(node) {
        ElementKind::Audition => match scope.auditions {
            AuditionMask::Active => doc.children(node).iter().copied().take(1).collect(),
            AuditionMask::All => doc.children(node).iter().copied().collect(),
        },
        ElementKind::McClip => {
            let mut out = mc_angles(snapshot, node, scope.mc_angles);
            out.extend(
                doc.children(node)
                    .iter()
                    .copied()
                    .filter(|&c| doc.kind(c) != ElementKind::McSource),
            );
            out
        }
        ElementKind::RefClip => {
            let mut out = Children::new();
            if let Some(seq) = referenced_media(snapshot, node)
                .and_then(|media| doc.find_child(media, ElementKind::Sequence))
            {
                out.push(seq);
            } else {
                tracing::debug!(
                    node = node.index(),
                    "ref-clip without a resolvable compound sequence"
                );
            }
            out.extend(doc.children(node).iter().copied());
            out
        }
        _ => doc.children(node).iter().copied().collect(),
    }
}

fn referenced_media(snapshot: &Snapshot, node: NodeId) -> Option<NodeId> {
    let doc = snapshot.doc();
    let id = doc.attr(node, "ref")?;
    let media = snapshot
        .resources()
        .get_of_kind(doc, id, ElementKind::Media);
    if media.is_none() {
        tracing::debug!(tag = doc.tag(node), r#ref = id, "missing media resource");
    }
    media
}

fn wants_video(src_enable: &str) -> bool {
    matches!(src_enable, "all" | "video")
}

fn wants_audio(src_enable: &str) -> bool {
    matches!(src_enable, "all" | "audio")
}

/// Angles of the multicam behind an `mc-clip`: the video angle first, then the audio angle when
/// it is a different one.
fn mc_angles(snapshot: &Snapshot, node: NodeId, mask: McAngleMask) -> Children {
    let doc = snapshot.doc();
    let Some(multicam) = referenced_media(snapshot, node)
        .and_then(|media| doc.find_child(media, ElementKind::Multicam))
    else {
        return Children::new();
    };
    let angles = || doc.children_of_kind(multicam, ElementKind::McAngle);

    if mask == McAngleMask::All {
        return angles().collect();
    }

    let sources: Vec<(&str, &str)> = doc
        .children_of_kind(node, ElementKind::McSource)
        .filter_map(|s| {
            let id = doc.attr(s, "angleID")?;
            Some((id, doc.attr(s, "srcEnable").unwrap_or("all")))
        })
        .collect();
    let pick = |wants: fn(&str) -> bool| {
        sources
            .iter()
            .find(|(_, enable)| wants(enable))
            .and_then(|(id, _)| angles().find(|&a| doc.attr(a, "angleID") == Some(*id)))
    };

    let mut out = Children::new();
    let video = pick(wants_video);
    let audio = pick(wants_audio);
    out.extend(video);
    if audio != video {
        out.extend(audio);
    }
    if out.is_empty() {
        tracing::debug!(node = node.index(), "mc-clip selects no known angle");
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/extract/children.rs"]
mod tests;
