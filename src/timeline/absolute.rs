//! Absolute placement of nodes on the main timeline.
//!
//! Every story element states its `offset` in its parent's local coordinate system, and every
//! parent maps its local time to the grandparent's through its own `start`. Resolving a node is a
//! fold over its chain from the outermost ancestor down to the node itself.

use crate::document::breadcrumbs::Breadcrumbs;
use crate::document::kind::ElementKind;
use crate::document::snapshot::Snapshot;
use crate::document::tree::NodeId;
use crate::foundation::core::{Rational, TimeRange};
use crate::time::resolve::{local_start, time_attr};

#[derive(Clone, Debug, Default)]
struct Fold {
    // Absolute position of the current node's local origin; `None` until something grounds it.
    acc: Option<Rational>,
    // Local `start` of the nearest processed node that defines a local timeline.
    last_start: Option<Rational>,
    // Chain of processed nodes, used to resolve conform rates along the way.
    crumbs: Breadcrumbs,
}

impl Fold {
    // Offsets only move an already grounded origin.
    fn add(&mut self, delta: Rational) {
        self.acc = self.acc.map(|acc| acc + delta);
    }

    fn relative(&self, t: Rational) -> Rational {
        match self.last_start {
            Some(s) => t - s,
            None => t,
        }
    }
}

fn step(snapshot: &Snapshot, mut fold: Fold, node: NodeId, is_target: bool) -> Fold {
    let doc = snapshot.doc();
    let kind = doc.kind(node);

    let anchor = time_attr(doc, node, "tcStart").or(match kind {
        ElementKind::Sequence => Some(Rational::ZERO),
        _ => None,
    });
    let offset = time_attr(doc, node, "offset");

    if kind == ElementKind::Audition && !is_target {
        // Audition takes restate the audition's own offset in the same coordinate system.
    } else if kind.is_annotation() {
        if let Some(start) = time_attr(doc, node, "start") {
            let delta = fold.relative(start);
            fold.add(delta);
        }
    } else if let Some(anchor) = anchor {
        // Nested timelines (compound clip contents) live in the referencing clip's `start`
        // space, so only the first anchor on the chain counts.
        if fold.acc.is_none() {
            if offset.is_some() {
                debug_assert!(false, "{} declares both tcStart and offset", doc.tag(node));
                tracing::warn!(tag = doc.tag(node), "tcStart and offset on one node, using tcStart");
            }
            fold.acc = Some(anchor);
            fold.last_start = Some(anchor);
        }
    } else {
        if let Some(offset) = offset {
            let delta = fold.relative(offset);
            fold.add(delta);
            fold.last_start = Some(match kind {
                // A connected storyline's children restate offsets in the storyline's parent.
                ElementKind::Spine => offset,
                _ => Rational::ZERO,
            });
        }
        if let Some(start) = local_start(snapshot, node, &fold.crumbs) {
            fold.last_start = Some(start);
        }
    }

    fold.crumbs = fold.crumbs.push(node);
    fold
}

/// Absolute start of `node` on the outermost timeline reached by `crumbs`.
///
/// `None` when no anchor on the chain grounds the node: resource subtrees, or browser clips and
/// their annotations outside any sequence.
pub fn absolute_start(snapshot: &Snapshot, node: NodeId, crumbs: &Breadcrumbs) -> Option<Rational> {
    let fold = crumbs
        .to_vec_outermost_first()
        .into_iter()
        .fold(Fold::default(), |f, n| step(snapshot, f, n, false));
    step(snapshot, fold, node, true).acc
}

/// Absolute end: absolute start plus the node's `duration`.
pub fn absolute_end(snapshot: &Snapshot, node: NodeId, crumbs: &Breadcrumbs) -> Option<Rational> {
    absolute_range(snapshot, node, crumbs).map(|r| r.end)
}

/// Absolute `[start, end)` interval; requires both a start and a `duration`.
pub fn absolute_range(
    snapshot: &Snapshot,
    node: NodeId,
    crumbs: &Breadcrumbs,
) -> Option<TimeRange> {
    let start = absolute_start(snapshot, node, crumbs)?;
    let duration = time_attr(snapshot.doc(), node, "duration")?;
    Some(TimeRange::from_start_duration(start, duration))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/absolute.rs"]
mod tests;
