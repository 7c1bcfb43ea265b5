use crate::document::breadcrumbs::Breadcrumbs;
use crate::document::snapshot::Snapshot;
use crate::document::tree::NodeId;
use crate::foundation::core::{Rational, TimeRange};
use crate::timeline::absolute::{absolute_range, absolute_start};
use crate::time::resolve::time_attr;

/// Visibility of an interval relative to a containing interval.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Occlusion {
    /// Entirely inside the container.
    NotOccluded,
    /// Overlaps the container but extends past at least one edge.
    PartiallyOccluded,
    /// No overlap with the container.
    FullyOccluded,
}

/// Classify an inner interval (or a point when `inner_end` is `None`) against `outer`.
///
/// Touching endpoints are disjoint.
pub fn classify(outer: TimeRange, inner_start: Rational, inner_end: Option<Rational>) -> Occlusion {
    let Some(inner_end) = inner_end else {
        return if outer.contains(inner_start) {
            Occlusion::NotOccluded
        } else {
            Occlusion::FullyOccluded
        };
    };

    let inner = TimeRange::new(inner_start, inner_end);
    if inner.is_empty() {
        return classify(outer, inner_start, None);
    }
    if outer.contains_range(inner) {
        Occlusion::NotOccluded
    } else if outer.overlaps(inner) {
        Occlusion::PartiallyOccluded
    } else {
        Occlusion::FullyOccluded
    }
}

fn lane(snapshot: &Snapshot, node: NodeId) -> i32 {
    snapshot
        .doc()
        .attr(node, "lane")
        .and_then(|l| l.parse().ok())
        .unwrap_or(0)
}

// Nearest ancestor with a resolvable interval, with that ancestor's own chain.
fn timed_ancestors<'a>(
    snapshot: &'a Snapshot,
    crumbs: &Breadcrumbs,
) -> impl Iterator<Item = (NodeId, TimeRange)> + 'a {
    let mut chain = crumbs.clone();
    std::iter::from_fn(move || {
        loop {
            let anc = chain.nearest()?;
            chain = chain.parent_chain();
            if let Some(range) = absolute_range(snapshot, anc, &chain) {
                return Some((anc, range));
            }
        }
    })
}

/// Occlusion of `node` against the nearest ancestor with a resolvable interval.
pub fn occlusion(snapshot: &Snapshot, node: NodeId, crumbs: &Breadcrumbs) -> Option<Occlusion> {
    let start = absolute_start(snapshot, node, crumbs)?;
    let end = time_attr(snapshot.doc(), node, "duration").map(|d| start + d);
    let (_, outer) = timed_ancestors(snapshot, crumbs).next()?;
    Some(classify(outer, start, end))
}

/// Occlusion of `node` against the main timeline.
///
/// Ancestors are compared nearest first while they stay on the lane of the previously compared
/// ancestor. A partial overlap narrows the working interval before the next comparison; a full
/// occlusion ends the walk.
pub fn effective_occlusion(
    snapshot: &Snapshot,
    node: NodeId,
    crumbs: &Breadcrumbs,
) -> Option<Occlusion> {
    let start = absolute_start(snapshot, node, crumbs)?;
    let mut end = time_attr(snapshot.doc(), node, "duration").map(|d| start + d);
    let mut start = start;
    let mut narrowed = false;
    let mut run_lane = None;

    for (anc, outer) in timed_ancestors(snapshot, crumbs) {
        let anc_lane = lane(snapshot, anc);
        if run_lane.is_some_and(|l| l != anc_lane) {
            break;
        }
        run_lane = Some(anc_lane);

        match classify(outer, start, end) {
            Occlusion::FullyOccluded => return Some(Occlusion::FullyOccluded),
            Occlusion::PartiallyOccluded => {
                // Only ranged elements can be partial.
                if let Some(e) = end {
                    let clamped = TimeRange::new(start, e)
                        .intersection(outer)
                        .unwrap_or(TimeRange::new(start, start));
                    start = clamped.start;
                    end = Some(clamped.end);
                }
                narrowed = true;
            }
            Occlusion::NotOccluded => {}
        }
    }

    Some(if narrowed {
        Occlusion::PartiallyOccluded
    } else {
        Occlusion::NotOccluded
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/occlusion.rs"]
mod tests;
