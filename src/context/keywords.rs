use crate::document::breadcrumbs::Breadcrumbs;
use crate::document::kind::ElementKind;
use crate::document::snapshot::Snapshot;
use crate::document::tree::NodeId;
use crate::foundation::core::TimeRange;
use crate::time::resolve::time_attr;
use crate::timeline::absolute::absolute_start;

fn extent(snapshot: &Snapshot, node: NodeId, crumbs: &Breadcrumbs) -> Option<TimeRange> {
    let start = absolute_start(snapshot, node, crumbs)?;
    let duration = time_attr(snapshot.doc(), node, "duration").unwrap_or_default();
    Some(TimeRange::from_start_duration(start, duration))
}

fn applies(keyword: TimeRange, element: TimeRange) -> bool {
    if element.is_empty() {
        keyword.contains(element.start)
    } else {
        keyword.overlaps(element)
    }
}

fn push_values(out: &mut Vec<String>, value: &str) {
    for v in value.split(',').map(str::trim).filter(|v| !v.is_empty()) {
        if !out.iter().any(|seen| seen == v) {
            out.push(v.to_owned());
        }
    }
}

/// Keywords covering `node`: keyword ranges on the element and on every clip above it that
/// overlap the element's absolute extent.
///
/// When the element cannot be placed in time only its own keywords are reported. Values are
/// split on commas and de-duplicated in first-seen order, element first.
pub fn keywords(snapshot: &Snapshot, node: NodeId, crumbs: &Breadcrumbs) -> Vec<String> {
    let doc = snapshot.doc();
    let mut out = Vec::new();
    let element = extent(snapshot, node, crumbs);

    let mut holder = Some(node);
    let mut chain = crumbs.clone();
    while let Some(h) = holder {
        let inner = chain.push(h);
        for kw in doc.children_of_kind(h, ElementKind::Keyword) {
            let hit = match element {
                Some(el) => extent(snapshot, kw, &inner).is_some_and(|k| applies(k, el)),
                None => h == node,
            };
            if hit && let Some(value) = doc.attr(kw, "value") {
                push_values(&mut out, value);
            }
        }
        if element.is_none() {
            break;
        }
        holder = chain.nearest();
        chain = chain.parent_chain();
    }

    out
}

#[cfg(test)]
#[path = "../../tests/unit/context/keywords.rs"]
mod tests;
