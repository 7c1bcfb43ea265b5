use crate::document::breadcrumbs::Breadcrumbs;
use crate::document::kind::ElementKind;
use crate::document::snapshot::Snapshot;
use crate::document::tree::{Document, NodeId};
use crate::foundation::core::Rational;
use crate::foundation::error::{ResolveError, ResolveResult};
use crate::time::rate::{FrameRate, conform_scaling_factor};

/// Frame rate resolved from the nearest `format` reference, plus its scan mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct VideoFormat {
    /// Timecode frame rate.
    pub rate: FrameRate,
    /// Format declares a field order other than progressive.
    pub interlaced: bool,
}

/// Parse a time attribute, reporting malformed values.
pub fn try_time_attr(doc: &Document, node: NodeId, name: &str) -> ResolveResult<Option<Rational>> {
    doc.attr(node, name).map(Rational::parse).transpose()
}

/// Parse a time attribute. Missing and malformed values both yield `None`; malformed ones are
/// logged.
pub fn time_attr(doc: &Document, node: NodeId, name: &str) -> Option<Rational> {
    match try_time_attr(doc, node, name) {
        Ok(v) => v,
        Err(err) => {
            tracing::debug!(tag = doc.tag(node), attr = name, %err, "ignoring time attribute");
            None
        }
    }
}

/// Parse a `tcFormat` token.
pub fn parse_tc_format(token: &str) -> ResolveResult<bool> {
    match token {
        "DF" => Ok(true),
        "NDF" => Ok(false),
        other => Err(ResolveError::format(format!(
            "unknown timecode format '{other}'"
        ))),
    }
}

/// Frame rate governing `node`: the node itself and then each breadcrumb are searched for a
/// `format` reference and a `tcFormat` flag. `None` means no timecode can be computed here.
pub fn resolve_frame_rate(
    snapshot: &Snapshot,
    node: NodeId,
    crumbs: &Breadcrumbs,
) -> Option<VideoFormat> {
    resolve_frame_rate_in(snapshot, std::iter::once(node).chain(crumbs.iter()))
}

/// Frame rate of the outermost sequence on the chain, i.e. the main timeline.
pub fn main_timeline_frame_rate(
    snapshot: &Snapshot,
    node: NodeId,
    crumbs: &Breadcrumbs,
) -> Option<VideoFormat> {
    let doc = snapshot.doc();
    let chain: Vec<NodeId> = std::iter::once(node).chain(crumbs.iter()).collect();
    let pos = chain
        .iter()
        .rposition(|&n| doc.kind(n) == ElementKind::Sequence)?;
    resolve_frame_rate_in(snapshot, chain[pos..].iter().copied())
}

fn resolve_frame_rate_in(
    snapshot: &Snapshot,
    nearest_first: impl Iterator<Item = NodeId>,
) -> Option<VideoFormat> {
    let doc = snapshot.doc();
    let mut format = None;
    let mut drop = None;

    for n in nearest_first {
        if drop.is_none()
            && let Some(token) = doc.attr(n, "tcFormat")
        {
            match parse_tc_format(token) {
                Ok(d) => drop = Some(d),
                Err(err) => tracing::debug!(tag = doc.tag(n), %err, "ignoring tcFormat"),
            }
        }
        if format.is_none()
            && let Some(id) = doc.attr(n, "format")
        {
            match snapshot
                .resources()
                .get_of_kind(doc, id, ElementKind::Format)
            {
                Some(f) => format = Some(f),
                None => tracing::debug!(tag = doc.tag(n), format = id, "unresolved format ref"),
            }
        }
        if format.is_some() && drop.is_some() {
            break;
        }
    }

    let format = format?;
    let frame_duration = time_attr(doc, format, "frameDuration")?;
    let rate = FrameRate::from_frame_duration(frame_duration, drop.unwrap_or(false))?;
    let interlaced = doc
        .attr(format, "fieldOrder")
        .is_some_and(|o| o != "progressive");
    Some(VideoFormat { rate, interlaced })
}

/// Scaling factor for a clip's `start` family when it carries an enabled `conform-rate`.
///
/// The timeline rate is the rate of the clip's container (its breadcrumbs), not the clip's own
/// native format.
pub fn conform_factor(snapshot: &Snapshot, node: NodeId, crumbs: &Breadcrumbs) -> Option<Rational> {
    let doc = snapshot.doc();
    let conform = doc.find_child(node, ElementKind::ConformRate)?;
    if doc.attr(conform, "scaleEnabled") == Some("0") {
        return None;
    }
    let media = match FrameRate::from_conform_token(doc.attr(conform, "srcFrameRate")?) {
        Ok(rate) => rate,
        Err(err) => {
            tracing::debug!(tag = doc.tag(node), %err, "ignoring conform-rate");
            return None;
        }
    };
    let container = crumbs.nearest()?;
    let timeline = resolve_frame_rate(snapshot, container, &crumbs.parent_chain())?;
    conform_scaling_factor(media, timeline.rate)
}

/// Local `start` of a clip, scaled into its container's rate when a conform applies.
pub fn local_start(snapshot: &Snapshot, node: NodeId, crumbs: &Breadcrumbs) -> Option<Rational> {
    let start = time_attr(snapshot.doc(), node, "start")?;
    Some(match conform_factor(snapshot, node, crumbs) {
        Some(factor) => start * factor,
        None => start,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/time/resolve.rs"]
mod tests;
