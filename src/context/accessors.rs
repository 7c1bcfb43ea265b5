use std::collections::BTreeMap;

use crate::context::keywords::keywords;
use crate::context::metadata::metadata;
use crate::context::roles::{InterpolatedRole, inherited_roles};
use crate::document::kind::ElementKind;
use crate::extract::element::ExtractedElement;
use crate::foundation::core::{Rational, TimeRange};
use crate::time::rate::FrameRate;
use crate::time::resolve::{VideoFormat, main_timeline_frame_rate, resolve_frame_rate};
use crate::time::timecode::Timecode;
use crate::timeline::absolute::{absolute_end, absolute_range, absolute_start};
use crate::timeline::occlusion::{Occlusion, effective_occlusion, occlusion};

/// Frame rate used to express a time as timecode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameRateSource {
    /// Rate of the nearest `format` governing the element.
    Local,
    /// Rate of the outermost sequence.
    #[default]
    MainTimeline,
    /// An explicit rate.
    Rate(FrameRate),
}

impl ExtractedElement {
    /// Absolute start on the main timeline.
    pub fn absolute_start(&self) -> Option<Rational> {
        absolute_start(self.snapshot(), self.node(), self.breadcrumbs())
    }

    /// Absolute end on the main timeline.
    pub fn absolute_end(&self) -> Option<Rational> {
        absolute_end(self.snapshot(), self.node(), self.breadcrumbs())
    }

    /// Absolute `[start, end)` on the main timeline.
    pub fn absolute_range(&self) -> Option<TimeRange> {
        absolute_range(self.snapshot(), self.node(), self.breadcrumbs())
    }

    fn rate(&self, source: FrameRateSource) -> Option<FrameRate> {
        match source {
            FrameRateSource::Local => self.local_frame_rate().map(|f| f.rate),
            FrameRateSource::MainTimeline => self.main_timeline_frame_rate().map(|f| f.rate),
            FrameRateSource::Rate(r) => Some(r),
        }
    }

    /// Absolute start as timecode.
    pub fn absolute_start_timecode(&self, source: FrameRateSource) -> Option<Timecode> {
        Some(Timecode::from_rational(
            self.absolute_start()?,
            self.rate(source)?,
        ))
    }

    /// Absolute end as timecode.
    pub fn absolute_end_timecode(&self, source: FrameRateSource) -> Option<Timecode> {
        Some(Timecode::from_rational(self.absolute_end()?, self.rate(source)?))
    }

    /// Occlusion against the nearest timed container.
    pub fn occlusion(&self) -> Option<Occlusion> {
        occlusion(self.snapshot(), self.node(), self.breadcrumbs())
    }

    /// Occlusion against the main timeline.
    pub fn effective_occlusion(&self) -> Option<Occlusion> {
        effective_occlusion(self.snapshot(), self.node(), self.breadcrumbs())
    }

    /// Frame rate of the nearest `format` on the element or its chain.
    pub fn local_frame_rate(&self) -> Option<VideoFormat> {
        resolve_frame_rate(self.snapshot(), self.node(), self.breadcrumbs())
    }

    /// Frame rate of the outermost sequence on the chain.
    pub fn main_timeline_frame_rate(&self) -> Option<VideoFormat> {
        main_timeline_frame_rate(self.snapshot(), self.node(), self.breadcrumbs())
    }

    /// Roles with their provenance.
    pub fn roles(&self) -> Vec<InterpolatedRole> {
        inherited_roles(self.snapshot(), self.node(), self.breadcrumbs())
    }

    /// Keywords covering the element.
    pub fn keywords(&self) -> Vec<String> {
        keywords(self.snapshot(), self.node(), self.breadcrumbs())
    }

    /// Merged metadata entries.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        metadata(self.snapshot(), self.node(), self.breadcrumbs())
    }

    /// The element's `name` attribute.
    pub fn name(&self) -> Option<&str> {
        self.attr("name")
    }

    fn ancestor_name(&self, kind: ElementKind) -> Option<&str> {
        let doc = self.snapshot().doc();
        self.breadcrumbs()
            .iter()
            .find(|&n| doc.kind(n) == kind)
            .and_then(|n| doc.attr(n, "name"))
    }

    /// Name of the event the element belongs to.
    pub fn ancestor_event_name(&self) -> Option<&str> {
        self.ancestor_name(ElementKind::Event)
    }

    /// Name of the project the element belongs to.
    pub fn ancestor_project_name(&self) -> Option<&str> {
        self.ancestor_name(ElementKind::Project)
    }
}
