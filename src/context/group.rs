use std::collections::BTreeMap;
use std::sync::Arc;

use crate::context::accessors::FrameRateSource;
use crate::context::keys;
use crate::context::roles::InterpolatedRole;
use crate::extract::element::ExtractedElement;
use crate::foundation::core::Rational;
use crate::time::resolve::VideoFormat;
use crate::time::timecode::Timecode;
use crate::timeline::occlusion::Occlusion;

/// Value produced by a context function.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContextValue {
    /// Rational time.
    Time(Rational),
    /// Frame-accurate timecode.
    Timecode(Timecode),
    /// Occlusion class.
    Occlusion(Occlusion),
    /// Resolved frame rate.
    FrameRate(VideoFormat),
    /// Role set.
    Roles(Vec<InterpolatedRole>),
    /// Keyword list.
    Keywords(Vec<String>),
    /// Key/value entries.
    Metadata(BTreeMap<String, String>),
    /// Plain text.
    Text(String),
}

/// A named derived property. `None` means the value is absent for that element.
pub type ContextFn = Arc<dyn Fn(&ExtractedElement) -> Option<ContextValue> + Send + Sync>;

/// Set of named context functions.
///
/// Groups compose with [`ContextGroup::union`]; on a name clash the right-hand group wins.
#[derive(Clone, Default)]
pub struct ContextGroup {
    fns: BTreeMap<String, ContextFn>,
}

impl ContextGroup {
    /// Empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one function.
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&ExtractedElement) -> Option<ContextValue> + Send + Sync + 'static,
    ) -> Self {
        self.fns.insert(name.into(), Arc::new(f));
        self
    }

    /// Union of two groups.
    #[must_use]
    pub fn union(mut self, other: ContextGroup) -> Self {
        self.fns.extend(other.fns);
        self
    }

    /// Every built-in function, keyed by the names in [`keys`].
    pub fn standard() -> Self {
        Self::timing().union(Self::editorial())
    }

    /// Time, timecode, occlusion and frame rate.
    pub fn timing() -> Self {
        Self::new()
            .with(keys::ABSOLUTE_START, |el| {
                el.absolute_start().map(ContextValue::Time)
            })
            .with(keys::ABSOLUTE_END, |el| {
                el.absolute_end().map(ContextValue::Time)
            })
            .with(keys::ABSOLUTE_START_TIMECODE, |el| {
                el.absolute_start_timecode(FrameRateSource::MainTimeline)
                    .map(ContextValue::Timecode)
            })
            .with(keys::OCCLUSION, |el| el.occlusion().map(ContextValue::Occlusion))
            .with(keys::EFFECTIVE_OCCLUSION, |el| {
                el.effective_occlusion().map(ContextValue::Occlusion)
            })
            .with(keys::LOCAL_FRAME_RATE, |el| {
                el.local_frame_rate().map(ContextValue::FrameRate)
            })
    }

    /// Roles, keywords, metadata and names.
    pub fn editorial() -> Self {
        Self::new()
            .with(keys::ROLES, |el| Some(ContextValue::Roles(el.roles())))
            .with(keys::KEYWORDS, |el| Some(ContextValue::Keywords(el.keywords())))
            .with(keys::METADATA, |el| Some(ContextValue::Metadata(el.metadata())))
            .with(keys::NAME, |el| el.name().map(|n| ContextValue::Text(n.to_owned())))
            .with(keys::ANCESTOR_EVENT_NAME, |el| {
                el.ancestor_event_name()
                    .map(|n| ContextValue::Text(n.to_owned()))
            })
            .with(keys::ANCESTOR_PROJECT_NAME, |el| {
                el.ancestor_project_name()
                    .map(|n| ContextValue::Text(n.to_owned()))
            })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fns.keys().map(String::as_str)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.fns.contains_key(name)
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.fns.len()
    }

    /// Whether the group is empty.
    pub fn is_empty(&self) -> bool {
        self.fns.is_empty()
    }

    /// Evaluate one function. `None` when the name is unknown or the value is absent.
    pub fn evaluate(&self, name: &str, el: &ExtractedElement) -> Option<ContextValue> {
        self.fns.get(name).and_then(|f| f(el))
    }

    /// Evaluate every function, leaving out absent values.
    pub fn evaluate_all(&self, el: &ExtractedElement) -> BTreeMap<String, ContextValue> {
        self.fns
            .iter()
            .filter_map(|(name, f)| f(el).map(|v| (name.clone(), v)))
            .collect()
    }
}

impl std::fmt::Debug for ContextGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.fns.keys()).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/context/group.rs"]
mod tests;
