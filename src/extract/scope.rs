use std::collections::BTreeSet;
use std::sync::Arc;

use crate::document::kind::ElementKind;
use crate::extract::element::ExtractedElement;
use crate::foundation::error::{ResolveError, ResolveResult};
use crate::timeline::occlusion::Occlusion;

/// Caller-supplied filter evaluated after every structural rule.
pub type ElementPredicate = Arc<dyn Fn(&ExtractedElement) -> bool + Send + Sync>;

/// Which takes of an `audition` are visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditionMask {
    /// Only the first (active) take.
    #[default]
    Active,
    /// Every take in declared order.
    All,
}

/// Which angles of a multicam clip are visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum McAngleMask {
    /// The angles selected for video and audio by the clip's `mc-source` list.
    #[default]
    Active,
    /// Every angle of the multicam resource.
    All,
}

/// Immutable configuration of one extraction.
///
/// Traversal filters stop descent into a subtree; extraction filters only omit a node from the
/// output. A kind excluded from traversal is never visited even if it is also listed for
/// extraction.
#[derive(Clone)]
pub struct ExtractionScope {
    /// Audition take selection.
    pub auditions: AuditionMask,
    /// Multicam angle selection.
    pub mc_angles: McAngleMask,
    /// Visit elements with `enabled="0"`.
    pub include_disabled: bool,
    /// Effective occlusion classes to keep. Elements whose occlusion cannot be resolved are kept.
    pub occlusions: BTreeSet<Occlusion>,
    /// Maximum number of nested timelines (sequences and multicam angles) on a visited chain.
    pub max_container_depth: Option<usize>,
    /// Kinds whose subtree is never visited.
    pub excluded_traversal_kinds: BTreeSet<ElementKind>,
    /// Kinds visited but left out of the result.
    pub excluded_extraction_kinds: BTreeSet<ElementKind>,
    /// Last traversal filter.
    pub traversal_predicate: Option<ElementPredicate>,
    /// Last extraction filter.
    pub extraction_predicate: Option<ElementPredicate>,
}

impl ExtractionScope {
    /// Elements visible on the main timeline: active takes and angles, enabled elements that are
    /// at least partly on screen, without descending into nested timelines.
    pub fn main_timeline() -> Self {
        Self {
            auditions: AuditionMask::Active,
            mc_angles: McAngleMask::Active,
            include_disabled: false,
            occlusions: [Occlusion::NotOccluded, Occlusion::PartiallyOccluded].into(),
            max_container_depth: Some(1),
            excluded_traversal_kinds: [ElementKind::Resources, ElementKind::Metadata].into(),
            excluded_extraction_kinds: BTreeSet::new(),
            traversal_predicate: None,
            extraction_predicate: None,
        }
    }

    /// Everything reachable from the root, including hidden takes, angles and nested timelines.
    ///
    /// The resource table is still only entered through clip references.
    pub fn deep() -> Self {
        Self {
            auditions: AuditionMask::All,
            mc_angles: McAngleMask::All,
            include_disabled: true,
            occlusions: [
                Occlusion::NotOccluded,
                Occlusion::PartiallyOccluded,
                Occlusion::FullyOccluded,
            ]
            .into(),
            max_container_depth: None,
            excluded_traversal_kinds: [ElementKind::Resources].into(),
            excluded_extraction_kinds: BTreeSet::new(),
            traversal_predicate: None,
            extraction_predicate: None,
        }
    }

    /// Replace the traversal predicate.
    #[must_use]
    pub fn with_traversal_predicate(
        mut self,
        f: impl Fn(&ExtractedElement) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.traversal_predicate = Some(Arc::new(f));
        self
    }

    /// Replace the extraction predicate.
    #[must_use]
    pub fn with_extraction_predicate(
        mut self,
        f: impl Fn(&ExtractedElement) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.extraction_predicate = Some(Arc::new(f));
        self
    }

    /// Add kinds whose subtrees are skipped.
    #[must_use]
    pub fn excluding_traversal(mut self, kinds: impl IntoIterator<Item = ElementKind>) -> Self {
        self.excluded_traversal_kinds.extend(kinds);
        self
    }

    /// Add kinds left out of the result.
    #[must_use]
    pub fn excluding_extraction(mut self, kinds: impl IntoIterator<Item = ElementKind>) -> Self {
        self.excluded_extraction_kinds.extend(kinds);
        self
    }
}

impl Default for ExtractionScope {
    fn default() -> Self {
        Self::main_timeline()
    }
}

impl std::fmt::Debug for ExtractionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionScope")
            .field("auditions", &self.auditions)
            .field("mc_angles", &self.mc_angles)
            .field("include_disabled", &self.include_disabled)
            .field("occlusions", &self.occlusions)
            .field("max_container_depth", &self.max_container_depth)
            .field("excluded_traversal_kinds", &self.excluded_traversal_kinds)
            .field("excluded_extraction_kinds", &self.excluded_extraction_kinds)
            .field("traversal_predicate", &self.traversal_predicate.is_some())
            .field("extraction_predicate", &self.extraction_predicate.is_some())
            .finish()
    }
}

/// Named base scope for [`ScopeDef`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopePreset {
    /// [`ExtractionScope::main_timeline`].
    #[default]
    MainTimeline,
    /// [`ExtractionScope::deep`].
    Deep,
}

/// Serializable extraction scope: a preset plus optional overrides.
///
/// Kinds are named by their document tag (`"asset-clip"`). Exclusion lists are added to the
/// preset's own. `max_container_depth: null` lifts the depth limit.
///
/// ```
/// use fcpxml_resolve::ScopeDef;
///
/// let scope = ScopeDef::from_json_str(
///     r#"{ "preset": "main_timeline", "auditions": "all", "exclude_extraction": ["marker"] }"#,
/// )?
/// .into_scope()?;
/// assert_eq!(scope.max_container_depth, Some(1));
/// # Ok::<(), fcpxml_resolve::ResolveError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScopeDef {
    /// Base scope.
    pub preset: ScopePreset,
    /// Audition take selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auditions: Option<AuditionMask>,
    /// Multicam angle selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mc_angles: Option<McAngleMask>,
    /// Visit disabled elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_disabled: Option<bool>,
    /// Occlusion classes to keep, replacing the preset's.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occlusions: Option<Vec<Occlusion>>,
    /// Depth override; an explicit `null` means unlimited.
    #[serde(
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_container_depth: Option<Option<usize>>,
    /// Additional traversal exclusions.
    pub exclude_traversal: Vec<String>,
    /// Additional extraction exclusions.
    pub exclude_extraction: Vec<String>,
}

fn explicit_null<'de, D>(d: D) -> Result<Option<Option<usize>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    <Option<usize> as serde::Deserialize>::deserialize(d).map(Some)
}

fn parse_kinds(tags: &[String]) -> ResolveResult<Vec<ElementKind>> {
    tags.iter().map(|t| t.parse::<ElementKind>()).collect()
}

impl ScopeDef {
    /// Parse a scope from JSON.
    pub fn from_json_str(s: &str) -> ResolveResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Build the runtime scope. Unknown kind tags are rejected.
    pub fn into_scope(self) -> ResolveResult<ExtractionScope> {
        let mut scope = match self.preset {
            ScopePreset::MainTimeline => ExtractionScope::main_timeline(),
            ScopePreset::Deep => ExtractionScope::deep(),
        };
        if let Some(v) = self.auditions {
            scope.auditions = v;
        }
        if let Some(v) = self.mc_angles {
            scope.mc_angles = v;
        }
        if let Some(v) = self.include_disabled {
            scope.include_disabled = v;
        }
        if let Some(v) = self.occlusions {
            if v.is_empty() {
                return Err(ResolveError::validation(
                    "scope keeps no occlusion class; nothing would be visited",
                ));
            }
            scope.occlusions = v.into_iter().collect();
        }
        if let Some(v) = self.max_container_depth {
            scope.max_container_depth = v;
        }
        Ok(scope
            .excluding_traversal(parse_kinds(&self.exclude_traversal)?)
            .excluding_extraction(parse_kinds(&self.exclude_extraction)?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/extract/scope.rs"]
mod tests;
