/// Closed set of FCPXML element types the engine distinguishes.
///
/// Tags without engine-specific behavior (filters, params, adjustments, text styles, ...) map to
/// [`ElementKind::Other`]; the original tag is still available from the document node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    /// `fcpxml` document root.
    Root,
    /// `resources` table container.
    Resources,
    /// `format` resource.
    Format,
    /// `asset` resource.
    Asset,
    /// `media-rep` child of an asset.
    MediaRep,
    /// `media` resource (compound clip or multicam source).
    Media,
    /// `effect` resource.
    Effect,
    /// `locator` resource.
    Locator,
    /// `object-tracker` resource.
    ObjectTracker,
    /// `multicam` timeline inside a media resource.
    Multicam,
    /// `mc-angle` angle timeline inside a multicam.
    McAngle,
    /// `library`.
    Library,
    /// `event`.
    Event,
    /// `project`.
    Project,
    /// `sequence` timeline.
    Sequence,
    /// `spine` storyline.
    Spine,
    /// `asset-clip`.
    AssetClip,
    /// `clip`.
    Clip,
    /// `ref-clip` (compound clip instance).
    RefClip,
    /// `mc-clip` (multicam clip instance).
    McClip,
    /// `sync-clip`.
    SyncClip,
    /// `audition` alternative-take container.
    Audition,
    /// `gap`.
    Gap,
    /// `title`.
    Title,
    /// `audio`.
    Audio,
    /// `video`.
    Video,
    /// `transition`.
    Transition,
    /// `caption`.
    Caption,
    /// `marker` (standard and to-do markers).
    Marker,
    /// `chapter-marker`.
    ChapterMarker,
    /// `keyword` range annotation.
    Keyword,
    /// `rating` range annotation.
    Rating,
    /// `mc-source` angle selection of an `mc-clip`.
    McSource,
    /// `conform-rate` declaration of a clip.
    ConformRate,
    /// `metadata` container.
    Metadata,
    /// `md` metadata item.
    MetadataItem,
    /// Any other tag.
    Other,
}

const TAGS: &[(&str, ElementKind)] = &[
    ("fcpxml", ElementKind::Root),
    ("resources", ElementKind::Resources),
    ("format", ElementKind::Format),
    ("asset", ElementKind::Asset),
    ("media-rep", ElementKind::MediaRep),
    ("media", ElementKind::Media),
    ("effect", ElementKind::Effect),
    ("locator", ElementKind::Locator),
    ("object-tracker", ElementKind::ObjectTracker),
    ("multicam", ElementKind::Multicam),
    ("mc-angle", ElementKind::McAngle),
    ("library", ElementKind::Library),
    ("event", ElementKind::Event),
    ("project", ElementKind::Project),
    ("sequence", ElementKind::Sequence),
    ("spine", ElementKind::Spine),
    ("asset-clip", ElementKind::AssetClip),
    ("clip", ElementKind::Clip),
    ("ref-clip", ElementKind::RefClip),
    ("mc-clip", ElementKind::McClip),
    ("sync-clip", ElementKind::SyncClip),
    ("audition", ElementKind::Audition),
    ("gap", ElementKind::Gap),
    ("title", ElementKind::Title),
    ("audio", ElementKind::Audio),
    ("video", ElementKind::Video),
    ("transition", ElementKind::Transition),
    ("caption", ElementKind::Caption),
    ("marker", ElementKind::Marker),
    ("chapter-marker", ElementKind::ChapterMarker),
    ("keyword", ElementKind::Keyword),
    ("rating", ElementKind::Rating),
    ("mc-source", ElementKind::McSource),
    ("conform-rate", ElementKind::ConformRate),
    ("metadata", ElementKind::Metadata),
    ("md", ElementKind::MetadataItem),
];

impl ElementKind {
    /// Map a document tag to its kind. Unknown tags map to [`ElementKind::Other`].
    pub fn from_tag(tag: &str) -> Self {
        TAGS.iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, k)| *k)
            .unwrap_or(ElementKind::Other)
    }

    /// Canonical document tag, `None` for [`ElementKind::Other`].
    pub fn tag(self) -> Option<&'static str> {
        TAGS.iter().find(|(_, k)| *k == self).map(|(t, _)| *t)
    }

    /// Annotations attach to a clip and position themselves with `start` in the clip's local time.
    pub fn is_annotation(self) -> bool {
        matches!(
            self,
            Self::Marker | Self::ChapterMarker | Self::Keyword | Self::Rating
        )
    }

    /// Story elements placed on a parent timeline with `offset`.
    pub fn is_story_element(self) -> bool {
        matches!(
            self,
            Self::Spine
                | Self::AssetClip
                | Self::Clip
                | Self::RefClip
                | Self::McClip
                | Self::SyncClip
                | Self::Audition
                | Self::Gap
                | Self::Title
                | Self::Audio
                | Self::Video
                | Self::Transition
                | Self::Caption
        )
    }

    /// Timelines counted by the extraction scope's container depth limit.
    pub fn is_timeline(self) -> bool {
        matches!(self, Self::Sequence | Self::McAngle)
    }

    /// Shared entries of the resource table.
    pub fn is_resource(self) -> bool {
        matches!(
            self,
            Self::Format
                | Self::Asset
                | Self::Media
                | Self::Effect
                | Self::Locator
                | Self::ObjectTracker
        )
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag().unwrap_or("other"))
    }
}

impl std::str::FromStr for ElementKind {
    type Err = crate::ResolveError;

    /// Strict variant of [`ElementKind::from_tag`] used by configuration parsing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_tag(s) {
            ElementKind::Other if s != "other" => Err(crate::ResolveError::format(format!(
                "unknown element kind '{s}'"
            ))),
            k => Ok(k),
        }
    }
}
