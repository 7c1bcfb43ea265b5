//! Names of the built-in context functions in [`crate::ContextGroup::standard`].

/// Absolute start as rational time.
pub const ABSOLUTE_START: &str = "absolute-start";
/// Absolute end as rational time.
pub const ABSOLUTE_END: &str = "absolute-end";
/// Absolute start as timecode at the main timeline rate.
pub const ABSOLUTE_START_TIMECODE: &str = "absolute-start-timecode";
/// Occlusion against the nearest timed container.
pub const OCCLUSION: &str = "occlusion";
/// Occlusion against the main timeline.
pub const EFFECTIVE_OCCLUSION: &str = "effective-occlusion";
/// Frame rate governing the element.
pub const LOCAL_FRAME_RATE: &str = "local-frame-rate";
/// Assigned, inherited and default roles.
pub const ROLES: &str = "roles";
/// Keywords covering the element.
pub const KEYWORDS: &str = "keywords";
/// Merged metadata entries.
pub const METADATA: &str = "metadata";
/// The element's `name`.
pub const NAME: &str = "name";
/// Name of the enclosing event.
pub const ANCESTOR_EVENT_NAME: &str = "ancestor-event-name";
/// Name of the enclosing project.
pub const ANCESTOR_PROJECT_NAME: &str = "ancestor-project-name";
