//! fcpxml-resolve places the elements of a Final Cut Pro XML timeline in absolute time and walks
//! them under configurable extraction scopes.
//!
//! The crate works on an already parsed, read-only element tree ([`Document`]) and the resource
//! table built from it ([`Resources`]), frozen together in a [`Snapshot`].
//!
//! # Pipeline overview
//!
//! 1. **Load**: `ElementDef` JSON or the [`element`] builder `-> Document -> Snapshot`
//! 2. **Extract**: `Snapshot + ExtractionScope -> Extraction` (a lazy depth-first walk that resolves
//!    auditions, multicam angles and compound clips on the way down)
//! 3. **Derive**: `ExtractedElement -> absolute time, timecode, occlusion, roles, keywords, metadata`,
//!    directly or through named functions in a [`ContextGroup`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Exact time**: every time value is a reduced [`Rational`]; nothing is rounded until a value
//!   is expressed as [`Timecode`].
//! - **Absent, not failed**: a value that cannot be resolved for one element (no format, no
//!   duration, malformed attribute) is `None` and never stops a traversal.
//! - **Immutable inputs**: snapshots, scopes and handles are `Send + Sync`, so independent
//!   extractions can run in parallel.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod context;
mod document;
mod extract;
mod foundation;
mod time;
mod timeline;

pub use context::accessors::FrameRateSource;
pub use context::group::{ContextFn, ContextGroup, ContextValue};
pub use context::keys;
pub use context::keywords::keywords;
pub use context::metadata::metadata;
pub use context::roles::{InterpolatedRole, Role, RoleKind, inherited_roles};
pub use document::breadcrumbs::Breadcrumbs;
pub use document::def::ElementDef;
pub use document::dsl::{ElementBuilder, element};
pub use document::kind::ElementKind;
pub use document::resources::Resources;
pub use document::snapshot::Snapshot;
pub use document::tree::{Document, NodeId, NodeRef};
pub use extract::element::ExtractedElement;
pub use extract::scope::{
    AuditionMask, ElementPredicate, ExtractionScope, McAngleMask, ScopeDef, ScopePreset,
};
pub use extract::walker::{Extraction, Extractor};
pub use foundation::core::{Rational, TimeRange};
pub use foundation::error::{ResolveError, ResolveResult};
pub use time::rate::{FrameRate, RateGroup, conform_scaling_factor};
pub use time::resolve::{
    VideoFormat, conform_factor, local_start, main_timeline_frame_rate, parse_tc_format,
    resolve_frame_rate, time_attr, try_time_attr,
};
pub use time::timecode::Timecode;
pub use timeline::absolute::{absolute_end, absolute_range, absolute_start};
pub use timeline::occlusion::{Occlusion, classify, effective_occlusion, occlusion};

#[cfg(test)]
#[path = "../tests/unit/fixtures.rs"]
mod fixtures;
