//! Derived values for extracted elements.
//!
//! Everything here is computed on demand from an [`crate::ExtractedElement`] handle: the handle
//! carries the chain it was reached through, so no value requires walking the document again.

pub(crate) mod accessors;
pub(crate) mod group;
pub mod keys;
pub(crate) mod keywords;
pub(crate) mod metadata;
pub(crate) mod roles;
