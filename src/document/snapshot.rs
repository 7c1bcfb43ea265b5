use std::sync::Arc;

use crate::document::resources::Resources;
use crate::document::tree::Document;
use crate::foundation::error::ResolveResult;

/// Immutable document plus its resource table, shared by every traversal and result handle.
///
/// Cloning is cheap; clones share the same tree.
#[derive(Clone, Debug)]
pub struct Snapshot {
    doc: Arc<Document>,
    resources: Arc<Resources>,
}

impl Snapshot {
    /// Index the resource table of `doc` and freeze both.
    pub fn new(doc: Document) -> ResolveResult<Self> {
        let resources = Resources::from_document(&doc)?;
        Ok(Self::from_parts(doc, resources))
    }

    /// Pair a document with a separately built resource table.
    pub fn from_parts(doc: Document, resources: Resources) -> Self {
        Self {
            doc: Arc::new(doc),
            resources: Arc::new(resources),
        }
    }

    /// Decode a JSON element tree and index it.
    pub fn from_json_str(s: &str) -> ResolveResult<Self> {
        Self::new(Document::from_json_str(s)?)
    }

    /// The document tree.
    pub fn doc(&self) -> &Document {
        &self.doc
    }

    /// The resource table.
    pub fn resources(&self) -> &Resources {
        &self.resources
    }
}
