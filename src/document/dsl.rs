use crate::document::def::ElementDef;
use crate::document::tree::Document;
use crate::foundation::error::ResolveResult;

/// Fluent builder for [`ElementDef`] trees.
///
/// ```
/// use fcpxml_resolve::element;
///
/// let doc = element("fcpxml")
///     .child(element("sequence").attr("tcStart", "3600s"))
///     .into_document()
///     .unwrap();
/// assert_eq!(doc.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    def: ElementDef,
}

/// Start building an element with the given tag.
pub fn element(tag: impl Into<String>) -> ElementBuilder {
    ElementBuilder {
        def: ElementDef {
            tag: tag.into(),
            ..ElementDef::default()
        },
    }
}

impl ElementBuilder {
    /// Set an attribute, replacing an earlier value with the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.def.attrs.insert(name.into(), value.into());
        self
    }

    /// Append one child.
    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.def.children.push(child.def);
        self
    }

    /// Append several children in order.
    pub fn children(mut self, children: impl IntoIterator<Item = ElementBuilder>) -> Self {
        self.def
            .children
            .extend(children.into_iter().map(|c| c.def));
        self
    }

    /// Finish as a boundary definition.
    pub fn build(self) -> ElementDef {
        self.def
    }

    /// Finish and normalize into a [`Document`].
    pub fn into_document(self) -> ResolveResult<Document> {
        Document::from_def(&self.def)
    }
}
