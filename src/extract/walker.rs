use rayon::prelude::*;

use crate::document::breadcrumbs::Breadcrumbs;
use crate::document::kind::ElementKind;
use crate::document::snapshot::Snapshot;
use crate::document::tree::NodeId;
use crate::extract::children::resolve_children;
use crate::extract::element::ExtractedElement;
use crate::extract::scope::ExtractionScope;
use crate::foundation::error::{ResolveError, ResolveResult};
use crate::timeline::occlusion::effective_occlusion;

/// Entry point for scope-driven extraction over one snapshot.
#[derive(Clone, Debug)]
pub struct Extractor {
    snapshot: Snapshot,
}

impl Extractor {
    /// Extractor over `snapshot`.
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// The snapshot extracted from.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Lazily walk the descendants of `root`, reached through `crumbs`.
    ///
    /// `root` itself is not part of the output. Elements come out in depth-first pre-order
    /// following the resolved children of each node.
    #[tracing::instrument(skip(self, crumbs, scope), fields(root = root.index(), depth = crumbs.len()))]
    pub fn extract(
        &self,
        root: NodeId,
        crumbs: &Breadcrumbs,
        scope: &ExtractionScope,
    ) -> Extraction {
        let root = ExtractedElement::new(self.snapshot.clone(), root, crumbs.clone());
        let mut walk = Extraction {
            snapshot: self.snapshot.clone(),
            scope: scope.clone(),
            stack: Vec::with_capacity(64),
        };
        walk.push_children(&root, root.container_depth());
        walk
    }

    /// [`Extractor::extract`] from `root` with its document ancestry, keeping only `kinds`.
    pub fn extract_kinds<'a>(
        &self,
        root: NodeId,
        kinds: &'a [ElementKind],
        scope: &ExtractionScope,
    ) -> impl Iterator<Item = ExtractedElement> + 'a {
        let crumbs = Breadcrumbs::from_document(self.snapshot.doc(), root);
        self.extract(root, &crumbs, scope)
            .filter(move |el| kinds.contains(&el.kind()))
    }

    /// Run one extraction per scope in parallel on the global thread pool.
    ///
    /// Results are returned in the order of `scopes`.
    #[tracing::instrument(skip(self, scopes), fields(root = root.index(), scopes = scopes.len()))]
    pub fn extract_all(
        &self,
        root: NodeId,
        scopes: &[ExtractionScope],
    ) -> Vec<Vec<ExtractedElement>> {
        let crumbs = Breadcrumbs::from_document(self.snapshot.doc(), root);
        scopes
            .par_iter()
            .map(|scope| self.extract(root, &crumbs, scope).collect())
            .collect()
    }

    /// [`Extractor::extract_all`] on a dedicated pool of `threads` workers.
    pub fn extract_all_with_threads(
        &self,
        root: NodeId,
        scopes: &[ExtractionScope],
        threads: Option<usize>,
    ) -> ResolveResult<Vec<Vec<ExtractedElement>>> {
        let pool = build_thread_pool(threads)?;
        Ok(pool.install(|| self.extract_all(root, scopes)))
    }
}

fn build_thread_pool(threads: Option<usize>) -> ResolveResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ResolveError::validation(
            "extract_all 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

struct Frame {
    node: NodeId,
    crumbs: Breadcrumbs,
    // Nested timelines above this node.
    depth: usize,
}

/// Lazy depth-first walk produced by [`Extractor::extract`].
///
/// Nothing is evaluated until the iterator is advanced; dropping it abandons the walk.
pub struct Extraction {
    snapshot: Snapshot,
    scope: ExtractionScope,
    stack: Vec<Frame>,
}

impl Extraction {
    fn push_children(&mut self, el: &ExtractedElement, depth: usize) {
        let children = resolve_children(&self.snapshot, el.node(), &self.scope);
        let crumbs = el.breadcrumbs().push(el.node());
        for &c in children.iter().rev() {
            self.stack.push(Frame {
                node: c,
                crumbs: crumbs.clone(),
                depth,
            });
        }
    }

    fn traverses(&self, el: &ExtractedElement, depth: usize) -> bool {
        let scope = &self.scope;
        let kind = el.kind();

        if scope.excluded_traversal_kinds.contains(&kind) {
            return false;
        }
        if !scope.include_disabled && el.is_disabled() {
            return false;
        }
        if scope.occlusions.len() < 3
            && let Some(o) = effective_occlusion(&self.snapshot, el.node(), el.breadcrumbs())
            && !scope.occlusions.contains(&o)
        {
            tracing::trace!(tag = el.tag(), occlusion = ?o, "occluded");
            return false;
        }
        if scope.max_container_depth.is_some_and(|max| depth > max) {
            return false;
        }
        scope.traversal_predicate.as_ref().is_none_or(|f| f(el))
    }

    fn extracts(&self, el: &ExtractedElement) -> bool {
        !self.scope.excluded_extraction_kinds.contains(&el.kind())
            && self.scope.extraction_predicate.as_ref().is_none_or(|f| f(el))
    }
}

impl Iterator for Extraction {
    type Item = ExtractedElement;

    fn next(&mut self) -> Option<ExtractedElement> {
        while let Some(frame) = self.stack.pop() {
            let el = ExtractedElement::new(self.snapshot.clone(), frame.node, frame.crumbs);
            let depth = frame.depth + usize::from(el.kind().is_timeline());
            if !self.traverses(&el, depth) {
                continue;
            }
            self.push_children(&el, depth);
            if self.extracts(&el) {
                return Some(el);
            }
        }
        None
    }
}

impl std::fmt::Debug for Extraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extraction")
            .field("scope", &self.scope)
            .field("pending", &self.stack.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/extract/walker.rs"]
mod tests;
