//! The import graph of configuration documents.
//!
//! Documents live in an arena indexed by [`DocId`]; import edges refer to arena
//! slots, so cycles in the `requires` relation are plain back-edges and every
//! document exists exactly once regardless of how many paths reach it.

mod loader;
mod walk;


pub use walk::Visit;

use crate::config::ConfigDocument;

/// Stable index of a document within a [`ConfigGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocId(usize);

/// A resolved import edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    pub target: DocId,
    /// Profiles always activated inside `target` when reached through this edge.
    pub active_profiles: Vec<String>,
}

/// A root document and every document it transitively imports.
#[derive(Debug, Clone)]
pub struct ConfigGraph {
    documents: Vec<ConfigDocument>,
    imports: Vec<Vec<ImportEdge>>,
}

impl ConfigGraph {
    /// The document the graph was loaded from.
    pub fn root(&self) -> DocId {
        DocId(0)
    }

    pub fn document(&self, id: DocId) -> &ConfigDocument {
        &self.documents[id.0]
    }

    /// Outgoing import edges of `id`, in declaration order.
    pub fn imports(&self, id: DocId) -> &[ImportEdge] {
        &self.imports[id.0]
    }

    /// Number of distinct documents in the graph.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// All documents in arena order (root first, then discovery order).
    #[cfg(test)]
    pub fn documents(&self) -> impl Iterator<Item = (DocId, &ConfigDocument)> {
        self.documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (DocId(i), doc))
    }
}
