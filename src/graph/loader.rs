//! Building a [`ConfigGraph`] from files or from parsed documents.

use super::{ConfigGraph, DocId, ImportEdge};
use crate::config::{ConfigDocument, document_key};
use crate::error::{BuildEnvError, Result};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use tracing::debug;

impl ConfigGraph {
    /// Load `root` and every document it transitively requires.
    ///
    /// Each file is read once; a file reached again through another path or a
    /// cycle reuses the existing arena slot.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = document_key(root)?;
        Self::build(root, |path| {
            debug!(path = %path.display(), "loading config document");
            ConfigDocument::load(path)
        })
    }

    /// Build a graph from documents that are already parsed.
    ///
    /// The first document is the root. Import paths are resolved against each
    /// document's `source` and must name another document in `documents`.
    /// Documents not reachable from the root are dropped.
    #[cfg(test)]
    pub fn from_documents(documents: Vec<ConfigDocument>) -> Result<Self> {
        let mut by_key = HashMap::new();
        let mut root = None;
        for mut document in documents {
            let key = document_key(&document.source)?;
            document.source = key.clone();
            root.get_or_insert_with(|| key.clone());
            by_key.insert(key, document);
        }

        let root = root.ok_or_else(|| {
            BuildEnvError::UserError("a config graph needs at least one document".to_string())
        })?;

        Self::build(root, |path| {
            by_key.remove(path).ok_or_else(|| {
                BuildEnvError::UserError(format!(
                    "config document '{}' is not available",
                    path.display()
                ))
            })
        })
    }

    /// Breadth-first discovery of documents reachable from `root`.
    ///
    /// `fetch` is called once per distinct document key. Arena order is
    /// discovery order; traversal order is computed separately by `walk`.
    fn build<F>(root: PathBuf, mut fetch: F) -> Result<Self>
    where
        F: FnMut(&Path) -> Result<ConfigDocument>,
    {
        let mut documents = Vec::new();
        let mut imports = Vec::new();
        let mut index: HashMap<PathBuf, DocId> = HashMap::new();
        let mut pending = VecDeque::new();

        let root_doc = fetch(&root)?;
        index.insert(root.clone(), DocId(0));
        documents.push(root_doc);
        imports.push(Vec::new());
        pending.push_back(DocId(0));

        while let Some(id) = pending.pop_front() {
            let mut edges = Vec::new();
            let base = documents[id.0].base_dir().to_path_buf();
            let requires = documents[id.0].requires.clone();

            for dependency in requires {
                let key = document_key(base.join(&dependency.path))?;
                let target = match index.get(&key) {
                    Some(&existing) => existing,
                    None => {
                        let document = fetch(&key).map_err(|e| match e {
                            BuildEnvError::UserError(msg) => BuildEnvError::UserError(format!(
                                "failed to load '{}' required by {}: {}",
                                dependency.path,
                                documents[id.0].source.display(),
                                msg
                            )),
                            other => other,
                        })?;
                        let new_id = DocId(documents.len());
                        index.insert(key, new_id);
                        documents.push(document);
                        imports.push(Vec::new());
                        pending.push_back(new_id);
                        new_id
                    }
                };
                edges.push(ImportEdge {
                    target,
                    active_profiles: dependency.active_profiles.clone(),
                });
            }
            imports[id.0] = edges;
        }

        debug!(documents = documents.len(), "config graph loaded");
        Ok(Self { documents, imports })
    }
}
