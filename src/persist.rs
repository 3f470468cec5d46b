//! Committing a validated plan to storage.
//!
//! The store is the only place with side effects. Documents are written one
//! after another in plan order; a failure stops the commit and is reported as
//! `PersistenceFailure` with the number of documents already written. Already
//! written documents are not rolled back.

use crate::buildenv::CommitPlan;
use crate::config::ConfigDocument;
use crate::error::{BuildEnvError, Result};
use crate::graph::ConfigGraph;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Durable storage for configuration documents.
pub trait DocumentStore {
    /// Replace the stored copy of `document` (keyed by its `source`).
    fn save(&mut self, document: &ConfigDocument) -> Result<()>;
}

/// Writes documents back to the YAML files they were loaded from.
///
/// Each file is replaced atomically: the new content goes to a temporary file
/// in the same directory, is synced, then renamed over the original.
#[derive(Debug, Default)]
pub struct FileStore;

impl DocumentStore for FileStore {
    fn save(&mut self, document: &ConfigDocument) -> Result<()> {
        let content = document.to_yaml()?;
        write_atomic(&document.source, content.as_bytes())
    }
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let io_err = |action: &str, e: std::io::Error| {
        BuildEnvError::UserError(format!("failed to {} '{}': {}", action, path.display(), e))
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| io_err("stage", e))?;
    temp.write_all(content).map_err(|e| io_err("write", e))?;
    // The temp file is created 0600; keep the mode of the file being replaced.
    if let Ok(metadata) = std::fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| io_err("set permissions on", e))?;
    }
    temp.as_file().sync_all().map_err(|e| io_err("sync", e))?;
    temp.persist(path).map_err(|e| io_err("replace", e.error))?;
    Ok(())
}

/// Apply `plan` to copies of the graph's documents and save each one.
///
/// Returns the number of documents written.
pub fn commit<S: DocumentStore + ?Sized>(
    graph: &ConfigGraph,
    plan: &CommitPlan,
    store: &mut S,
) -> Result<usize> {
    let documents = plan.apply(graph)?;
    let total = documents.len();

    for (written, document) in documents.iter().enumerate() {
        debug!(document = %document.source.display(), "writing document");
        store
            .save(document)
            .map_err(|e| BuildEnvError::PersistenceFailure {
                document: document.source.clone(),
                written,
                total,
                reason: e.to_string(),
            })?;
    }

    info!(documents = total, "committed build environment changes");
    Ok(total)
}
