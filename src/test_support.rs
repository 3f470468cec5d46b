use crate::config::{BuildEnv, ConfigDocument, GoogleCloudBuild};
use crate::error::{BuildEnvError, Result};
use crate::graph::ConfigGraph;
use crate::persist::DocumentStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Parse `yaml` as the document stored at `source`.
pub(crate) fn doc(source: &str, yaml: &str) -> ConfigDocument {
    let mut document = ConfigDocument::from_yaml(yaml)
        .unwrap_or_else(|e| panic!("fixture {} does not parse: {}", source, e));
    document.source = PathBuf::from(source);
    document
}

/// Graph over in-memory documents; the first one is the root.
pub(crate) fn graph(documents: &[(&str, &str)]) -> ConfigGraph {
    let documents = documents
        .iter()
        .map(|(source, yaml)| doc(source, yaml))
        .collect();
    ConfigGraph::from_documents(documents).unwrap()
}

/// Write `yaml` to `relative` under `dir`, creating parent directories.
pub(crate) fn write_doc(dir: &Path, relative: &str, yaml: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, yaml).unwrap();
    path
}

/// Temp workspace where `skaffold.yaml` requires `lib/skaffold.yaml`.
pub(crate) fn create_two_document_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_doc(
        dir.path(),
        "skaffold.yaml",
        "modules:\n  - name: app\n  - name: web\nrequires:\n  - path: lib/skaffold.yaml\n",
    );
    write_doc(dir.path(), "lib/skaffold.yaml", "modules:\n  - name: lib\n");
    dir
}

pub(crate) fn gcb(project_id: &str) -> BuildEnv {
    BuildEnv::GoogleCloudBuild(GoogleCloudBuild {
        project_id: Some(project_id.to_string()),
        ..Default::default()
    })
}

pub(crate) fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Store that keeps saved documents in memory and can fail on demand.
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub saved: Vec<ConfigDocument>,
    /// Fail the save call with this zero-based index.
    pub fail_at: Option<usize>,
    calls: usize,
}

impl MemoryStore {
    pub(crate) fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Default::default()
        }
    }
}

impl DocumentStore for MemoryStore {
    fn save(&mut self, document: &ConfigDocument) -> Result<()> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_at == Some(call) {
            return Err(BuildEnvError::UserError("disk full".to_string()));
        }
        self.saved.push(document.clone());
        Ok(())
    }
}
