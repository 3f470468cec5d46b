//! Listing the effective build environment of every module in the graph.

use super::filter::matching_modules;
use super::resolver::resolve;
use crate::cancel::CancelToken;
use crate::config::BuildEnv;
use crate::error::{BuildEnvError, Result};
use crate::graph::ConfigGraph;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

/// Effective build environment of one module.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildEnvEntry {
    pub module: String,
    /// Document that declares the module.
    pub source: PathBuf,
    /// `None` when neither the default pipeline nor an activated profile sets one.
    pub build_env: Option<BuildEnv>,
}

/// List build environments for the modules selected by `modules`.
///
/// Documents are visited in [`ConfigGraph::walk`] order and modules in
/// declaration order. Each document is filtered leniently; a requested name
/// that matches no module anywhere in the graph fails with `NotFound` against
/// the root document.
pub fn list_build_envs(
    graph: &ConfigGraph,
    profiles: &[String],
    modules: &[String],
    cancel: &CancelToken,
) -> Result<Vec<BuildEnvEntry>> {
    let mut entries = Vec::new();
    let mut matched: HashSet<&str> = HashSet::new();

    for visit in graph.walk(profiles, cancel)? {
        let document = graph.document(visit.document);
        for module in matching_modules(document, modules) {
            matched.insert(module.name.as_str());
            entries.push(BuildEnvEntry {
                module: module.name.clone(),
                source: document.source.clone(),
                build_env: resolve(document, module, &visit.profiles),
            });
        }
    }

    if let Some(missing) = modules.iter().find(|m| !matched.contains(m.as_str())) {
        return Err(BuildEnvError::NotFound {
            module: missing.clone(),
            document: graph.document(graph.root()).source.clone(),
        });
    }

    debug!(entries = entries.len(), "listed build environments");
    Ok(entries)
}
