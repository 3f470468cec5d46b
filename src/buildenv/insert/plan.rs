//! Staged document changes produced by the validation pass.

use crate::config::{BuildEnv, ConfigDocument, Profile};
use crate::error::{BuildEnvError, Result};
use crate::graph::{ConfigGraph, DocId};

/// A single change to one document.
#[derive(Debug, Clone, PartialEq)]
pub enum StagedChange {
    /// Set the default-pipeline build environment of a module.
    SetBuildEnv { module: String, build_env: BuildEnv },
    /// Append a new profile.
    CreateProfile(Profile),
}

/// A staged change together with the document it applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedChange {
    pub document: DocId,
    pub change: StagedChange,
}

/// Every change one insert will make, across all documents.
///
/// Built only after every document passed validation, so committing a plan
/// cannot fail on a duplicate or a missing module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitPlan {
    changes: Vec<PlannedChange>,
}

impl CommitPlan {
    pub(super) fn stage(&mut self, document: DocId, change: StagedChange) {
        self.changes.push(PlannedChange { document, change });
    }

    pub fn changes(&self) -> &[PlannedChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Touched documents, in the order they were first staged.
    pub fn documents(&self) -> Vec<DocId> {
        let mut ids: Vec<DocId> = Vec::new();
        for planned in &self.changes {
            if !ids.contains(&planned.document) {
                ids.push(planned.document);
            }
        }
        ids
    }

    /// Mutated copies of every touched document, in [`CommitPlan::documents`] order.
    ///
    /// `graph` itself is not modified.
    pub fn apply(&self, graph: &ConfigGraph) -> Result<Vec<ConfigDocument>> {
        let mut updated = Vec::new();
        for id in self.documents() {
            let mut document = graph.document(id).clone();
            for planned in self.changes.iter().filter(|c| c.document == id) {
                apply_change(&mut document, &planned.change)?;
            }
            updated.push(document);
        }
        Ok(updated)
    }
}

fn apply_change(document: &mut ConfigDocument, change: &StagedChange) -> Result<()> {
    match change {
        StagedChange::SetBuildEnv { module, build_env } => {
            let source = document.source.clone();
            let target = document
                .module_mut(module)
                .ok_or_else(|| BuildEnvError::NotFound {
                    module: module.clone(),
                    document: source,
                })?;
            target.build.set_build_env(build_env.clone());
        }
        StagedChange::CreateProfile(profile) => {
            if document.profile(&profile.name).is_some() {
                return Err(BuildEnvError::AlreadyExists {
                    what: format!("profile '{}'", profile.name),
                    document: document.source.clone(),
                });
            }
            document.profiles.push(profile.clone());
        }
    }
    Ok(())
}
