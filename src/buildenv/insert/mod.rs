//! Adding a new build environment definition.
//!
//! Insertion is split into a pure validation pass that returns a
//! [`CommitPlan`] and a commit step (see [`crate::persist::commit`]) that
//! writes it. Every check runs against every affected document before any
//! change is staged for writing, so a failing insert leaves all documents
//! untouched.
//!
//! # Modes
//!
//! - Default pipeline (no profile): targets the root document only. Each
//!   selected module must not already define a build environment.
//! - Profile: creates the named profile in the root document and every
//!   document it transitively imports. No visited document may already
//!   declare a profile with that name.

mod plan;


pub use plan::{CommitPlan, StagedChange};

use super::filter::{matching_modules, resolve_modules};
use crate::cancel::CancelToken;
use crate::config::{BuildEnv, Pipeline, Profile};
use crate::error::{BuildEnvError, Result};
use crate::graph::ConfigGraph;
use tracing::{debug, info};

/// What to insert and where.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertRequest {
    /// Module filter; empty selects every module.
    pub modules: Vec<String>,
    /// Target profile. `None` selects the default pipeline.
    pub profile: Option<String>,
    pub build_env: BuildEnv,
}

/// Validate `request` against `graph` and return the changes to commit.
///
/// Fails with the first `ValidationError`, `NotFound`, `AlreadyExists` or
/// `Cancelled` encountered; nothing is staged in that case.
pub fn plan_insert(
    graph: &ConfigGraph,
    request: &InsertRequest,
    cancel: &CancelToken,
) -> Result<CommitPlan> {
    validate_build_env(&request.build_env)?;

    let plan = match &request.profile {
        None => plan_default_pipeline(graph, request, cancel)?,
        Some(name) => {
            if name.trim().is_empty() {
                return Err(BuildEnvError::ValidationError(
                    "profile name must not be blank".to_string(),
                ));
            }
            plan_profile(graph, name, request, cancel)?
        }
    };

    info!(
        kind = %request.build_env.kind(),
        changes = plan.changes().len(),
        documents = plan.documents().len(),
        "insert validated"
    );
    Ok(plan)
}

fn plan_default_pipeline(
    graph: &ConfigGraph,
    request: &InsertRequest,
    cancel: &CancelToken,
) -> Result<CommitPlan> {
    cancel.check()?;
    let root = graph.root();
    let document = graph.document(root);
    let modules = resolve_modules(document, &request.modules)?;

    for module in &modules {
        if let Some(existing) = module.build.build_env() {
            return Err(BuildEnvError::AlreadyExists {
                what: format!(
                    "{} build environment for module '{}'",
                    existing.kind(),
                    module.name
                ),
                document: document.source.clone(),
            });
        }
    }

    let mut plan = CommitPlan::default();
    for module in modules {
        plan.stage(
            root,
            StagedChange::SetBuildEnv {
                module: module.name.clone(),
                build_env: request.build_env.clone(),
            },
        );
    }
    Ok(plan)
}

fn plan_profile(
    graph: &ConfigGraph,
    name: &str,
    request: &InsertRequest,
    cancel: &CancelToken,
) -> Result<CommitPlan> {
    // Only the originating document must declare every requested module.
    resolve_modules(graph.document(graph.root()), &request.modules)?;

    let mut plan = CommitPlan::default();
    for visit in graph.walk(&[], cancel)? {
        cancel.check()?;
        let document = graph.document(visit.document);

        if document.profile(name).is_some() {
            return Err(BuildEnvError::AlreadyExists {
                what: format!("profile '{}'", name),
                document: document.source.clone(),
            });
        }

        let scope = if request.modules.is_empty() {
            None
        } else {
            Some(
                matching_modules(document, &request.modules)
                    .into_iter()
                    .map(|m| m.name.clone())
                    .collect(),
            )
        };
        debug!(
            document = %document.source.display(),
            profile = name,
            "staging profile"
        );

        plan.stage(
            visit.document,
            StagedChange::CreateProfile(Profile {
                name: name.to_string(),
                modules: scope,
                build: Pipeline::with_build_env(request.build_env.clone()),
                extra: Default::default(),
            }),
        );
    }
    Ok(plan)
}

/// Sign checks on the numeric fields of a new definition.
fn validate_build_env(env: &BuildEnv) -> Result<()> {
    let (disk_size_gb, concurrency) = match env {
        BuildEnv::GoogleCloudBuild(gcb) => (gcb.disk_size_gb, gcb.concurrency),
        BuildEnv::Cluster(cluster) => (None, cluster.concurrency),
        BuildEnv::Local(local) => (None, local.concurrency),
    };

    if let Some(size) = disk_size_gb
        && size < 0
    {
        return Err(BuildEnvError::ValidationError(format!(
            "diskSizeGb must not be negative (got {})",
            size
        )));
    }
    if let Some(limit) = concurrency
        && limit < 0
    {
        return Err(BuildEnvError::ValidationError(format!(
            "concurrency must be -1 (unset), 0 (no limit) or positive (got {})",
            limit
        )));
    }
    Ok(())
}
