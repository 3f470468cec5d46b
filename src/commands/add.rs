//! Implementation of `build-env add googleCloudBuild`.

use crate::buildenv::{InsertRequest, plan_insert};
use crate::cancel::CancelToken;
use crate::config::BuildEnv;
use crate::error::Result;
use crate::graph::ConfigGraph;
use crate::options::InspectOptions;
use crate::persist::{DocumentStore, commit};
use tracing::info;

/// Execute `build-env add googleCloudBuild`.
///
/// Plans the insertion against the whole config graph, then commits it to
/// `store`. Prints nothing on success.
pub fn cmd_add_gcb<S: DocumentStore + ?Sized>(
    opts: &InspectOptions,
    cancel: &CancelToken,
    store: &mut S,
) -> Result<()> {
    let graph = ConfigGraph::load(&opts.filename)?;

    let request = InsertRequest {
        modules: opts.modules.clone(),
        profile: opts.build_env.target_profile(),
        build_env: BuildEnv::GoogleCloudBuild(opts.build_env.google_cloud_build()),
    };
    let plan = plan_insert(&graph, &request, cancel)?;
    if plan.is_empty() {
        info!(root = %opts.filename.display(), "no modules selected; nothing to add");
        return Ok(());
    }

    // Last chance to stop before anything is written.
    cancel.check()?;
    let written = commit(&graph, &plan, store)?;

    info!(
        root = %opts.filename.display(),
        documents = written,
        loaded = graph.len(),
        "added googleCloudBuild build environment"
    );
    Ok(())
}
