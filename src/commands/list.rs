//! Implementation of `build-env list`.

use crate::buildenv::list_build_envs;
use crate::cancel::CancelToken;
use crate::error::Result;
use crate::graph::ConfigGraph;
use crate::options::InspectOptions;
use crate::output::render_list;
use std::io::Write;

/// Execute `build-env list`.
///
/// Loads the config graph rooted at `opts.filename` and prints the effective
/// build environment of every selected module with `opts.build_env.profiles`
/// activated.
pub fn cmd_list<W: Write>(opts: &InspectOptions, cancel: &CancelToken, out: &mut W) -> Result<()> {
    let graph = ConfigGraph::load(&opts.filename)?;
    let entries = list_build_envs(&graph, &opts.build_env.profiles, &opts.modules, cancel)?;
    render_list(opts.format, &entries, out)
}
