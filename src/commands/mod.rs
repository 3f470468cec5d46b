//! Command implementations for buildenv.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod add;
mod list;

pub use add::cmd_add_gcb;
pub use list::cmd_list;

use crate::cancel::CancelToken;
use crate::cli::{AddKind, BuildEnvAction, BuildEnvCommand, Cli, Command};
use crate::error::Result;
use crate::options::{BuildEnvOptions, InspectOptions};
use crate::persist::FileStore;
use std::io;

/// Dispatch a command to its implementation.
///
/// Listing output goes to stdout.
pub fn dispatch(cli: Cli, cancel: &CancelToken) -> Result<()> {
    let Cli {
        filename,
        format,
        command,
        ..
    } = cli;

    match command {
        Command::BuildEnv(BuildEnvCommand { modules, action }) => {
            let mut opts = InspectOptions {
                filename,
                format,
                modules,
                build_env: BuildEnvOptions::default(),
            };
            match action {
                BuildEnvAction::List(args) => {
                    opts.build_env.profiles = args.profiles;
                    cmd_list(&opts, cancel, &mut io::stdout().lock())
                }
                BuildEnvAction::Add(add) => {
                    opts.build_env.profile = add.profile;
                    match add.kind {
                        AddKind::GoogleCloudBuild(args) => {
                            opts.build_env.project_id = args.project_id;
                            opts.build_env.disk_size_gb = args.disk_size_gb;
                            opts.build_env.machine_type = args.machine_type;
                            opts.build_env.timeout = args.timeout;
                            opts.build_env.concurrency = args.concurrency;
                            cmd_add_gcb(&opts, cancel, &mut FileStore)
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
