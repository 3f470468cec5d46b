//! CLI argument parsing for buildenv.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and add build environment definitions in pipeline configs.
///
/// A config file may require other config files; listing and profile
/// insertion follow those imports recursively.
#[derive(Parser, Debug)]
#[command(name = "buildenv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the root config file.
    #[arg(short, long, global = true, default_value = "skaffold.yaml")]
    pub filename: PathBuf,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interact with build environment definitions.
    BuildEnv(BuildEnvCommand),
}

/// Build environment subcommands.
#[derive(Parser, Debug)]
pub struct BuildEnvCommand {
    /// Names of modules to filter the action by.
    #[arg(short, long = "module", global = true, value_delimiter = ',')]
    pub modules: Vec<String>,

    #[command(subcommand)]
    pub action: BuildEnvAction,
}

/// Available build environment actions.
#[derive(Subcommand, Debug)]
pub enum BuildEnvAction {
    /// Print the list of active build environments.
    ///
    /// Example: build-env list -p p1,p2 --format json
    List(ListArgs),

    /// Add a new build environment to the default pipeline or to a new profile.
    Add(AddCommand),
}

/// Arguments for `build-env list`.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Profile names to activate, later ones taking precedence.
    #[arg(short, long = "profile", value_delimiter = ',')]
    pub profiles: Vec<String>,
}

/// `build-env add` and its per-kind subcommands.
#[derive(Parser, Debug)]
pub struct AddCommand {
    /// Profile to create with the new definition, in the target config and
    /// every config it imports. Without it the definition is added to the
    /// default pipeline of the target config's modules.
    #[arg(short, long, global = true, default_value = "")]
    pub profile: String,

    #[command(subcommand)]
    pub kind: AddKind,
}

/// Build environment kinds that can be added.
#[derive(Subcommand, Debug)]
pub enum AddKind {
    /// Add a new GoogleCloudBuild build environment definition.
    ///
    /// Fails if the default pipeline of a targeted module, or a config
    /// reached with --profile, already has the definition or profile.
    #[command(name = "googleCloudBuild", alias = "gcb")]
    GoogleCloudBuild(GcbArgs),
}

/// Arguments for `build-env add googleCloudBuild`.
#[derive(Parser, Debug)]
pub struct GcbArgs {
    /// ID of the Cloud Platform project.
    #[arg(long = "projectId", default_value = "")]
    pub project_id: String,

    /// Disk size of the VM that runs the build.
    #[arg(long = "diskSizeGb", default_value_t = 0, allow_negative_numbers = true)]
    pub disk_size_gb: i64,

    /// Type of VM that runs the build.
    #[arg(long = "machineType", default_value = "")]
    pub machine_type: String,

    /// Build timeout, e.g. 3600s.
    #[arg(long, default_value = "")]
    pub timeout: String,

    /// Number of artifacts to build concurrently; 0 means no limit.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub concurrency: i64,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
