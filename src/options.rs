//! Invocation options handed from the CLI layer to the command handlers.

use crate::config::{GoogleCloudBuild, UNSET_CONCURRENCY};
use crate::output::OutputFormat;
use std::path::PathBuf;

/// Options shared by every build-env action.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectOptions {
    /// Root document.
    pub filename: PathBuf,
    pub format: OutputFormat,
    /// Module filter; empty selects every module.
    pub modules: Vec<String>,
    pub build_env: BuildEnvOptions,
}

/// Action-specific build-env options.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildEnvOptions {
    /// Profiles to activate when listing, in precedence order.
    pub profiles: Vec<String>,
    /// Profile to add to. Empty targets the default pipeline.
    pub profile: String,
    pub project_id: String,
    pub disk_size_gb: i64,
    pub machine_type: String,
    pub timeout: String,
    /// `-1` leaves concurrency unset.
    pub concurrency: i64,
}

impl Default for BuildEnvOptions {
    fn default() -> Self {
        Self {
            profiles: Vec::new(),
            profile: String::new(),
            project_id: String::new(),
            disk_size_gb: 0,
            machine_type: String::new(),
            timeout: String::new(),
            concurrency: UNSET_CONCURRENCY,
        }
    }
}

impl BuildEnvOptions {
    /// Target profile, or `None` for the default pipeline.
    pub fn target_profile(&self) -> Option<String> {
        if self.profile.is_empty() {
            None
        } else {
            Some(self.profile.clone())
        }
    }

    /// GoogleCloudBuild definition from the flag values.
    ///
    /// Unset flags (empty strings, zero disk size, `-1` concurrency) are left
    /// out of the definition. Concurrency `0` is kept.
    pub fn google_cloud_build(&self) -> GoogleCloudBuild {
        GoogleCloudBuild {
            project_id: non_empty(&self.project_id),
            disk_size_gb: (self.disk_size_gb != 0).then_some(self.disk_size_gb),
            machine_type: non_empty(&self.machine_type),
            timeout: non_empty(&self.timeout),
            concurrency: (self.concurrency != UNSET_CONCURRENCY).then_some(self.concurrency),
            extra: Default::default(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
