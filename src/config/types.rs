//! Build environment types and the Pipeline that holds them.
//!
//! A Pipeline stores each build environment kind under its own key, the same
//! way the YAML looks on disk. At most one of them may be set; this is checked
//! by [`Pipeline::defined_kinds`] during document validation and preserved by
//! [`Pipeline::set_build_env`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Concurrency sentinel meaning "unset, use the builder's default".
pub const UNSET_CONCURRENCY: i64 = -1;

/// Discriminant of a [`BuildEnv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildEnvKind {
    Local,
    Cluster,
    GoogleCloudBuild,
}

impl fmt::Display for BuildEnvKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildEnvKind::Local => write!(f, "local"),
            BuildEnvKind::Cluster => write!(f, "cluster"),
            BuildEnvKind::GoogleCloudBuild => write!(f, "googleCloudBuild"),
        }
    }
}

/// A build environment definition.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEnv {
    Local(LocalBuild),
    Cluster(ClusterBuild),
    GoogleCloudBuild(GoogleCloudBuild),
}

impl BuildEnv {
    pub fn kind(&self) -> BuildEnvKind {
        match self {
            BuildEnv::Local(_) => BuildEnvKind::Local,
            BuildEnv::Cluster(_) => BuildEnvKind::Cluster,
            BuildEnv::GoogleCloudBuild(_) => BuildEnvKind::GoogleCloudBuild,
        }
    }
}

/// Build on the local machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalBuild {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<i64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Build in-cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterBuild {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<i64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Build with Google Cloud Build.
///
/// Fields are passed through as given; only sign checks are applied before
/// a definition is written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoogleCloudBuild {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_type: Option<String>,

    /// Duration string, e.g. `3600s`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// `0` means no limit. Absent means the builder default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<i64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Build configuration: a module's default pipeline or a profile overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pipeline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<LocalBuild>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ClusterBuild>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_cloud_build: Option<GoogleCloudBuild>,

    /// Other pipeline settings (artifacts, tag policy, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Pipeline {
    /// A pipeline carrying only the given build environment.
    pub fn with_build_env(env: BuildEnv) -> Self {
        let mut pipeline = Pipeline::default();
        pipeline.set_build_env(env);
        pipeline
    }

    /// The build environment defined here, if any.
    ///
    /// On a validated document at most one kind is present. Should several
    /// be set, `googleCloudBuild` is reported first, then `cluster`.
    pub fn build_env(&self) -> Option<BuildEnv> {
        if let Some(gcb) = &self.google_cloud_build {
            return Some(BuildEnv::GoogleCloudBuild(gcb.clone()));
        }
        if let Some(cluster) = &self.cluster {
            return Some(BuildEnv::Cluster(cluster.clone()));
        }
        self.local.clone().map(BuildEnv::Local)
    }

    /// Every kind that has a value in this pipeline.
    pub fn defined_kinds(&self) -> Vec<BuildEnvKind> {
        let mut kinds = Vec::new();
        if self.local.is_some() {
            kinds.push(BuildEnvKind::Local);
        }
        if self.cluster.is_some() {
            kinds.push(BuildEnvKind::Cluster);
        }
        if self.google_cloud_build.is_some() {
            kinds.push(BuildEnvKind::GoogleCloudBuild);
        }
        kinds
    }

    /// Replace whatever build environment is set with `env`.
    pub fn set_build_env(&mut self, env: BuildEnv) {
        self.local = None;
        self.cluster = None;
        self.google_cloud_build = None;
        match env {
            BuildEnv::Local(local) => self.local = Some(local),
            BuildEnv::Cluster(cluster) => self.cluster = Some(cluster),
            BuildEnv::GoogleCloudBuild(gcb) => self.google_cloud_build = Some(gcb),
        }
    }
}
