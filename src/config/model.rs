//! Document model: modules, profiles and import dependencies.

use super::types::Pipeline;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One configuration file.
///
/// Identity is `source`, the absolute normalised path the document was read
/// from. It is not part of the YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    #[serde(skip)]
    pub source: PathBuf,

    /// Modules in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<Module>,

    /// Opt-in overlays, unique by name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<Profile>,

    /// Imported documents in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<ImportDependency>,

    /// Unknown top-level fields (apiVersion, deploy, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl ConfigDocument {
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn module_mut(&mut self, name: &str) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.name == name)
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }
}

/// A named unit that consumes a build environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Module {
    pub name: String,

    /// The module's default pipeline.
    #[serde(skip_serializing_if = "is_empty_pipeline")]
    pub build: Pipeline,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A named overlay applied only when activated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,

    /// Module names the overlay applies to. `None` means every module.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<String>>,

    #[serde(skip_serializing_if = "is_empty_pipeline")]
    pub build: Pipeline,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Profile {
    /// Whether this overlay is scoped to include `module`.
    pub fn applies_to(&self, module: &str) -> bool {
        match &self.modules {
            None => true,
            Some(names) => names.iter().any(|n| n == module),
        }
    }
}

/// Reference from one document to another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportDependency {
    /// Path of the imported document, relative to the importing one.
    pub path: String,

    /// Profiles always activated inside the imported document.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub active_profiles: Vec<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

fn is_empty_pipeline(pipeline: &Pipeline) -> bool {
    *pipeline == Pipeline::default()
}
