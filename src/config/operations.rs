//! Document loading, validation and serialization.

use super::model::ConfigDocument;
use super::types::Pipeline;
use crate::error::{BuildEnvError, Result};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

impl ConfigDocument {
    /// Load and validate a document from a YAML file.
    ///
    /// `source` is set to the normalised absolute form of `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            BuildEnvError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut document = Self::from_yaml(&content).map_err(|e| match e {
            BuildEnvError::UserError(msg) => {
                BuildEnvError::UserError(format!("{}: {}", path.display(), msg))
            }
            BuildEnvError::ValidationError(msg) => {
                BuildEnvError::ValidationError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        document.source = document_key(path)?;
        Ok(document)
    }

    /// Parse and validate a document from a YAML string.
    ///
    /// Unknown fields are preserved and written back by [`ConfigDocument::to_yaml`].
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file is a valid, empty document.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let document: ConfigDocument = serde_yaml::from_str(yaml)
            .map_err(|e| BuildEnvError::UserError(format!("failed to parse config YAML: {}", e)))?;

        document.validate()?;
        Ok(document)
    }

    /// Serialize the document to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            BuildEnvError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Check the structural invariants of the document.
    ///
    /// - module names are non-empty and unique
    /// - profile names are non-empty and unique
    /// - every pipeline holds at most one build environment
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for module in &self.modules {
            if module.name.is_empty() {
                return Err(BuildEnvError::ValidationError(
                    "module names must be non-empty".to_string(),
                ));
            }
            if !seen.insert(module.name.as_str()) {
                return Err(BuildEnvError::ValidationError(format!(
                    "duplicate module name '{}'",
                    module.name
                )));
            }
            check_single_build_env(&module.build, &format!("module '{}'", module.name))?;
        }

        let mut seen = HashSet::new();
        for profile in &self.profiles {
            if profile.name.is_empty() {
                return Err(BuildEnvError::ValidationError(
                    "profile names must be non-empty".to_string(),
                ));
            }
            if !seen.insert(profile.name.as_str()) {
                return Err(BuildEnvError::ValidationError(format!(
                    "duplicate profile name '{}'",
                    profile.name
                )));
            }
            check_single_build_env(&profile.build, &format!("profile '{}'", profile.name))?;
        }

        for dependency in &self.requires {
            if dependency.path.trim().is_empty() {
                return Err(BuildEnvError::ValidationError(
                    "required config entries must have a non-empty path".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Directory that relative import paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.source.parent().unwrap_or(Path::new(""))
    }
}

fn check_single_build_env(pipeline: &Pipeline, owner: &str) -> Result<()> {
    let kinds = pipeline.defined_kinds();
    if kinds.len() > 1 {
        let names: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
        return Err(BuildEnvError::ValidationError(format!(
            "{} defines more than one build environment ({})",
            owner,
            names.join(", ")
        )));
    }
    Ok(())
}

/// Identity of the document stored at `path`: absolute and lexically normalised.
///
/// `.` components are dropped and `..` pops the previous component, so
/// `a/../b.yaml` and `b.yaml` name the same document without touching the
/// filesystem.
pub fn document_key<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let absolute = std::path::absolute(path).map_err(|e| {
        BuildEnvError::UserError(format!(
            "failed to resolve path '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
