//! Restricting an operation to a subset of a document's modules.

use crate::config::{ConfigDocument, Module};
use crate::error::{BuildEnvError, Result};

/// Modules of `document` named in `requested`, in declaration order.
///
/// An empty `requested` selects every module. A name absent from `document`
/// fails with `NotFound`.
pub fn resolve_modules<'a>(
    document: &'a ConfigDocument,
    requested: &[String],
) -> Result<Vec<&'a Module>> {
    if let Some(missing) = requested.iter().find(|name| document.module(name).is_none()) {
        return Err(BuildEnvError::NotFound {
            module: missing.clone(),
            document: document.source.clone(),
        });
    }
    Ok(matching_modules(document, requested))
}

/// Like [`resolve_modules`], but names missing from `document` are skipped.
///
/// Used on imported documents, which share the caller's filter list without
/// being required to declare every name in it.
pub fn matching_modules<'a>(document: &'a ConfigDocument, requested: &[String]) -> Vec<&'a Module> {
    document
        .modules
        .iter()
        .filter(|m| requested.is_empty() || requested.contains(&m.name))
        .collect()
}
