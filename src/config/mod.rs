//! Configuration document model.
//!
//! A document is a YAML file holding modules (each with a default build
//! pipeline), named profile overlays and import dependencies on other
//! documents. Parsing is forward-compatible: unknown fields are kept and
//! written back unchanged.

mod model;
mod operations;
pub mod types;


pub use model::{ConfigDocument, Module, Profile};
pub use operations::document_key;
pub use types::{BuildEnv, GoogleCloudBuild, Pipeline, UNSET_CONCURRENCY};
