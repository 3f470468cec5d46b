//! Error types for the buildenv CLI.
//!
//! Uses thiserror for derive macros. Every variant except `PersistenceFailure`
//! guarantees that no document on disk was touched.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for buildenv operations.
#[derive(Error, Debug)]
pub enum BuildEnvError {
    /// Bad arguments, or a document that could not be read or parsed.
    #[error("{0}")]
    UserError(String),

    /// A requested module name is absent from the originating document.
    #[error("module '{module}' not found in {}", document.display())]
    NotFound { module: String, document: PathBuf },

    /// The build environment or profile that would be created is already defined.
    #[error("{what} already exists in {}", document.display())]
    AlreadyExists { what: String, document: PathBuf },

    /// Structurally inconsistent input.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// The cancellation signal fired during traversal or validation.
    #[error("operation cancelled; no documents were modified")]
    Cancelled,

    /// A staged document could not be written after validation passed.
    #[error(
        "failed to write {} ({written} of {total} documents already written): {reason}",
        document.display()
    )]
    PersistenceFailure {
        document: PathBuf,
        written: usize,
        total: usize,
        reason: String,
    },
}

impl BuildEnvError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildEnvError::UserError(_) => exit_codes::USER_ERROR,
            BuildEnvError::NotFound { .. } => exit_codes::NOT_FOUND,
            BuildEnvError::AlreadyExists { .. } => exit_codes::ALREADY_EXISTS,
            BuildEnvError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            BuildEnvError::Cancelled => exit_codes::CANCELLED,
            BuildEnvError::PersistenceFailure { .. } => exit_codes::PERSISTENCE_FAILURE,
        }
    }

    /// Stable machine-readable code used by the JSON error output.
    pub fn code(&self) -> &'static str {
        match self {
            BuildEnvError::UserError(_) => "USER_ERROR",
            BuildEnvError::NotFound { .. } => "NOT_FOUND",
            BuildEnvError::AlreadyExists { .. } => "ALREADY_EXISTS",
            BuildEnvError::ValidationError(_) => "VALIDATION_ERROR",
            BuildEnvError::Cancelled => "CANCELLED",
            BuildEnvError::PersistenceFailure { .. } => "PERSISTENCE_FAILURE",
        }
    }
}

/// Result type alias for buildenv operations.
pub type Result<T> = std::result::Result<T, BuildEnvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = BuildEnvError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert_eq!(err.code(), "USER_ERROR");
    }

    #[test]
    fn not_found_names_module_and_document() {
        let err = BuildEnvError::NotFound {
            module: "backend".to_string(),
            document: PathBuf::from("/ws/skaffold.yaml"),
        };
        assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);
        assert_eq!(
            err.to_string(),
            "module 'backend' not found in /ws/skaffold.yaml"
        );
    }

    #[test]
    fn already_exists_names_document() {
        let err = BuildEnvError::AlreadyExists {
            what: "profile 'gcb'".to_string(),
            document: PathBuf::from("/ws/lib/skaffold.yaml"),
        };
        assert_eq!(err.exit_code(), exit_codes::ALREADY_EXISTS);
        assert_eq!(
            err.to_string(),
            "profile 'gcb' already exists in /ws/lib/skaffold.yaml"
        );
    }

    #[test]
    fn validation_error_has_correct_exit_code() {
        let err = BuildEnvError::ValidationError("diskSizeGb must not be negative".to_string());
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
        assert_eq!(
            err.to_string(),
            "Validation failed: diskSizeGb must not be negative"
        );
    }

    #[test]
    fn cancelled_has_correct_exit_code() {
        assert_eq!(BuildEnvError::Cancelled.exit_code(), exit_codes::CANCELLED);
        assert_eq!(BuildEnvError::Cancelled.code(), "CANCELLED");
    }

    #[test]
    fn persistence_failure_reports_progress() {
        let err = BuildEnvError::PersistenceFailure {
            document: PathBuf::from("/ws/b.yaml"),
            written: 1,
            total: 3,
            reason: "permission denied".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::PERSISTENCE_FAILURE);
        assert_eq!(
            err.to_string(),
            "failed to write /ws/b.yaml (1 of 3 documents already written): permission denied"
        );
    }
}
