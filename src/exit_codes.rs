//! Exit code constants for the buildenv CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable or unparsable documents)
//! - 2: Validation failure (inconsistent input or documents)
//! - 3: A requested module does not exist
//! - 4: The target build environment or profile already exists
//! - 5: Persistence failure (documents may be partially written)
//! - 130: Cancelled

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable or unparsable documents.
pub const USER_ERROR: i32 = 1;

/// Validation failure: structurally inconsistent input.
pub const VALIDATION_FAILURE: i32 = 2;

/// A requested module name is absent.
pub const NOT_FOUND: i32 = 3;

/// A build environment definition or profile is already present.
pub const ALREADY_EXISTS: i32 = 4;

/// One or more staged documents could not be written.
pub const PERSISTENCE_FAILURE: i32 = 5;

/// The operation was cancelled before anything was written.
pub const CANCELLED: i32 = 130;
