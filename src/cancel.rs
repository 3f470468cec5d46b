//! Cooperative cancellation for graph traversal and validation.

use crate::error::{BuildEnvError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tracing::warn;

/// Shared cancellation flag.
///
/// Clones observe the same flag. Long-running passes call [`CancelToken::check`]
/// between documents and abort with [`BuildEnvError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with `Cancelled` if cancellation was requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(BuildEnvError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Cancel `token` when the process receives Ctrl-C.
///
/// The listener runs on a detached thread with its own single-threaded
/// runtime. Once it is installed, Ctrl-C no longer kills the process; the
/// running pass stops at its next check instead.
pub fn cancel_on_interrupt(token: &CancelToken) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            BuildEnvError::UserError(format!("failed to start interrupt listener: {}", e))
        })?;

    let token = token.clone();
    thread::Builder::new()
        .name("interrupt".to_string())
        .spawn(move || {
            runtime.block_on(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("interrupt received, cancelling");
                    token.cancel();
                }
            });
        })
        .map_err(|e| {
            BuildEnvError::UserError(format!("failed to start interrupt listener: {}", e))
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_passes_check() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let handle = token.clone();
        handle.cancel();

        assert!(token.is_cancelled());
        assert!(matches!(token.check(), Err(BuildEnvError::Cancelled)));
    }

    #[test]
    fn installing_interrupt_listener_leaves_token_clear() {
        let token = CancelToken::new();
        cancel_on_interrupt(&token).unwrap();

        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }
}
