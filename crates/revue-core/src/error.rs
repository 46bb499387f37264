// ── Core error types ──
//
// User-facing errors from revue-core. Store implementations report
// action failures through these; consumers never see transport or
// platform errors directly -- the shell translates before it gets here.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Store action errors ──────────────────────────────────────────
    #[error("{action} failed: {message}")]
    Action {
        /// The store action that failed (e.g., "load_git_status").
        action: &'static str,
        message: String,
    },

    #[error("session store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("validation failed: {message}")]
    Validation { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for an action failure with a formatted message.
    pub fn action(action: &'static str, message: impl Into<String>) -> Self {
        Self::Action {
            action,
            message: message.into(),
        }
    }
}
