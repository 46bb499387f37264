// ── Session orchestration ──
//
// Leaf coordinators that sit between the desktop shell's reactive state
// and its side-effecting store actions. The coordinators read watch
// channels and invoke `SessionStore` methods; they own no entities.

mod activity;
mod freshness;
mod loader;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::CoreError;

pub use activity::{Activity, ActivityTracker};
pub use freshness::{FRESHNESS_INTERVAL, WindowSignal, spawn_freshness_poller};
pub use loader::spawn_comparison_loader;

// ── ComparisonKey ────────────────────────────────────────────────

/// Opaque identity of the currently selected comparison (e.g., a pair
/// of commits or branches). Changing the key forces a fresh load run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComparisonKey(String);

impl ComparisonKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComparisonKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComparisonKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

// ── SessionStore ─────────────────────────────────────────────────

/// Command interface onto the application state container.
///
/// The coordinators never mutate shared state themselves -- every side
/// effect goes through one of these actions, and the store serializes
/// its own internal changes. Injected once per coordinator as `Arc<S>`,
/// deliberately separate from the reactive inputs in [`SessionSignals`].
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Drop any search results left over from a previous comparison.
    async fn clear_search(&self) -> Result<(), CoreError>;

    /// Begin a named progress activity with a human label and weight.
    async fn start_activity(&self, id: &str, label: &str, weight: u32) -> Result<(), CoreError>;

    /// Complete a previously started progress activity.
    async fn end_activity(&self, id: &str) -> Result<(), CoreError>;

    /// Load persisted review state for the active comparison.
    async fn load_review_state(&self) -> Result<(), CoreError>;

    /// Load the comparison's file list.
    async fn load_files(&self) -> Result<(), CoreError>;

    /// Load contents and metadata for every file in the comparison.
    async fn load_all_files(&self) -> Result<(), CoreError>;

    /// Load the repository's git status.
    async fn load_git_status(&self) -> Result<(), CoreError>;

    /// Load remote/upstream info. Cosmetic -- callers may detach this.
    async fn load_remote_info(&self) -> Result<(), CoreError>;

    /// Synchronize the total diff-hunk count into review state.
    async fn sync_total_diff_hunks(&self) -> Result<(), CoreError>;

    /// Run rule-based (non-AI) classification over the loaded hunks.
    async fn classify_static_hunks(&self) -> Result<(), CoreError>;

    /// Restore previously persisted guide data if still fresh.
    async fn restore_guide_from_state(&self) -> Result<(), CoreError>;

    /// Re-validate that each tracked review still has a non-empty diff.
    async fn check_reviews_freshness(&self) -> Result<(), CoreError>;
}

// ── SessionSignals ───────────────────────────────────────────────

/// Reactive inputs the load coordinator re-evaluates on.
///
/// The shell owns the corresponding senders; the coordinator only
/// observes. A change to any receiver triggers one re-evaluation of the
/// whole tuple.
pub struct SessionSignals {
    /// Identity of the active repository. `None` or empty suppresses
    /// loading entirely.
    pub repo_path: watch::Receiver<Option<String>>,

    /// Monotonically increasing readiness counter; zero means no
    /// comparison has been prepared yet.
    pub comparison_ready: watch::Receiver<u64>,

    /// Identity of the selected comparison, used to detect switches.
    pub comparison_key: watch::Receiver<Option<ComparisonKey>>,
}
