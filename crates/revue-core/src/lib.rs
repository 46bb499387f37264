// revue-core: session orchestration between the desktop shell's reactive
// state and its side-effecting store actions.

pub mod error;
pub mod session;
pub mod trust;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use session::{
    Activity, ActivityTracker, ComparisonKey, FRESHNESS_INTERVAL, SessionSignals, SessionStore,
    WindowSignal, spawn_comparison_loader, spawn_freshness_poller,
};
pub use trust::{TrustCategory, TrustPattern};
