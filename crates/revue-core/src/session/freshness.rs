// ── Freshness poller ──
//
// Keeps sidebar review summaries reasonably fresh: on window focus,
// visibility, or a fixed interval, re-validate tracked reviews -- but
// only when there is at least one review to check. Reads the count
// through the watch channel at call time, so the guard never acts on a
// stale value.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::SessionStore;

/// Background polling cadence. Not a timeout on any individual check.
pub const FRESHNESS_INTERVAL: Duration = Duration::from_secs(60);

/// Window-level signals the desktop shell forwards to the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSignal {
    /// The application window gained focus.
    FocusGained,
    /// Document visibility changed; `true` means visible.
    VisibilityChanged(bool),
}

/// Spawn the freshness poller.
///
/// Triggers a freshness check on focus, on visibility becoming visible,
/// and on each interval tick -- each funnelled through a guard that acts
/// only while `review_count` is non-zero. Cancelling `cancel` (or
/// closing the signal channel) stops the task; no trigger fires after
/// that.
pub fn spawn_freshness_poller<S>(
    review_count: watch::Receiver<usize>,
    mut window_signals: mpsc::UnboundedReceiver<WindowSignal>,
    store: Arc<S>,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: SessionStore + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(FRESHNESS_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval.tick().await; // consume the immediate first tick

        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => break,

                _ = interval.tick() => {
                    check_if_tracked(store.as_ref(), &review_count).await;
                }

                signal = window_signals.recv() => {
                    let Some(signal) = signal else { break };
                    match signal {
                        WindowSignal::FocusGained
                        | WindowSignal::VisibilityChanged(true) => {
                            check_if_tracked(store.as_ref(), &review_count).await;
                        }
                        // Going hidden never triggers a check.
                        WindowSignal::VisibilityChanged(false) => {}
                    }
                }
            }
        }
    })
}

/// The single guard every trigger funnels through.
async fn check_if_tracked<S>(store: &S, review_count: &watch::Receiver<usize>)
where
    S: SessionStore + ?Sized,
{
    if *review_count.borrow() == 0 {
        return;
    }
    // The check action owns its error handling; a failed check is not
    // retried here.
    if let Err(e) = store.check_reviews_freshness().await {
        debug!(error = %e, "freshness check failed");
    }
}
