// ── Comparison load coordinator ──
//
// Whenever a comparison becomes ready (or changes identity), load
// everything that comparison needs exactly once, discarding the side
// effects of any run that a newer activation supersedes. Errors end in
// a log line; nothing here propagates to the caller.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{ComparisonKey, SessionSignals, SessionStore};
use crate::error::CoreError;

const LOAD_STATE_ACTIVITY: &str = "load-state";
const LOAD_STATE_LABEL: &str = "Loading review state";
const LOAD_STATE_WEIGHT: u32 = 3;

/// Spawn the comparison load coordinator.
///
/// Re-evaluates whenever any signal in `signals` changes. Each
/// activation supersedes the previous one: the old run's token is
/// cancelled so its in-flight completion applies no further effects.
/// `on_loading_done` fires exactly once per non-superseded activation,
/// whether the load succeeded or failed -- never for a cancelled run.
///
/// Cancel `cancel` to tear the coordinator down.
pub fn spawn_comparison_loader<S>(
    mut signals: SessionSignals,
    store: Arc<S>,
    on_loading_done: impl Fn() + Send + Sync + 'static,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: SessionStore + 'static,
{
    tokio::spawn(async move {
        let on_loading_done: Arc<dyn Fn() + Send + Sync> = Arc::new(on_loading_done);
        let mut active: Option<CancellationToken> = None;

        loop {
            // Any input change supersedes the previous run, whether or
            // not the new tuple activates a fresh one.
            if let Some(prev) = active.take() {
                prev.cancel();
            }

            // Snapshot the whole tuple, marking every receiver as seen
            // so one iteration handles simultaneous changes.
            let repo_path = signals.repo_path.borrow_and_update().clone();
            let ready = *signals.comparison_ready.borrow_and_update();
            let key = signals.comparison_key.borrow_and_update().clone();

            if should_activate(repo_path.as_deref(), ready) {
                let run = cancel.child_token();
                active = Some(run.clone());

                debug!(ready, key = key.as_ref().map(ComparisonKey::as_str), "comparison activation");
                tokio::spawn(run_activation(
                    Arc::clone(&store),
                    key,
                    run,
                    Arc::clone(&on_loading_done),
                ));
            }

            // Wait for the next change to any input. A closed sender
            // means the shell is gone, so the coordinator stops too.
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                changed = signals.comparison_ready.changed() => {
                    if changed.is_err() { break; }
                }
                changed = signals.repo_path.changed() => {
                    if changed.is_err() { break; }
                }
                changed = signals.comparison_key.changed() => {
                    if changed.is_err() { break; }
                }
            }
        }

        // Teardown: suppress any in-flight run's remaining effects.
        if let Some(run) = active {
            run.cancel();
        }
    })
}

fn should_activate(repo_path: Option<&str>, ready: u64) -> bool {
    matches!(repo_path, Some(p) if !p.is_empty()) && ready > 0
}

/// Outcome of one activation's load sequence.
enum LoadOutcome {
    /// All loads and post-join steps applied.
    Loaded,
    /// A newer activation took over while this one was in flight.
    Superseded,
}

/// One activation: load sequence, catch-all logging, loading-done
/// signal. Runs as its own task so the driver keeps watching signals.
async fn run_activation<S>(
    store: Arc<S>,
    key: Option<ComparisonKey>,
    run: CancellationToken,
    on_loading_done: Arc<dyn Fn() + Send + Sync>,
) where
    S: SessionStore + 'static,
{
    match load_comparison(&store, &run).await {
        Ok(LoadOutcome::Superseded) => return,
        Ok(LoadOutcome::Loaded) => {
            // Fire-and-forget: remote info is cosmetic. Its failure is
            // invisible to this sequence and logged in its own scope.
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                if let Err(e) = store.load_remote_info().await {
                    debug!(error = %e, "remote info load failed");
                }
            });
        }
        Err(e) => {
            // A superseded run's outcome is irrelevant -- not even logged.
            if run.is_cancelled() {
                return;
            }
            warn!(
                error = %e,
                key = key.as_ref().map(ComparisonKey::as_str),
                "comparison load failed"
            );
        }
    }

    if !run.is_cancelled() {
        on_loading_done();
    }
}

/// The load sequence proper. Any error aborts the remaining steps and
/// surfaces to the single catch-all in [`run_activation`].
async fn load_comparison<S>(
    store: &Arc<S>,
    run: &CancellationToken,
) -> Result<LoadOutcome, CoreError>
where
    S: SessionStore,
{
    store.clear_search().await?;

    store
        .start_activity(LOAD_STATE_ACTIVITY, LOAD_STATE_LABEL, LOAD_STATE_WEIGHT)
        .await?;

    // Four-way join: no ordering among these, but all must complete
    // (or one fail) before the post-join steps run.
    let (state, files, contents, git_status) = tokio::join!(
        load_state_tracked(store.as_ref()),
        store.load_files(),
        store.load_all_files(),
        store.load_git_status(),
    );
    state?;
    files?;
    contents?;
    git_status?;

    if run.is_cancelled() {
        return Ok(LoadOutcome::Superseded);
    }

    // Post-join steps, strictly in this order.
    store.sync_total_diff_hunks().await?;
    store.classify_static_hunks().await?;
    store.restore_guide_from_state().await?;

    Ok(LoadOutcome::Loaded)
}

/// Load review state, completing its progress activity either way.
async fn load_state_tracked<S>(store: &S) -> Result<(), CoreError>
where
    S: SessionStore + ?Sized,
{
    let result = store.load_review_state().await;
    store.end_activity(LOAD_STATE_ACTIVITY).await?;
    result
}
