// ── Activity tracker ──
//
// Reference implementation of the start/end activity contract behind
// `SessionStore::start_activity` / `end_activity`. The progress
// indicator renders the in-flight set; total weight drives the bar.
// Mutations are broadcast to subscribers via a `watch` channel.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// One in-flight activity shown by the progress indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub label: String,
    pub weight: u32,
}

/// Ordered set of in-flight activities, observable through `watch`.
///
/// Starting an id that is already in flight replaces it in place;
/// ending an unknown id is a no-op. Thread-safe: the watch sender
/// serializes all mutations.
pub struct ActivityTracker {
    activities: watch::Sender<Arc<Vec<Activity>>>,
}

impl ActivityTracker {
    pub fn new() -> Self {
        let (activities, _) = watch::channel(Arc::new(Vec::new()));
        Self { activities }
    }

    /// Start (or restart) a named activity.
    pub fn start(&self, id: &str, label: &str, weight: u32) {
        let activity = Activity {
            id: id.to_owned(),
            label: label.to_owned(),
            weight,
        };
        self.activities.send_modify(|current| {
            let mut next = current.as_ref().clone();
            if let Some(existing) = next.iter_mut().find(|a| a.id == id) {
                *existing = activity;
            } else {
                next.push(activity);
            }
            *current = Arc::new(next);
        });
    }

    /// End a named activity. Unknown ids are ignored.
    pub fn end(&self, id: &str) {
        self.activities.send_if_modified(|current| {
            if current.iter().any(|a| a.id == id) {
                let mut next = current.as_ref().clone();
                next.retain(|a| a.id != id);
                *current = Arc::new(next);
                true
            } else {
                false
            }
        });
    }

    /// Snapshot of the in-flight activities.
    pub fn in_flight(&self) -> Arc<Vec<Activity>> {
        self.activities.borrow().clone()
    }

    /// Sum of the weights of all in-flight activities.
    pub fn total_weight(&self) -> u32 {
        self.activities.borrow().iter().map(|a| a.weight).sum()
    }

    /// Subscribe to changes of the in-flight set.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Activity>>> {
        self.activities.subscribe()
    }
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}
