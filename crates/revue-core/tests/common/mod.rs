//! Recording session store shared by the coordinator tests.
//!
//! Journals every action call; the four joined load operations can be
//! gated behind a watch channel so tests control when a join resolves,
//! and individual actions can be flipped to fail.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use revue_core::{CoreError, SessionStore};

pub struct RecordingStore {
    calls: Mutex<Vec<&'static str>>,
    gate: watch::Receiver<bool>,
    pub fail_git_status: AtomicBool,
    pub fail_remote_info: AtomicBool,
    pub fail_freshness: AtomicBool,
}

impl RecordingStore {
    /// Store whose joined loads complete immediately.
    pub fn open() -> Arc<Self> {
        Self::with_gate(true).0
    }

    /// Store whose joined loads block until the returned sender
    /// publishes `true`.
    pub fn gated() -> (Arc<Self>, watch::Sender<bool>) {
        Self::with_gate(false)
    }

    fn with_gate(open: bool) -> (Arc<Self>, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(open);
        let store = Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            gate: rx,
            fail_git_status: AtomicBool::new(false),
            fail_remote_info: AtomicBool::new(false),
            fail_freshness: AtomicBool::new(false),
        });
        (store, tx)
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| **c == name).count()
    }

    /// Index of the first occurrence of a call, panicking if absent.
    pub fn position(&self, name: &str) -> usize {
        self.calls()
            .iter()
            .position(|c| *c == name)
            .unwrap_or_else(|| panic!("{name} was never called"))
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().expect("calls lock").push(name);
    }

    async fn wait_gate(&self) {
        let mut gate = self.gate.clone();
        while !*gate.borrow_and_update() {
            if gate.changed().await.is_err() {
                break;
            }
        }
    }

    fn failure(&self, flag: &AtomicBool, action: &'static str) -> Result<(), CoreError> {
        if flag.load(Ordering::SeqCst) {
            Err(CoreError::action(action, "forced failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionStore for RecordingStore {
    async fn clear_search(&self) -> Result<(), CoreError> {
        self.record("clear_search");
        Ok(())
    }

    async fn start_activity(&self, _id: &str, _label: &str, _weight: u32) -> Result<(), CoreError> {
        self.record("start_activity");
        Ok(())
    }

    async fn end_activity(&self, _id: &str) -> Result<(), CoreError> {
        self.record("end_activity");
        Ok(())
    }

    async fn load_review_state(&self) -> Result<(), CoreError> {
        self.record("load_review_state");
        self.wait_gate().await;
        Ok(())
    }

    async fn load_files(&self) -> Result<(), CoreError> {
        self.record("load_files");
        self.wait_gate().await;
        Ok(())
    }

    async fn load_all_files(&self) -> Result<(), CoreError> {
        self.record("load_all_files");
        self.wait_gate().await;
        Ok(())
    }

    async fn load_git_status(&self) -> Result<(), CoreError> {
        self.record("load_git_status");
        self.wait_gate().await;
        self.failure(&self.fail_git_status, "load_git_status")
    }

    async fn load_remote_info(&self) -> Result<(), CoreError> {
        self.record("load_remote_info");
        self.failure(&self.fail_remote_info, "load_remote_info")
    }

    async fn sync_total_diff_hunks(&self) -> Result<(), CoreError> {
        self.record("sync_total_diff_hunks");
        Ok(())
    }

    async fn classify_static_hunks(&self) -> Result<(), CoreError> {
        self.record("classify_static_hunks");
        Ok(())
    }

    async fn restore_guide_from_state(&self) -> Result<(), CoreError> {
        self.record("restore_guide_from_state");
        Ok(())
    }

    async fn check_reviews_freshness(&self) -> Result<(), CoreError> {
        self.record("check_reviews_freshness");
        self.failure(&self.fail_freshness, "check_reviews_freshness")
    }
}
