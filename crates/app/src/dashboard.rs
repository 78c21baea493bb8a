//! Dashboard store: the single owner of the client's live view.
//!
//! Holds the last state snapshot, the connection flag and the rule list in
//! a tokio [`watch`] channel. Writers replace the whole view; readers either
//! take a [`snapshot`](DashboardStore::snapshot) or [`subscribe`](DashboardStore::subscribe).

use std::sync::Arc;

use tokio::sync::watch;

use homedash_domain::rule::Rule;
use homedash_domain::snapshot::{StateSnapshot, StateUpdate};
use homedash_domain::time::Timestamp;

/// What the dashboard currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    /// `None` until the first update arrives.
    pub state: Option<StateSnapshot>,
    pub last_update: Option<Timestamp>,
    pub connected: bool,
    pub rules: Vec<Rule>,
}

/// Shared dashboard state backed by a [`watch`] channel.
///
/// A late subscriber sees the latest view immediately.
#[derive(Debug, Clone)]
pub struct DashboardStore {
    sender: Arc<watch::Sender<DashboardView>>,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardStore {
    /// Create an empty, disconnected store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sender: Arc::new(watch::Sender::new(DashboardView::default())),
        }
    }

    /// Current view, cloned.
    #[must_use]
    pub fn snapshot(&self) -> DashboardView {
        self.sender.borrow().clone()
    }

    /// Observe every later change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.sender.subscribe()
    }

    /// Record a state update from the backend.
    pub fn apply_update(&self, update: StateUpdate) {
        self.sender.send_modify(|view| {
            view.state = Some(update.data);
            view.last_update = Some(update.timestamp);
            view.connected = update.connection_status;
        });
    }

    /// Flag the backend as unreachable; the last state is kept.
    pub fn mark_disconnected(&self) {
        self.sender.send_if_modified(|view| {
            let changed = view.connected;
            view.connected = false;
            changed
        });
    }

    /// Replace the rule list.
    pub fn set_rules(&self, rules: Vec<Rule>) {
        self.sender.send_modify(|view| view.rules = rules);
    }
}
