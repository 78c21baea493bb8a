//! State poller: keeps the [`DashboardStore`] fed from a [`StateSource`].

use std::time::Duration;

use tokio::task::JoinHandle;

use homedash_domain::error::HomeDashError;

use crate::dashboard::DashboardStore;
use crate::ports::StateSource;

/// Background task fetching a state update at a fixed interval.
///
/// A failed fetch marks the store disconnected and is retried at the
/// next tick; the last good snapshot stays visible.
pub struct StatePoller<S> {
    source: S,
    store: DashboardStore,
    interval: Duration,
}

impl<S: StateSource + Send + Sync + 'static> StatePoller<S> {
    /// Spawn the poll loop on the current tokio runtime.
    pub fn start(source: S, store: DashboardStore, interval: Duration) -> JoinHandle<()> {
        let poller = Self {
            source,
            store,
            interval,
        };
        tracing::info!(interval_secs = interval.as_secs(), "state poller started");
        tokio::spawn(poller.run())
    }

    async fn run(self) {
        loop {
            if let Err(err) = self.iterate().await {
                self.store.mark_disconnected();
                tracing::warn!(%err, "state poll failed, retrying next interval");
            }
            tokio::time::sleep(self.interval).await;
        }
    }

    async fn iterate(&self) -> Result<(), HomeDashError> {
        let update = self.source.fetch_state().await?;
        tracing::debug!(timestamp = %update.timestamp, "state update received");
        self.store.apply_update(update);
        Ok(())
    }
}
