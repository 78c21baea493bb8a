//! State source port: where dashboard snapshots come from.

use std::future::Future;

use homedash_domain::error::HomeDashError;
use homedash_domain::snapshot::StateUpdate;

/// Produces the backend's current state on request.
pub trait StateSource {
    /// Fetch one state update.
    fn fetch_state(&self) -> impl Future<Output = Result<StateUpdate, HomeDashError>> + Send;
}

impl<T: StateSource + Send + Sync> StateSource for std::sync::Arc<T> {
    fn fetch_state(&self) -> impl Future<Output = Result<StateUpdate, HomeDashError>> + Send {
        (**self).fetch_state()
    }
}
