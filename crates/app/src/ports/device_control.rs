//! Device control port: manual overrides on the backend's devices.

use std::future::Future;

use homedash_domain::control::DeviceCommand;
use homedash_domain::error::HomeDashError;

/// Sends manual commands to the backend's devices.
pub trait DeviceControl {
    /// Apply one command, or hand the device back to automatic control.
    fn send_command(
        &self,
        command: &DeviceCommand,
    ) -> impl Future<Output = Result<(), HomeDashError>> + Send;
}

impl<T: DeviceControl + Send + Sync> DeviceControl for std::sync::Arc<T> {
    fn send_command(
        &self,
        command: &DeviceCommand,
    ) -> impl Future<Output = Result<(), HomeDashError>> + Send {
        (**self).send_command(command)
    }
}
