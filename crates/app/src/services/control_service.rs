//! Control service: use-cases behind the control panel's device buttons.

use homedash_domain::control::DeviceCommand;
use homedash_domain::error::HomeDashError;
use homedash_domain::location::Room;
use homedash_domain::rule::{DoorCommand, FanCommand, GarageCommand, LightCommand};

use crate::ports::{DeviceControl, StateSource};

/// Application service for manual device control.
///
/// Each operation returns the command that was sent.
pub struct ControlService<B> {
    backend: B,
}

impl<B: DeviceControl + StateSource> ControlService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Switch the fans by hand. `toggle` reads the current state first.
    ///
    /// # Errors
    ///
    /// Returns the error propagated from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn fans(&self, command: FanCommand) -> Result<DeviceCommand, HomeDashError> {
        let fans_on = match command {
            FanCommand::Toggle => self.backend.fetch_state().await?.data.fans_on,
            FanCommand::On | FanCommand::Off => false,
        };
        self.send(DeviceCommand::fans(command, fans_on)).await
    }

    /// # Errors
    ///
    /// Returns the error propagated from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn fans_auto(&self) -> Result<DeviceCommand, HomeDashError> {
        self.send(DeviceCommand::fans_auto()).await
    }

    /// # Errors
    ///
    /// Returns the error propagated from the backend.
    #[tracing::instrument(skip(self, room), fields(room = %room))]
    pub async fn light(
        &self,
        room: Room,
        command: LightCommand,
    ) -> Result<DeviceCommand, HomeDashError> {
        self.send(DeviceCommand::light(room, command)).await
    }

    /// # Errors
    ///
    /// Returns the error propagated from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn door(&self, command: DoorCommand) -> Result<DeviceCommand, HomeDashError> {
        self.send(DeviceCommand::door(command)).await
    }

    /// # Errors
    ///
    /// Returns the error propagated from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn garage(&self, command: GarageCommand) -> Result<DeviceCommand, HomeDashError> {
        self.send(DeviceCommand::garage(command)).await
    }

    async fn send(&self, command: DeviceCommand) -> Result<DeviceCommand, HomeDashError> {
        self.backend.send_command(&command).await?;
        tracing::debug!(%command, "device command sent");
        Ok(command)
    }
}
