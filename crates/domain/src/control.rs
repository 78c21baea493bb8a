//! Manual device control: commands sent from the dashboard's control panel.
//!
//! A manual command puts the device under manual override on the backend,
//! so automation rules stop driving it until it is handed back with
//! [`Setting::Auto`].

use std::fmt;

use crate::location::Room;
use crate::rule::{DoorCommand, FanCommand, GarageCommand, LightCommand};

/// A device the backend lets the dashboard drive by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Device {
    /// Both fans, driven together.
    Fans,
    /// One room's light.
    Light(Room),
    /// The front door lock.
    Door,
    /// The garage door.
    Garage,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fans => f.write_str("fans"),
            Self::Light(room) => write!(f, "lights in {}", room.display_name()),
            Self::Door => f.write_str("door"),
            Self::Garage => f.write_str("garage door"),
        }
    }
}

/// The requested device state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// Manual override: fans/light on, door locked, garage open when `true`.
    Manual(bool),
    /// Clear the manual override.
    Auto,
}

/// One control command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceCommand {
    pub device: Device,
    pub setting: Setting,
}

impl DeviceCommand {
    /// Fan command; `toggle` flips the current `fans_on` state.
    #[must_use]
    pub fn fans(command: FanCommand, fans_on: bool) -> Self {
        let on = match command {
            FanCommand::On => true,
            FanCommand::Off => false,
            FanCommand::Toggle => !fans_on,
        };
        Self {
            device: Device::Fans,
            setting: Setting::Manual(on),
        }
    }

    /// Hand the fans back to temperature control.
    #[must_use]
    pub fn fans_auto() -> Self {
        Self {
            device: Device::Fans,
            setting: Setting::Auto,
        }
    }

    #[must_use]
    pub fn light(room: Room, command: LightCommand) -> Self {
        let setting = match command {
            LightCommand::On => Setting::Manual(true),
            LightCommand::Off => Setting::Manual(false),
            LightCommand::Auto => Setting::Auto,
        };
        Self {
            device: Device::Light(room),
            setting,
        }
    }

    #[must_use]
    pub fn door(command: DoorCommand) -> Self {
        let setting = match command {
            DoorCommand::Lock => Setting::Manual(true),
            DoorCommand::Unlock => Setting::Manual(false),
            DoorCommand::Auto => Setting::Auto,
        };
        Self {
            device: Device::Door,
            setting,
        }
    }

    #[must_use]
    pub fn garage(command: GarageCommand) -> Self {
        let setting = match command {
            GarageCommand::Open => Setting::Manual(true),
            GarageCommand::Close => Setting::Manual(false),
            GarageCommand::Auto => Setting::Auto,
        };
        Self {
            device: Device::Garage,
            setting,
        }
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match (&self.device, self.setting) {
            (_, Setting::Auto) => return write!(f, "Return {} to auto mode", self.device),
            (Device::Fans | Device::Light(_), Setting::Manual(true)) => "Turn on",
            (Device::Fans | Device::Light(_), Setting::Manual(false)) => "Turn off",
            (Device::Door, Setting::Manual(true)) => "Lock",
            (Device::Door, Setting::Manual(false)) => "Unlock",
            (Device::Garage, Setting::Manual(true)) => "Open",
            (Device::Garage, Setting::Manual(false)) => "Close",
        };
        write!(f, "{verb} {}", self.device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Field;

    fn room(name: &str) -> Room {
        Room::parse(name, Field::ActionLocation).unwrap()
    }

    #[test]
    fn should_flip_fans_when_toggling() {
        assert_eq!(
            DeviceCommand::fans(FanCommand::Toggle, true).setting,
            Setting::Manual(false)
        );
        assert_eq!(
            DeviceCommand::fans(FanCommand::Toggle, false).setting,
            Setting::Manual(true)
        );
        assert_eq!(
            DeviceCommand::fans(FanCommand::Off, false).setting,
            Setting::Manual(false)
        );
    }

    #[test]
    fn should_map_auto_commands_to_auto_setting() {
        assert_eq!(
            DeviceCommand::light(room("Room1"), LightCommand::Auto).setting,
            Setting::Auto
        );
        assert_eq!(DeviceCommand::door(DoorCommand::Auto).setting, Setting::Auto);
        assert_eq!(
            DeviceCommand::garage(GarageCommand::Auto).setting,
            Setting::Auto
        );
    }

    #[test]
    fn should_describe_commands() {
        assert_eq!(
            DeviceCommand::light(room("LivingRoom"), LightCommand::On).to_string(),
            "Turn on lights in Living Room"
        );
        assert_eq!(
            DeviceCommand::door(DoorCommand::Unlock).to_string(),
            "Unlock door"
        );
        assert_eq!(
            DeviceCommand::garage(GarageCommand::Close).to_string(),
            "Close garage door"
        );
        assert_eq!(
            DeviceCommand::fans_auto().to_string(),
            "Return fans to auto mode"
        );
    }
}
