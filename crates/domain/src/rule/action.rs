//! Action: the device effect a rule performs when its condition holds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::location::LightTarget;

use super::command::{AlertMode, AlertSound, DoorCommand, FanCommand, GarageCommand, LightCommand};
use super::condition::required_for_command;
use super::fields::Field;
use super::wire::WireAction;

/// The `type` tag of an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Fan,
    Light,
    Door,
    Alert,
    Garage,
}

impl ActionKind {
    pub const ALL: &'static [Self] = &[
        Self::Fan,
        Self::Light,
        Self::Door,
        Self::Alert,
        Self::Garage,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fan => "fan",
            Self::Light => "light",
            Self::Door => "door",
            Self::Alert => "alert",
            Self::Garage => "garage",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField {
                field: Field::ActionType,
            });
        }
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == trimmed)
            .ok_or_else(|| ValidationError::UnknownType {
                field: Field::ActionType,
                value: s.to_string(),
            })
    }
}

/// An alert command; only `sound` carries an alert type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertCommand {
    Emergency,
    Sound(AlertSound),
}

impl AlertCommand {
    #[must_use]
    pub fn mode(self) -> AlertMode {
        match self {
            Self::Emergency => AlertMode::Emergency,
            Self::Sound(_) => AlertMode::Sound,
        }
    }
}

/// A device operation requested by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireAction", into = "WireAction")]
pub enum Action {
    Fan { command: FanCommand },
    Light {
        command: LightCommand,
        location: LightTarget,
    },
    Door { command: DoorCommand },
    Alert { command: AlertCommand },
    Garage { command: GarageCommand },
}

impl Action {
    /// Build an action from a type selection and raw field strings.
    ///
    /// `location` and `alert_type` are only read when the type/command
    /// combination requires them.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::UnknownType`] for an unrecognised `kind`
    /// - [`ValidationError::InvalidValue`] for a command (or alert type)
    ///   outside the type's set
    /// - [`ValidationError::MissingField`] for a blank command or a required
    ///   location / alert type that is absent
    pub fn parse(
        kind: &str,
        command: &str,
        location: Option<&str>,
        alert_type: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let kind: ActionKind = kind.parse()?;
        let location = required_for_command(kind, Field::ActionLocation, command, location)?;
        let alert_type = required_for_command(kind, Field::AlertType, command, alert_type)?;

        let action = match kind {
            ActionKind::Fan => Self::Fan {
                command: FanCommand::parse(command)?,
            },
            ActionKind::Light => Self::Light {
                command: LightCommand::parse(command)?,
                location: LightTarget::parse(location.unwrap_or_default())?,
            },
            ActionKind::Door => Self::Door {
                command: DoorCommand::parse(command)?,
            },
            ActionKind::Alert => {
                let command = match AlertMode::parse(command)? {
                    AlertMode::Emergency => AlertCommand::Emergency,
                    AlertMode::Sound => {
                        AlertCommand::Sound(AlertSound::parse(alert_type.unwrap_or_default())?)
                    }
                };
                Self::Alert { command }
            }
            ActionKind::Garage => Self::Garage {
                command: GarageCommand::parse(command)?,
            },
        };
        Ok(action)
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Fan { .. } => ActionKind::Fan,
            Self::Light { .. } => ActionKind::Light,
            Self::Door { .. } => ActionKind::Door,
            Self::Alert { .. } => ActionKind::Alert,
            Self::Garage { .. } => ActionKind::Garage,
        }
    }

    /// Wire value of the command.
    #[must_use]
    pub fn command_str(&self) -> &'static str {
        match self {
            Self::Fan { command } => command.as_str(),
            Self::Light { command, .. } => command.as_str(),
            Self::Door { command } => command.as_str(),
            Self::Alert { command } => command.mode().as_str(),
            Self::Garage { command } => command.as_str(),
        }
    }

    #[must_use]
    pub fn location(&self) -> Option<&LightTarget> {
        match self {
            Self::Light { location, .. } => Some(location),
            _ => None,
        }
    }

    #[must_use]
    pub fn alert_type(&self) -> Option<AlertSound> {
        match self {
            Self::Alert {
                command: AlertCommand::Sound(sound),
            } => Some(*sound),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fan { command } => {
                let verb = match command {
                    FanCommand::On => "Turn on",
                    FanCommand::Off => "Turn off",
                    FanCommand::Toggle => "Toggle",
                };
                write!(f, "{verb} fans")
            }
            Self::Light { command, location } => {
                let verb = match command {
                    LightCommand::On => "Turn on",
                    LightCommand::Off => "Turn off",
                    LightCommand::Auto => "Set to auto mode",
                };
                write!(f, "{verb} lights in {}", location.display_name())
            }
            Self::Door { command } => {
                let verb = match command {
                    DoorCommand::Lock => "Lock",
                    DoorCommand::Unlock => "Unlock",
                    DoorCommand::Auto => "Set to auto mode",
                };
                write!(f, "{verb} door")
            }
            Self::Alert {
                command: AlertCommand::Emergency,
            } => f.write_str("Trigger emergency alert"),
            Self::Alert {
                command: AlertCommand::Sound(sound),
            } => write!(f, "Play {sound} sound alert"),
            Self::Garage { command } => {
                let verb = match command {
                    GarageCommand::Open => "Open",
                    GarageCommand::Close => "Close",
                    GarageCommand::Auto => "Set to auto mode",
                };
                write!(f, "{verb} garage door")
            }
        }
    }
}
