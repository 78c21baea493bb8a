//! Action commands: one closed set of wire values per action type.

use std::fmt;

use crate::error::ValidationError;

use super::fields::Field;

/// A selectable command: wire value plus form label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandOption {
    pub value: &'static str,
    pub label: &'static str,
}

macro_rules! define_command {
    (
        $(#[doc = $doc:expr])*
        $name:ident ($field:path) {
            $($variant:ident => $value:literal, $label:literal;)+
        }
    ) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const OPTIONS: &'static [CommandOption] = &[
                $(CommandOption { value: $value, label: $label }),+
            ];

            /// Wire value.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            /// Parse a wire value.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::MissingField`] for blank input and
            /// [`ValidationError::InvalidValue`] for unknown values.
            pub fn parse(raw: &str) -> Result<Self, ValidationError> {
                match raw.trim() {
                    "" => Err(ValidationError::MissingField { field: $field }),
                    $($value => Ok(Self::$variant),)+
                    _ => Err(ValidationError::InvalidValue {
                        field: $field,
                        value: raw.to_string(),
                        expected: expected_one_of(Self::OPTIONS),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

fn expected_one_of(options: &[CommandOption]) -> String {
    let values: Vec<&str> = options.iter().map(|o| o.value).collect();
    format!("one of {}", values.join(", "))
}

define_command! {
    /// Fan commands.
    FanCommand (Field::Command) {
        On => "on", "Turn On";
        Off => "off", "Turn Off";
        Toggle => "toggle", "Toggle";
    }
}

define_command! {
    /// Light commands.
    LightCommand (Field::Command) {
        On => "on", "Turn On";
        Off => "off", "Turn Off";
        Auto => "auto", "Auto (Motion Based)";
    }
}

define_command! {
    /// Door lock commands.
    DoorCommand (Field::Command) {
        Lock => "lock", "Lock";
        Unlock => "unlock", "Unlock";
        Auto => "auto", "Auto (Face Recognition)";
    }
}

define_command! {
    /// Garage door commands.
    GarageCommand (Field::Command) {
        Open => "open", "Open";
        Close => "close", "Close";
        Auto => "auto", "Auto Control";
    }
}

define_command! {
    /// Alert commands, before the sound selection is attached.
    AlertMode (Field::Command) {
        Emergency => "emergency", "Emergency Alert";
        Sound => "sound", "Play Sound";
    }
}

define_command! {
    /// Buzzer patterns the backend can play.
    AlertSound (Field::AlertType) {
        Gas => "gas", "Gas";
        DoorOpen => "door_open", "Door Open";
        DoorClose => "door_close", "Door Close";
        Unauthorized => "unauthorized", "Unauthorized";
        Welcome => "welcome", "Welcome";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_commands_by_wire_value() {
        assert_eq!(FanCommand::parse("toggle").unwrap(), FanCommand::Toggle);
        assert_eq!(DoorCommand::parse(" auto ").unwrap(), DoorCommand::Auto);
        assert_eq!(
            AlertSound::parse("door_open").unwrap(),
            AlertSound::DoorOpen
        );
    }

    #[test]
    fn should_reject_command_from_another_action_type() {
        let err = FanCommand::parse("lock").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidValue {
                field: Field::Command,
                value: "lock".to_string(),
                expected: "one of on, off, toggle".to_string(),
            }
        );
    }

    #[test]
    fn should_report_blank_command_as_missing() {
        assert_eq!(
            LightCommand::parse(""),
            Err(ValidationError::MissingField {
                field: Field::Command
            })
        );
    }

    #[test]
    fn should_attribute_unknown_sound_to_alert_type_field() {
        assert!(matches!(
            AlertSound::parse("siren"),
            Err(ValidationError::InvalidValue {
                field: Field::AlertType,
                ..
            })
        ));
    }

    #[test]
    fn should_keep_options_aligned_with_variants() {
        assert_eq!(GarageCommand::ALL.len(), GarageCommand::OPTIONS.len());
        for (cmd, option) in GarageCommand::ALL.iter().zip(GarageCommand::OPTIONS) {
            assert_eq!(cmd.as_str(), option.value);
        }
    }
}
