//! Field descriptors: which form fields each condition/action type needs.
//!
//! This table is the single source of truth for type-conditional fields.
//! Validation consults it to decide what must be present, and renderers
//! consult it to decide what to show.

use std::fmt;

use super::action::ActionKind;
use super::command::CommandOption;
use super::condition::ConditionKind;
use super::operator::Operator;

/// A field of the rule form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    ConditionType,
    Operator,
    Value,
    ConditionLocation,
    ActionType,
    Command,
    ActionLocation,
    AlertType,
}

impl Field {
    /// Stable form-control identifier.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Id => "rule-id",
            Self::Name => "rule-name",
            Self::ConditionType => "condition-type",
            Self::Operator => "condition-operator",
            Self::Value => "condition-value",
            Self::ConditionLocation => "condition-location",
            Self::ActionType => "action-type",
            Self::Command => "action-command",
            Self::ActionLocation => "action-location",
            Self::AlertType => "alert-type",
        }
    }

    /// Wildcard selector values offered ahead of room names.
    #[must_use]
    pub fn special_values(self) -> &'static [&'static str] {
        match self {
            Self::ConditionLocation => &["any"],
            Self::ActionLocation => &["all", "same"],
            _ => &[],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Id => "rule id",
            Self::Name => "rule name",
            Self::ConditionType => "condition type",
            Self::Operator => "operator",
            Self::Value => "condition value",
            Self::ConditionLocation => "condition location",
            Self::ActionType => "action type",
            Self::Command => "command",
            Self::ActionLocation => "action location",
            Self::AlertType => "alert type",
        })
    }
}

/// When an optional field is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    /// Only when the action command has this wire value.
    WhenCommand(&'static str),
}

/// An optional field together with the condition under which it is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRequirement {
    pub field: Field,
    pub when: Requirement,
}

impl FieldRequirement {
    const fn always(field: Field) -> Self {
        Self {
            field,
            when: Requirement::Always,
        }
    }

    const fn when_command(field: Field, command: &'static str) -> Self {
        Self {
            field,
            when: Requirement::WhenCommand(command),
        }
    }

    /// Whether the field is required for the given (raw) command.
    #[must_use]
    pub fn applies_to(&self, command: &str) -> bool {
        match self.when {
            Requirement::Always => true,
            Requirement::WhenCommand(expected) => command.trim() == expected,
        }
    }
}

/// A condition or action type selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    Condition(ConditionKind),
    Action(ActionKind),
}

impl From<ConditionKind> for RuleType {
    fn from(kind: ConditionKind) -> Self {
        Self::Condition(kind)
    }
}

impl From<ActionKind> for RuleType {
    fn from(kind: ActionKind) -> Self {
        Self::Action(kind)
    }
}

const NONE: &[FieldRequirement] = &[];
const MOTION: &[FieldRequirement] = &[FieldRequirement::always(Field::ConditionLocation)];
const LIGHT: &[FieldRequirement] = &[FieldRequirement::always(Field::ActionLocation)];
const ALERT: &[FieldRequirement] = &[FieldRequirement::when_command(Field::AlertType, "sound")];

/// Optional fields a condition or action type may require.
#[must_use]
pub fn fields_for(kind: impl Into<RuleType>) -> &'static [FieldRequirement] {
    match kind.into() {
        RuleType::Condition(ConditionKind::Motion) => MOTION,
        RuleType::Action(ActionKind::Light) => LIGHT,
        RuleType::Action(ActionKind::Alert) => ALERT,
        RuleType::Condition(_) | RuleType::Action(_) => NONE,
    }
}

/// Whether `field` is required for `kind` with the given raw command.
///
/// Condition types ignore `command`.
#[must_use]
pub fn requires(kind: impl Into<RuleType>, field: Field, command: &str) -> bool {
    fields_for(kind)
        .iter()
        .any(|req| req.field == field && req.applies_to(command))
}

/// How the condition value is entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueInput {
    Number {
        min: f64,
        max: f64,
        step: f64,
        unit: &'static str,
    },
    /// A yes/no select, submitted as `"true"` / `"false"`.
    Boolean,
    /// A 24-hour `HH:MM` time.
    Time,
}

/// Value input plus the help text shown under it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueField {
    pub input: ValueInput,
    pub help: &'static str,
}

impl ConditionKind {
    /// Value descriptor for this condition type.
    #[must_use]
    pub fn value_field(self) -> ValueField {
        match self {
            Self::Temperature => ValueField {
                input: ValueInput::Number {
                    min: 0.0,
                    max: 50.0,
                    step: 0.1,
                    unit: "°C",
                },
                help: "Temperature value in °C",
            },
            Self::Humidity => ValueField {
                input: ValueInput::Number {
                    min: 0.0,
                    max: 100.0,
                    step: 0.1,
                    unit: "%",
                },
                help: "Humidity value in %",
            },
            Self::Motion => ValueField {
                input: ValueInput::Boolean,
                help: "Whether motion is detected or not",
            },
            Self::Gas => ValueField {
                input: ValueInput::Boolean,
                help: "Whether gas is detected or not",
            },
            Self::Time => ValueField {
                input: ValueInput::Time,
                help: "Time in 24-hour format (HH:MM)",
            },
        }
    }

    /// Operators offered for this condition type.
    #[must_use]
    pub fn operators(self) -> &'static [Operator] {
        &Operator::ALL
    }
}

impl ActionKind {
    /// Command options offered for this action type.
    #[must_use]
    pub fn commands(self) -> &'static [CommandOption] {
        use super::command::{AlertMode, DoorCommand, FanCommand, GarageCommand, LightCommand};

        match self {
            Self::Fan => FanCommand::OPTIONS,
            Self::Light => LightCommand::OPTIONS,
            Self::Door => DoorCommand::OPTIONS,
            Self::Alert => AlertMode::OPTIONS,
            Self::Garage => GarageCommand::OPTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_require_location_for_motion_only() {
        for kind in ConditionKind::ALL {
            let needs = requires(*kind, Field::ConditionLocation, "");
            assert_eq!(needs, *kind == ConditionKind::Motion, "{kind}");
        }
    }

    #[test]
    fn should_require_location_for_light_regardless_of_command() {
        assert!(requires(ActionKind::Light, Field::ActionLocation, "on"));
        assert!(requires(ActionKind::Light, Field::ActionLocation, "auto"));
        assert!(!requires(ActionKind::Fan, Field::ActionLocation, "on"));
    }

    #[test]
    fn should_require_alert_type_only_for_sound_command() {
        assert!(requires(ActionKind::Alert, Field::AlertType, "sound"));
        assert!(!requires(ActionKind::Alert, Field::AlertType, "emergency"));
        assert!(!requires(ActionKind::Door, Field::AlertType, "sound"));
    }

    #[test]
    fn should_describe_numeric_range_for_temperature() {
        let field = ConditionKind::Temperature.value_field();
        assert_eq!(
            field.input,
            ValueInput::Number {
                min: 0.0,
                max: 50.0,
                step: 0.1,
                unit: "°C"
            }
        );
    }

    #[test]
    fn should_offer_boolean_input_for_motion_and_gas() {
        assert_eq!(
            ConditionKind::Motion.value_field().input,
            ValueInput::Boolean
        );
        assert_eq!(ConditionKind::Gas.value_field().input, ValueInput::Boolean);
    }

    #[test]
    fn should_list_commands_per_action_type() {
        let values = |kind: ActionKind| {
            kind.commands()
                .iter()
                .map(|o| o.value)
                .collect::<Vec<_>>()
        };
        assert_eq!(values(ActionKind::Fan), ["on", "off", "toggle"]);
        assert_eq!(values(ActionKind::Light), ["on", "off", "auto"]);
        assert_eq!(values(ActionKind::Door), ["lock", "unlock", "auto"]);
        assert_eq!(values(ActionKind::Alert), ["emergency", "sound"]);
        assert_eq!(values(ActionKind::Garage), ["open", "close", "auto"]);
    }

    #[test]
    fn should_expose_form_control_ids() {
        assert_eq!(Field::ConditionLocation.id(), "condition-location");
        assert_eq!(Field::AlertType.id(), "alert-type");
    }
}
