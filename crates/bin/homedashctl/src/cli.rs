//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use homedash_domain::location::Room;
use homedash_domain::rule::{
    ActionKind, ConditionKind, DoorCommand, FanCommand, Field, GarageCommand, LightCommand,
    RuleForm, RuleType,
};

/// Manage the smart-home backend's automation rules from the terminal.
#[derive(Debug, Parser)]
#[command(name = "homedashctl", version)]
pub struct Cli {
    /// Config file (defaults to `homedash.toml` when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Automation rules.
    #[command(subcommand)]
    Rules(RulesCommand),
    /// Show which fields a condition or action type uses.
    Fields {
        /// A condition type (temperature, humidity, motion, gas, time) or an
        /// action type (fan, light, door, alert, garage).
        #[arg(value_parser = parse_rule_type)]
        kind: RuleType,
    },
    /// Drive a device by hand, or hand it back to automatic control.
    #[command(subcommand)]
    Control(ControlCommand),
    /// Poll the backend and print every state update.
    Watch,
}

#[derive(Debug, Subcommand)]
pub enum ControlCommand {
    /// Fans: on, off, toggle or auto.
    Fan {
        #[arg(value_parser = parse_fan)]
        command: FanSetting,
    },
    /// One room's light: on, off or auto.
    Light {
        #[arg(value_parser = parse_room)]
        room: Room,
        #[arg(value_parser = parse_light)]
        command: LightCommand,
    },
    /// Door lock: lock, unlock or auto.
    Door {
        #[arg(value_parser = parse_door)]
        command: DoorCommand,
    },
    /// Garage door: open, close or auto.
    Garage {
        #[arg(value_parser = parse_garage)]
        command: GarageCommand,
    },
}

/// A fan command, or the hand-back to temperature control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanSetting {
    Manual(FanCommand),
    Auto,
}

#[derive(Debug, Subcommand)]
pub enum RulesCommand {
    /// List all rules.
    List,
    /// Show one rule.
    Show { id: String },
    /// Create a rule.
    Create(RuleArgs),
    /// Edit a rule; fields not given keep their current value.
    Edit {
        id: String,
        #[command(flatten)]
        fields: RuleArgs,
    },
    /// Activate, deactivate or flip a rule.
    Toggle {
        id: String,
        #[arg(long, conflicts_with = "off")]
        on: bool,
        #[arg(long)]
        off: bool,
    },
    /// Delete a rule.
    Delete { id: String },
    /// Replace every rule with the backend's defaults.
    Reset,
}

/// Rule form fields as flags.
#[derive(Debug, Default, Args)]
pub struct RuleArgs {
    #[arg(long)]
    pub name: Option<String>,
    /// Condition type.
    #[arg(long = "condition", value_name = "TYPE")]
    pub condition_type: Option<String>,
    /// One of `==`, `!=`, `>`, `<`, `>=`, `<=`.
    #[arg(long, allow_hyphen_values = true)]
    pub operator: Option<String>,
    /// Number, `true`/`false` or `HH:MM` depending on the condition type.
    #[arg(long, allow_hyphen_values = true)]
    pub value: Option<String>,
    /// Room (or `any`) for motion conditions.
    #[arg(long, value_name = "ROOM")]
    pub condition_location: Option<String>,
    /// Action type.
    #[arg(long = "action", value_name = "TYPE")]
    pub action_type: Option<String>,
    #[arg(long)]
    pub command: Option<String>,
    /// Room, `all` or `same` for light actions.
    #[arg(long, value_name = "ROOM")]
    pub action_location: Option<String>,
    /// Sound to play for `alert --command sound`.
    #[arg(long)]
    pub alert_type: Option<String>,
}

impl RuleArgs {
    /// Overwrite the form fields that were given on the command line.
    pub fn apply(self, form: &mut RuleForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(kind) = self.condition_type {
            form.condition_type = kind;
        }
        if let Some(operator) = self.operator {
            form.operator = operator;
        }
        if let Some(value) = self.value {
            form.value = value;
        }
        if self.condition_location.is_some() {
            form.condition_location = self.condition_location;
        }
        if let Some(kind) = self.action_type {
            form.action_type = kind;
        }
        if let Some(command) = self.command {
            form.command = command;
        }
        if self.action_location.is_some() {
            form.action_location = self.action_location;
        }
        if self.alert_type.is_some() {
            form.alert_type = self.alert_type;
        }
    }
}

/// The toggle's requested state; `None` flips it.
#[must_use]
pub fn toggle_target(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn parse_fan(raw: &str) -> Result<FanSetting, String> {
    if raw.trim() == "auto" {
        return Ok(FanSetting::Auto);
    }
    FanCommand::parse(raw)
        .map(FanSetting::Manual)
        .map_err(|_| format!("{raw:?} is not one of on, off, toggle, auto"))
}

fn parse_light(raw: &str) -> Result<LightCommand, String> {
    LightCommand::parse(raw).map_err(|err| err.to_string())
}

fn parse_door(raw: &str) -> Result<DoorCommand, String> {
    DoorCommand::parse(raw).map_err(|err| err.to_string())
}

fn parse_garage(raw: &str) -> Result<GarageCommand, String> {
    GarageCommand::parse(raw).map_err(|err| err.to_string())
}

fn parse_room(raw: &str) -> Result<Room, String> {
    Room::parse(raw, Field::ActionLocation).map_err(|err| err.to_string())
}

fn parse_rule_type(raw: &str) -> Result<RuleType, String> {
    if let Ok(kind) = raw.parse::<ConditionKind>() {
        return Ok(kind.into());
    }
    raw.parse::<ActionKind>()
        .map(RuleType::from)
        .map_err(|_| format!("{raw:?} is neither a condition nor an action type"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("homedashctl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn should_parse_create_with_form_flags() {
        let cli = parse(&[
            "rules",
            "create",
            "--name",
            "Night light",
            "--condition",
            "time",
            "--operator",
            ">=",
            "--value",
            "22:00",
            "--action",
            "light",
            "--command",
            "on",
            "--action-location",
            "LivingRoom",
        ]);
        let Command::Rules(RulesCommand::Create(args)) = cli.command else {
            panic!("expected rules create");
        };
        let mut form = RuleForm::default();
        args.apply(&mut form);
        let rule = form.validate().unwrap();
        assert_eq!(rule.action.to_string(), "Turn on lights in Living Room");
    }

    #[test]
    fn should_keep_unspecified_fields_when_editing() {
        let cli = parse(&["rules", "edit", "rule1", "--value", "28"]);
        let Command::Rules(RulesCommand::Edit { id, fields }) = cli.command else {
            panic!("expected rules edit");
        };
        assert_eq!(id, "rule1");
        let mut form = RuleForm {
            name: "Temperature Fan Control".to_string(),
            condition_type: "temperature".to_string(),
            operator: ">".to_string(),
            value: "25".to_string(),
            ..RuleForm::default()
        };
        fields.apply(&mut form);
        assert_eq!(form.value, "28");
        assert_eq!(form.operator, ">");
        assert_eq!(form.name, "Temperature Fan Control");
    }

    #[test]
    fn should_resolve_toggle_target() {
        assert_eq!(toggle_target(true, false), Some(true));
        assert_eq!(toggle_target(false, true), Some(false));
        assert_eq!(toggle_target(false, false), None);
    }

    #[test]
    fn should_reject_both_on_and_off() {
        let result =
            Cli::try_parse_from(["homedashctl", "rules", "toggle", "rule1", "--on", "--off"]);
        assert!(result.is_err());
    }

    #[test]
    fn should_parse_fields_kind() {
        let cli = parse(&["fields", "alert"]);
        assert!(matches!(
            cli.command,
            Command::Fields {
                kind: RuleType::Action(ActionKind::Alert)
            }
        ));
        let cli = parse(&["fields", "motion"]);
        assert!(matches!(
            cli.command,
            Command::Fields {
                kind: RuleType::Condition(ConditionKind::Motion)
            }
        ));
    }

    #[test]
    fn should_parse_control_commands() {
        assert!(matches!(
            parse(&["control", "fan", "auto"]).command,
            Command::Control(ControlCommand::Fan {
                command: FanSetting::Auto
            })
        ));
        assert!(matches!(
            parse(&["control", "fan", "toggle"]).command,
            Command::Control(ControlCommand::Fan {
                command: FanSetting::Manual(FanCommand::Toggle)
            })
        ));
        let Command::Control(ControlCommand::Light { room, command }) =
            parse(&["control", "light", "LivingRoom", "off"]).command
        else {
            panic!("expected control light");
        };
        assert_eq!(room.as_str(), "LivingRoom");
        assert_eq!(command, LightCommand::Off);
        assert!(matches!(
            parse(&["control", "garage", "auto"]).command,
            Command::Control(ControlCommand::Garage {
                command: GarageCommand::Auto
            })
        ));
    }

    #[test]
    fn should_reject_command_of_another_device() {
        assert!(Cli::try_parse_from(["homedashctl", "control", "door", "open"]).is_err());
        assert!(Cli::try_parse_from(["homedashctl", "control", "fan", "lock"]).is_err());
    }

    #[test]
    fn should_reject_unknown_fields_kind() {
        assert!(Cli::try_parse_from(["homedashctl", "fields", "sprinkler"]).is_err());
    }
}
