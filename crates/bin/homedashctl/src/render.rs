//! Plain-text rendering of rules, field descriptors and dashboard state.

use homedash_app::dashboard::DashboardView;
use homedash_domain::rule::{
    AlertSound, Field, FieldRequirement, Requirement, Rule, RuleType, ValueInput,
    describe_action, describe_condition, fields_for,
};

/// One line per rule: id, status and name.
#[must_use]
pub fn rule_summary(rule: &Rule) -> String {
    let id = rule.id.as_ref().map_or("-", |id| id.as_str());
    let status = if rule.active { "active" } else { "inactive" };
    format!("{id:<8} [{status}] {}", rule.name)
}

/// Summary plus the rule's condition and action sentences.
#[must_use]
pub fn rule_details(rule: &Rule) -> String {
    format!(
        "{}\n  when {}\n  then {}",
        rule_summary(rule),
        describe_condition(&rule.condition),
        describe_action(&rule.action)
    )
}

fn requirement(req: &FieldRequirement) -> String {
    let values = match req.field {
        Field::AlertType => AlertSound::OPTIONS
            .iter()
            .map(|o| o.value)
            .collect::<Vec<_>>()
            .join(", "),
        field => {
            let mut values: Vec<&str> = field.special_values().to_vec();
            values.push("<room>");
            values.join(" | ")
        }
    };
    match req.when {
        Requirement::Always => format!("required: {values}"),
        Requirement::WhenCommand(command) => {
            format!("required when command is {command}: {values}")
        }
    }
}

fn value_input(input: ValueInput) -> String {
    match input {
        ValueInput::Number {
            min,
            max,
            step,
            unit,
        } => format!("number from {min} to {max}{unit} (step {step})"),
        ValueInput::Boolean => "true | false".to_string(),
        ValueInput::Time => "HH:MM".to_string(),
    }
}

/// Field descriptor table for a condition or action type.
#[must_use]
pub fn fields_table(kind: RuleType) -> String {
    let mut lines = match kind {
        RuleType::Condition(kind) => {
            let operators: Vec<&str> = kind.operators().iter().map(|op| op.symbol()).collect();
            let value = kind.value_field();
            vec![
                format!("condition type {kind}"),
                format!("  {:<20} {}", Field::Operator.id(), operators.join(" ")),
                format!(
                    "  {:<20} {} ({})",
                    Field::Value.id(),
                    value_input(value.input),
                    value.help
                ),
            ]
        }
        RuleType::Action(kind) => {
            let commands: Vec<String> = kind
                .commands()
                .iter()
                .map(|o| format!("{} ({})", o.value, o.label))
                .collect();
            vec![
                format!("action type {kind}"),
                format!("  {:<20} {}", Field::Command.id(), commands.join(", ")),
            ]
        }
    };
    lines.extend(
        fields_for(kind)
            .iter()
            .map(|req| format!("  {:<20} {}", req.field.id(), requirement(req))),
    );
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

/// One line describing the dashboard's current view.
#[must_use]
pub fn state_line(view: &DashboardView) -> String {
    let at = view.last_update.map_or_else(
        || "--:--:--".to_string(),
        |ts| ts.format("%H:%M:%S").to_string(),
    );
    let link = if view.connected {
        "connected"
    } else {
        "disconnected"
    };
    let Some(state) = &view.state else {
        return format!("[{at}] {link}, no state yet");
    };
    let motion: Vec<&str> = state.rooms_with_motion().collect();
    let motion = if motion.is_empty() {
        "none".to_string()
    } else {
        motion.join(", ")
    };
    format!(
        "[{at}] {link} | {:.1}°C {:.1}% | gas {} | fans {} | door {} | garage {} | motion: {motion}{}",
        state.temperature,
        state.humidity,
        if state.gas_detected { "DETECTED" } else { "ok" },
        on_off(state.fans_on),
        if state.door_locked { "locked" } else { "unlocked" },
        if state.garage_door_open { "open" } else { "closed" },
        if state.emergency_mode { " | EMERGENCY" } else { "" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_domain::rule::{ActionKind, ConditionKind, RuleForm};
    use homedash_domain::snapshot::StateSnapshot;

    fn gas_rule(active: bool) -> Rule {
        RuleForm {
            id: "rule3".to_string(),
            name: "Gas Emergency".to_string(),
            condition_type: "gas".to_string(),
            operator: "==".to_string(),
            value: "true".to_string(),
            action_type: "alert".to_string(),
            command: "emergency".to_string(),
            active,
            ..RuleForm::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn should_render_rule_details_with_sentences() {
        assert_eq!(
            rule_details(&gas_rule(false)),
            "rule3    [inactive] Gas Emergency\n  when Gas leak detected equals Yes\n  then Trigger emergency alert"
        );
    }

    #[test]
    fn should_list_location_for_motion_fields() {
        let table = fields_table(ConditionKind::Motion.into());
        assert!(table.contains("condition-operator   == != > < >= <="));
        assert!(table.contains("condition-location   required: any | <room>"));
    }

    #[test]
    fn should_show_range_for_temperature_fields() {
        let table = fields_table(ConditionKind::Temperature.into());
        assert!(table.contains("number from 0 to 50°C (step 0.1)"));
        assert!(!table.contains("condition-location"));
    }

    #[test]
    fn should_gate_alert_type_on_sound_command() {
        let table = fields_table(ActionKind::Alert.into());
        assert!(table.contains("emergency (Emergency Alert), sound (Play Sound)"));
        assert!(table.contains(
            "alert-type           required when command is sound: gas, door_open, door_close, unauthorized, welcome"
        ));
    }

    #[test]
    fn should_end_every_table_line_with_newline() {
        let table = fields_table(ActionKind::Light.into());
        assert!(table.starts_with("action type light\n"));
        assert!(table.ends_with("\n"));
        assert_eq!(table.lines().count(), 3);
    }

    #[test]
    fn should_render_placeholder_before_first_update() {
        assert_eq!(
            state_line(&DashboardView::default()),
            "[--:--:--] disconnected, no state yet"
        );
    }

    #[test]
    fn should_render_state_with_motion_rooms() {
        let mut state = StateSnapshot {
            temperature: 24.3,
            humidity: 40.0,
            fans_on: true,
            door_locked: true,
            ..StateSnapshot::default()
        };
        state.motion.insert("LivingRoom".to_string(), true);
        state.motion.insert("Room1".to_string(), false);
        let view = DashboardView {
            state: Some(state),
            connected: true,
            ..DashboardView::default()
        };
        assert_eq!(
            state_line(&view),
            "[--:--:--] connected | 24.3°C 40.0% | gas ok | fans on | door locked | garage closed | motion: LivingRoom"
        );
    }
}
