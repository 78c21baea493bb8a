//! Form binding: raw user input to a validated [`Rule`] and back.

use crate::error::ValidationError;
use crate::id::RuleId;

use super::{Action, Condition, Rule};

/// The rule editor's fields, as raw strings.
///
/// Optional fields are only read when the selected type/command needs
/// them; stale values left over from a previous selection are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleForm {
    /// Blank for a rule that has not been created yet.
    pub id: String,
    pub name: String,
    pub condition_type: String,
    pub operator: String,
    pub value: String,
    pub condition_location: Option<String>,
    pub action_type: String,
    pub command: String,
    pub action_location: Option<String>,
    pub alert_type: Option<String>,
    pub active: bool,
}

impl Default for RuleForm {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            condition_type: String::new(),
            operator: String::new(),
            value: String::new(),
            condition_location: None,
            action_type: String::new(),
            command: String::new(),
            action_location: None,
            alert_type: None,
            active: true,
        }
    }
}

impl RuleForm {
    /// Validate the form and build a well-typed [`Rule`].
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyName`] when the name is blank
    /// - [`ValidationError::UnknownType`] for an unrecognised type selection
    /// - [`ValidationError::InvalidValue`] for an unparsable or out-of-range
    ///   value, or a command outside the type's set
    /// - [`ValidationError::MissingField`] when a field required by the
    ///   type/command combination is absent
    pub fn validate(&self) -> Result<Rule, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let id = match self.id.trim() {
            "" => None,
            raw => Some(raw.parse::<RuleId>()?),
        };
        let condition = Condition::parse(
            &self.condition_type,
            &self.operator,
            &self.value,
            self.condition_location.as_deref(),
        )?;
        let action = Action::parse(
            &self.action_type,
            &self.command,
            self.action_location.as_deref(),
            self.alert_type.as_deref(),
        )?;
        let rule = Rule {
            id,
            name: self.name.clone(),
            condition,
            action,
            active: self.active,
        };
        rule.validate()?;
        Ok(rule)
    }
}

impl From<&Rule> for RuleForm {
    fn from(rule: &Rule) -> Self {
        let condition_location = match &rule.condition {
            Condition::Motion { location, .. } => Some(location.as_str().to_string()),
            _ => None,
        };
        Self {
            id: rule.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            name: rule.name.clone(),
            condition_type: rule.condition.kind().as_str().to_string(),
            operator: rule.condition.operator().symbol().to_string(),
            value: rule.condition.value_string(),
            condition_location,
            action_type: rule.action.kind().as_str().to_string(),
            command: rule.action.command_str().to_string(),
            action_location: rule.action.location().map(|l| l.as_str().to_string()),
            alert_type: rule.action.alert_type().map(|s| s.as_str().to_string()),
            active: rule.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Field, Operator};

    fn form(condition: (&str, &str, &str), action: (&str, &str)) -> RuleForm {
        RuleForm {
            name: "Test rule".to_string(),
            condition_type: condition.0.to_string(),
            operator: condition.1.to_string(),
            value: condition.2.to_string(),
            action_type: action.0.to_string(),
            command: action.1.to_string(),
            ..RuleForm::default()
        }
    }

    #[test]
    fn should_reject_blank_name() {
        let mut f = form(("gas", "==", "true"), ("fan", "on"));
        f.name = "  ".to_string();
        assert_eq!(f.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn should_reject_temperature_of_55() {
        let f = form(("temperature", ">", "55"), ("fan", "on"));
        assert!(matches!(
            f.validate(),
            Err(ValidationError::InvalidValue {
                field: Field::Value,
                ..
            })
        ));
    }

    #[test]
    fn should_accept_temperature_of_49_9() {
        let rule = form(("temperature", ">", "49.9"), ("fan", "on"))
            .validate()
            .unwrap();
        assert_eq!(
            rule.condition,
            Condition::Temperature {
                operator: Operator::Gt,
                value: 49.9
            }
        );
        assert!(rule.id.is_none());
        assert!(rule.active);
    }

    #[test]
    fn should_reject_light_on_without_location() {
        let f = form(("gas", "==", "true"), ("light", "on"));
        assert_eq!(
            f.validate(),
            Err(ValidationError::MissingField {
                field: Field::ActionLocation
            })
        );
    }

    #[test]
    fn should_reject_sound_alert_without_alert_type() {
        let f = form(("gas", "==", "true"), ("alert", "sound"));
        assert_eq!(
            f.validate(),
            Err(ValidationError::MissingField {
                field: Field::AlertType
            })
        );
    }

    #[test]
    fn should_accept_emergency_alert_without_alert_type() {
        let f = form(("gas", "==", "true"), ("alert", "emergency"));
        assert!(f.validate().is_ok());
    }

    #[test]
    fn should_keep_existing_id_when_editing() {
        let mut f = form(("gas", "==", "true"), ("alert", "emergency"));
        f.id = "rule3".to_string();
        assert_eq!(f.validate().unwrap().id, Some(RuleId::new("rule3")));
    }

    #[test]
    fn should_ignore_stale_optional_fields() {
        let mut f = form(("temperature", "<", "18"), ("door", "lock"));
        f.condition_location = Some("Room1".to_string());
        f.action_location = Some("all".to_string());
        f.alert_type = Some("gas".to_string());
        let rule = f.validate().unwrap();
        assert_eq!(RuleForm::from(&rule).action_location, None);
        assert_eq!(RuleForm::from(&rule).condition_location, None);
        assert_eq!(RuleForm::from(&rule).alert_type, None);
    }

    fn every_shape() -> Vec<RuleForm> {
        let conditions: [(&str, &str, &str, Option<&str>); 6] = [
            ("temperature", ">", "25.5", None),
            ("humidity", "<=", "70", None),
            ("motion", "==", "true", Some("any")),
            ("motion", "!=", "false", Some("LivingRoom")),
            ("gas", "==", "true", None),
            ("time", ">=", "22:00", None),
        ];
        let actions: [(&str, &str, Option<&str>, Option<&str>); 14] = [
            ("fan", "on", None, None),
            ("fan", "off", None, None),
            ("fan", "toggle", None, None),
            ("light", "on", Some("same"), None),
            ("light", "off", Some("all"), None),
            ("light", "auto", Some("Room2"), None),
            ("door", "lock", None, None),
            ("door", "unlock", None, None),
            ("door", "auto", None, None),
            ("alert", "emergency", None, None),
            ("alert", "sound", None, Some("welcome")),
            ("alert", "sound", None, Some("door_close")),
            ("garage", "open", None, None),
            ("garage", "auto", None, None),
        ];
        let mut forms = Vec::new();
        for (i, c) in conditions.iter().enumerate() {
            for a in &actions {
                forms.push(RuleForm {
                    id: format!("rule{i}"),
                    name: format!("{} then {}", c.0, a.0),
                    condition_type: c.0.to_string(),
                    operator: c.1.to_string(),
                    value: c.2.to_string(),
                    condition_location: c.3.map(str::to_string),
                    action_type: a.0.to_string(),
                    command: a.1.to_string(),
                    action_location: a.2.map(str::to_string),
                    alert_type: a.3.map(str::to_string),
                    active: i % 2 == 0,
                });
            }
        }
        forms
    }

    #[test]
    fn should_roundtrip_every_shape_through_the_form() {
        for f in every_shape() {
            let rule = f.validate().unwrap();
            let back = RuleForm::from(&rule).validate().unwrap();
            assert_eq!(back, rule, "{f:?}");
        }
    }

    #[test]
    fn should_keep_padded_name_through_the_form() {
        let rule: Rule = serde_json::from_value(serde_json::json!({
            "id": "rule5",
            "name": " Night Fan ",
            "condition": {"type": "time", "operator": ">=", "value": "22:00"},
            "action": {"type": "fan", "command": "on"},
            "active": true
        }))
        .unwrap();
        let back = RuleForm::from(&rule).validate().unwrap();
        assert_eq!(back.name, " Night Fan ");
        assert_eq!(back, rule);
    }

    #[test]
    fn should_roundtrip_every_shape_through_json() {
        for f in every_shape() {
            let rule = f.validate().unwrap();
            let json = serde_json::to_value(&rule).unwrap();
            let parsed: Rule = serde_json::from_value(json).unwrap();
            assert_eq!(parsed, rule, "{f:?}");
        }
    }

    #[test]
    fn should_populate_form_from_rule() {
        let mut f = form(("motion", "==", "true"), ("light", "on"));
        f.condition_location = Some("any".to_string());
        f.action_location = Some("same".to_string());
        let rule = f.validate().unwrap();
        assert_eq!(RuleForm::from(&rule), f);
    }
}
