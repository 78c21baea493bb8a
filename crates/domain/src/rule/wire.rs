//! Wire shape: the JSON the backend sends and accepts.
//!
//! The typed model is (de)serialized through these flat structs so that
//! payloads go through the same coercion as form input. `value` is a JSON
//! number, boolean or `"HH:MM"` string depending on the condition type;
//! `location` / `alert_type` appear only on shapes that carry them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::id::RuleId;

use super::fields::Field;
use super::{Action, Condition, Rule};

/// Flat JSON form of a [`Condition`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireCondition {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Flat JSON form of an [`Action`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAction {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<String>,
}

/// JSON form of a [`Rule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RuleId>,
    #[serde(default)]
    pub name: String,
    pub condition: WireCondition,
    pub action: WireAction,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Render a JSON value as the string a form field would hold.
fn value_as_field(value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Null => Err(ValidationError::MissingField { field: Field::Value }),
        Value::Array(_) | Value::Object(_) => Err(ValidationError::InvalidValue {
            field: Field::Value,
            value: value.to_string(),
            expected: "a number, boolean or HH:MM string".to_string(),
        }),
    }
}

impl TryFrom<WireCondition> for Condition {
    type Error = ValidationError;

    fn try_from(wire: WireCondition) -> Result<Self, Self::Error> {
        let value = value_as_field(&wire.value)?;
        Self::parse(&wire.kind, &wire.operator, &value, wire.location.as_deref())
    }
}

impl From<Condition> for WireCondition {
    fn from(condition: Condition) -> Self {
        let (value, location) = match &condition {
            Condition::Temperature { value, .. } | Condition::Humidity { value, .. } => {
                (Value::from(*value), None)
            }
            Condition::Motion {
                location, detected, ..
            } => (Value::Bool(*detected), Some(location.as_str().to_string())),
            Condition::Gas { detected, .. } => (Value::Bool(*detected), None),
            Condition::Time { at, .. } => (Value::String(at.to_string()), None),
        };
        Self {
            kind: condition.kind().as_str().to_string(),
            operator: condition.operator().symbol().to_string(),
            value,
            location,
        }
    }
}

impl TryFrom<WireAction> for Action {
    type Error = ValidationError;

    fn try_from(wire: WireAction) -> Result<Self, Self::Error> {
        Self::parse(
            &wire.kind,
            &wire.command,
            wire.location.as_deref(),
            wire.alert_type.as_deref(),
        )
    }
}

impl From<Action> for WireAction {
    fn from(action: Action) -> Self {
        Self {
            kind: action.kind().as_str().to_string(),
            command: action.command_str().to_string(),
            location: action.location().map(|l| l.as_str().to_string()),
            alert_type: action.alert_type().map(|s| s.as_str().to_string()),
        }
    }
}

impl TryFrom<WireRule> for Rule {
    type Error = ValidationError;

    fn try_from(wire: WireRule) -> Result<Self, Self::Error> {
        let rule = Self {
            id: wire.id,
            name: wire.name,
            condition: wire.condition.try_into()?,
            action: wire.action.try_into()?,
            active: wire.active,
        };
        rule.validate()?;
        Ok(rule)
    }
}

impl From<Rule> for WireRule {
    fn from(rule: Rule) -> Self {
        Self {
            id: rule.id,
            name: rule.name,
            condition: rule.condition.into(),
            action: rule.action.into(),
            active: rule.active,
        }
    }
}

/// Failure to turn a backend payload into a [`Rule`].
#[derive(Debug, thiserror::Error)]
pub enum ParseRuleError {
    /// The JSON is not rule-shaped at all.
    #[error("payload is not a rule")]
    Shape(#[source] serde_json::Error),
    /// The JSON is rule-shaped but breaks an invariant.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Parse a backend JSON value into a [`Rule`], keeping the typed error.
///
/// `serde_json::from_value::<Rule>` flattens validation failures into a
/// message; this keeps the [`ValidationError`] variant for the caller.
///
/// # Errors
///
/// See [`ParseRuleError`].
pub fn parse_rule(value: Value) -> Result<Rule, ParseRuleError> {
    let wire: WireRule = serde_json::from_value(value).map_err(ParseRuleError::Shape)?;
    Ok(Rule::try_from(wire)?)
}
