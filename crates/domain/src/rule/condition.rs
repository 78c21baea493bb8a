//! Condition: the sensor predicate that triggers a rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::location::MotionArea;
use crate::time::TimeOfDay;

use super::fields::{self, Field, ValueInput};
use super::operator::Operator;
use super::wire::WireCondition;

/// The `type` tag of a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    Temperature,
    Humidity,
    Motion,
    Gas,
    Time,
}

impl ConditionKind {
    pub const ALL: &'static [Self] = &[
        Self::Temperature,
        Self::Humidity,
        Self::Motion,
        Self::Gas,
        Self::Time,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Motion => "motion",
            Self::Gas => "gas",
            Self::Time => "time",
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField {
                field: Field::ConditionType,
            });
        }
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == trimmed)
            .ok_or_else(|| ValidationError::UnknownType {
                field: Field::ConditionType,
                value: s.to_string(),
            })
    }
}

/// A predicate over the backend's sensor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireCondition", into = "WireCondition")]
pub enum Condition {
    /// Room temperature in °C, within `[0, 50]`.
    Temperature { operator: Operator, value: f64 },
    /// Relative humidity in %, within `[0, 100]`.
    Humidity { operator: Operator, value: f64 },
    Motion {
        location: MotionArea,
        operator: Operator,
        detected: bool,
    },
    Gas { operator: Operator, detected: bool },
    Time { operator: Operator, at: TimeOfDay },
}

impl Condition {
    /// Build a condition from a type selection and raw field strings.
    ///
    /// `location` is only read when the type requires it (see
    /// [`fields::fields_for`]); otherwise it is ignored.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::UnknownType`] for an unrecognised `kind`
    /// - [`ValidationError::InvalidValue`] for an unparsable or out-of-range value
    /// - [`ValidationError::MissingField`] for a blank operator or a required
    ///   location that is absent
    pub fn parse(
        kind: &str,
        operator: &str,
        value: &str,
        location: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let kind: ConditionKind = kind.parse()?;
        let operator = Operator::parse(operator)?;
        let location = required(kind, Field::ConditionLocation, location)?;

        let condition = match kind {
            ConditionKind::Temperature => Self::Temperature {
                operator,
                value: parse_number(kind, value)?,
            },
            ConditionKind::Humidity => Self::Humidity {
                operator,
                value: parse_number(kind, value)?,
            },
            ConditionKind::Motion => Self::Motion {
                location: MotionArea::parse(location.unwrap_or_default())?,
                operator,
                detected: parse_bool(value)?,
            },
            ConditionKind::Gas => Self::Gas {
                operator,
                detected: parse_bool(value)?,
            },
            ConditionKind::Time => Self::Time {
                operator,
                at: TimeOfDay::parse(value)?,
            },
        };
        Ok(condition)
    }

    #[must_use]
    pub fn kind(&self) -> ConditionKind {
        match self {
            Self::Temperature { .. } => ConditionKind::Temperature,
            Self::Humidity { .. } => ConditionKind::Humidity,
            Self::Motion { .. } => ConditionKind::Motion,
            Self::Gas { .. } => ConditionKind::Gas,
            Self::Time { .. } => ConditionKind::Time,
        }
    }

    #[must_use]
    pub fn operator(&self) -> Operator {
        match self {
            Self::Temperature { operator, .. }
            | Self::Humidity { operator, .. }
            | Self::Motion { operator, .. }
            | Self::Gas { operator, .. }
            | Self::Time { operator, .. } => *operator,
        }
    }

    /// The value as entered in the form: a number, `true`/`false`, or `HH:MM`.
    #[must_use]
    pub fn value_string(&self) -> String {
        match self {
            Self::Temperature { value, .. } | Self::Humidity { value, .. } => value.to_string(),
            Self::Motion { detected, .. } | Self::Gas { detected, .. } => detected.to_string(),
            Self::Time { at, .. } => at.to_string(),
        }
    }

    /// Check invariants of a condition built by hand.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidValue`] when a numeric value is
    /// outside its declared range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Temperature { value, .. } | Self::Humidity { value, .. } => {
                check_range(self.kind(), *value, &value.to_string())
            }
            Self::Motion { .. } | Self::Gas { .. } | Self::Time { .. } => Ok(()),
        }
    }
}

/// Read an optional field only when `kind` requires it.
pub(super) fn required<'a>(
    kind: impl Into<fields::RuleType>,
    field: Field,
    raw: Option<&'a str>,
) -> Result<Option<&'a str>, ValidationError> {
    required_for_command(kind, field, "", raw)
}

pub(super) fn required_for_command<'a>(
    kind: impl Into<fields::RuleType>,
    field: Field,
    command: &str,
    raw: Option<&'a str>,
) -> Result<Option<&'a str>, ValidationError> {
    if !fields::requires(kind, field, command) {
        return Ok(None);
    }
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(Some(value)),
        _ => Err(ValidationError::MissingField { field }),
    }
}

fn parse_number(kind: ConditionKind, raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid_number(kind, raw))?;
    check_range(kind, value, raw)?;
    Ok(value)
}

fn check_range(kind: ConditionKind, value: f64, raw: &str) -> Result<(), ValidationError> {
    if let ValueInput::Number { min, max, .. } = kind.value_field().input
        && (!value.is_finite() || value < min || value > max)
    {
        return Err(invalid_number(kind, raw));
    }
    Ok(())
}

fn invalid_number(kind: ConditionKind, raw: &str) -> ValidationError {
    let expected = match kind.value_field().input {
        ValueInput::Number { min, max, .. } => format!("a number between {min} and {max}"),
        ValueInput::Boolean | ValueInput::Time => "a number".to_string(),
    };
    ValidationError::InvalidValue {
        field: Field::Value,
        value: raw.to_string(),
        expected,
    }
}

fn parse_bool(raw: &str) -> Result<bool, ValidationError> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ValidationError::InvalidValue {
            field: Field::Value,
            value: raw.to_string(),
            expected: "true or false".to_string(),
        }),
    }
}

fn yes_no(detected: bool) -> &'static str {
    if detected { "Yes" } else { "No" }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature { operator, value } => {
                write!(f, "Temperature {} {value}°C", operator.phrase())
            }
            Self::Humidity { operator, value } => {
                write!(f, "Humidity {} {value}%", operator.phrase())
            }
            Self::Motion {
                location,
                operator,
                detected,
            } => write!(
                f,
                "Motion detected in {} {} {}",
                location.display_name(),
                operator.phrase(),
                yes_no(*detected)
            ),
            Self::Gas { operator, detected } => write!(
                f,
                "Gas leak detected {} {}",
                operator.phrase(),
                yes_no(*detected)
            ),
            Self::Time { operator, at } => write!(f, "Time {} {at}", operator.phrase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temperature(value: &str) -> Result<Condition, ValidationError> {
        Condition::parse("temperature", ">", value, None)
    }

    #[test]
    fn should_reject_temperature_above_range() {
        assert!(matches!(
            temperature("55"),
            Err(ValidationError::InvalidValue {
                field: Field::Value,
                ..
            })
        ));
    }

    #[test]
    fn should_accept_temperature_just_below_upper_bound() {
        assert_eq!(
            temperature("49.9").unwrap(),
            Condition::Temperature {
                operator: Operator::Gt,
                value: 49.9
            }
        );
    }

    #[test]
    fn should_accept_range_bounds_inclusively() {
        assert!(temperature("0").is_ok());
        assert!(temperature("50").is_ok());
        assert!(Condition::parse("humidity", "<", "100", None).is_ok());
    }

    #[test]
    fn should_reject_unparsable_and_non_finite_numbers() {
        assert!(temperature("warm").is_err());
        assert!(temperature("").is_err());
        assert!(temperature("NaN").is_err());
        assert!(Condition::parse("humidity", "<", "-1", None).is_err());
    }

    #[test]
    fn should_reject_unknown_condition_type() {
        assert_eq!(
            Condition::parse("pressure", "==", "1", None),
            Err(ValidationError::UnknownType {
                field: Field::ConditionType,
                value: "pressure".to_string(),
            })
        );
    }

    #[test]
    fn should_require_location_for_motion() {
        assert_eq!(
            Condition::parse("motion", "==", "true", None),
            Err(ValidationError::MissingField {
                field: Field::ConditionLocation
            })
        );
        assert_eq!(
            Condition::parse("motion", "==", "true", Some("  ")),
            Err(ValidationError::MissingField {
                field: Field::ConditionLocation
            })
        );
    }

    #[test]
    fn should_ignore_location_for_types_without_one() {
        let c = Condition::parse("gas", "==", "true", Some("Room1")).unwrap();
        assert_eq!(
            c,
            Condition::Gas {
                operator: Operator::Eq,
                detected: true
            }
        );
    }

    #[test]
    fn should_parse_boolean_only_from_true_or_false() {
        assert!(Condition::parse("gas", "==", "yes", None).is_err());
        let c = Condition::parse("motion", "!=", "false", Some("any")).unwrap();
        assert_eq!(
            c,
            Condition::Motion {
                location: MotionArea::Any,
                operator: Operator::Ne,
                detected: false
            }
        );
    }

    #[test]
    fn should_parse_time_condition() {
        let c = Condition::parse("time", "==", "22:00", None).unwrap();
        assert_eq!(c.value_string(), "22:00");
        assert!(Condition::parse("time", "==", "10pm", None).is_err());
    }

    #[test]
    fn should_describe_every_operator_for_every_condition_type() {
        let samples = [
            ("temperature", "25", None),
            ("humidity", "60", None),
            ("motion", "true", Some("LivingRoom")),
            ("gas", "true", None),
            ("time", "07:30", None),
        ];
        for (kind, value, location) in samples {
            for op in Operator::ALL {
                let c = Condition::parse(kind, op.symbol(), value, location).unwrap();
                let text = c.to_string();
                assert!(
                    text.contains(&format!(" {} ", op.phrase())),
                    "{text:?} lacks {:?}",
                    op.phrase()
                );
            }
        }
    }

    #[test]
    fn should_describe_conditions_as_sentences() {
        let cases = [
            (temperature("25").unwrap(), "Temperature is greater than 25°C"),
            (
                Condition::parse("humidity", "<=", "40.5", None).unwrap(),
                "Humidity is less than or equal to 40.5%",
            ),
            (
                Condition::parse("motion", "==", "true", Some("any")).unwrap(),
                "Motion detected in any room equals Yes",
            ),
            (
                Condition::parse("motion", "==", "false", Some("LivingRoom")).unwrap(),
                "Motion detected in Living Room equals No",
            ),
            (
                Condition::parse("gas", "!=", "true", None).unwrap(),
                "Gas leak detected does not equal Yes",
            ),
            (
                Condition::parse("time", ">=", "06:45", None).unwrap(),
                "Time is greater than or equal to 06:45",
            ),
        ];
        for (condition, expected) in cases {
            assert_eq!(condition.to_string(), expected);
        }
    }

    #[test]
    fn should_flag_hand_built_out_of_range_value() {
        let c = Condition::Humidity {
            operator: Operator::Gt,
            value: 120.0,
        };
        assert!(c.validate().is_err());
    }
}
