//! Rule: one condition → one action, plus an active flag.
//!
//! A [`Rule`] pairs a [`Condition`] over the backend's sensor state with an
//! [`Action`] on its devices. Rules reach the client either from the
//! backend (JSON, see [`wire`]) or from the user (raw strings, see
//! [`RuleForm`]); both paths share the same coercion code.

mod action;
mod command;
mod condition;
mod fields;
mod form;
mod operator;
pub mod wire;

pub use action::{Action, ActionKind, AlertCommand};
pub use command::{
    AlertMode, AlertSound, CommandOption, DoorCommand, FanCommand, GarageCommand, LightCommand,
};
pub use condition::{Condition, ConditionKind};
pub use fields::{
    Field, FieldRequirement, Requirement, RuleType, ValueField, ValueInput, fields_for, requires,
};
pub use form::RuleForm;
pub use operator::Operator;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::RuleId;

/// A named automation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "wire::WireRule", into = "wire::WireRule")]
pub struct Rule {
    /// Assigned by the backend; `None` until the rule is created.
    pub id: Option<RuleId>,
    pub name: String,
    pub condition: Condition,
    pub action: Action,
    pub active: bool,
}

impl Rule {
    /// Create a builder for constructing a [`Rule`].
    #[must_use]
    pub fn builder() -> RuleBuilder {
        RuleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when `name` is blank, or the
    /// error of a condition whose value left its declared range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.condition.validate()
    }
}

/// Human-readable sentence for a condition.
#[must_use]
pub fn describe_condition(condition: &Condition) -> String {
    condition.to_string()
}

/// Human-readable sentence for an action.
#[must_use]
pub fn describe_action(action: &Action) -> String {
    action.to_string()
}

/// Step-by-step builder for [`Rule`].
#[derive(Debug, Default)]
pub struct RuleBuilder {
    id: Option<RuleId>,
    name: Option<String>,
    condition: Option<Condition>,
    action: Option<Action>,
    active: Option<bool>,
}

impl RuleBuilder {
    #[must_use]
    pub fn id(mut self, id: RuleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Consume the builder, validate, and return a [`Rule`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when the condition or action
    /// was never set, or any error of [`Rule::validate`].
    pub fn build(self) -> Result<Rule, ValidationError> {
        let rule = Rule {
            id: self.id,
            name: self.name.unwrap_or_default(),
            condition: self.condition.ok_or(ValidationError::MissingField {
                field: Field::ConditionType,
            })?,
            action: self.action.ok_or(ValidationError::MissingField {
                field: Field::ActionType,
            })?,
            active: self.active.unwrap_or(true),
        };
        rule.validate()?;
        Ok(rule)
    }
}
