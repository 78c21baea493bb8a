//! Rule service: use-cases behind the dashboard's rule buttons.

use homedash_domain::error::{HomeDashError, NotFoundError};
use homedash_domain::id::RuleId;
use homedash_domain::rule::{Rule, RuleForm};

use crate::ports::RuleApi;

/// Application service for rule CRUD operations.
pub struct RuleService<A> {
    api: A,
}

impl<A: RuleApi> RuleService<A> {
    /// Create a new service backed by the given rule API.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// List all rules.
    ///
    /// # Errors
    ///
    /// Returns the error propagated from the rule API.
    pub async fn list_rules(&self) -> Result<Vec<Rule>, HomeDashError> {
        self.api.list_rules().await
    }

    /// Look up a rule by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] when no rule with `id` exists,
    /// or the error propagated from the rule API.
    #[tracing::instrument(skip(self), fields(rule_id = %id))]
    pub async fn get_rule(&self, id: &RuleId) -> Result<Rule, HomeDashError> {
        self.api.get_rule(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Rule",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Validate a filled-in form and store the resulting rule.
    ///
    /// A form without an id creates an active rule; a form with an id
    /// replaces that rule. The saved rule is returned with its id.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] if the form is invalid, or the
    /// error propagated from the rule API.
    #[tracing::instrument(skip(self, form), fields(rule_name = %form.name))]
    pub async fn save(&self, form: &RuleForm) -> Result<Rule, HomeDashError> {
        let mut rule = form.validate()?;
        match rule.id.clone() {
            Some(id) => {
                self.api.update_rule(&id, rule.clone()).await?;
                tracing::debug!(rule_id = %id, "rule updated");
            }
            None => {
                rule.active = true;
                let id = self.api.create_rule(rule.clone()).await?;
                tracing::debug!(rule_id = %id, "rule created");
                rule.id = Some(id);
            }
        }
        Ok(rule)
    }

    /// Set a rule's active flag, or flip it when `active` is `None`.
    ///
    /// # Errors
    ///
    /// Returns the error propagated from the rule API.
    #[tracing::instrument(skip(self), fields(rule_id = %id))]
    pub async fn toggle(&self, id: &RuleId, active: Option<bool>) -> Result<(), HomeDashError> {
        self.api.toggle_rule(id, active).await
    }

    /// Delete a rule by id.
    ///
    /// # Errors
    ///
    /// Returns the error propagated from the rule API.
    #[tracing::instrument(skip(self), fields(rule_id = %id))]
    pub async fn delete(&self, id: &RuleId) -> Result<(), HomeDashError> {
        self.api.delete_rule(id).await
    }

    /// Replace all rules with the backend's defaults.
    ///
    /// # Errors
    ///
    /// Returns the error propagated from the rule API.
    #[tracing::instrument(skip(self))]
    pub async fn reset_to_defaults(&self) -> Result<(), HomeDashError> {
        self.api.reset_rules().await
    }
}
