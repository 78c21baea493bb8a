//! Rule API port: the backend's rule collection.

use std::future::Future;

use homedash_domain::error::HomeDashError;
use homedash_domain::id::RuleId;
use homedash_domain::rule::Rule;

/// Remote store of automation [`Rule`]s.
///
/// The backend assigns ids and evaluates the rules; the client only
/// reads and edits them.
pub trait RuleApi {
    /// Get all rules, in backend order.
    fn list_rules(&self) -> impl Future<Output = Result<Vec<Rule>, HomeDashError>> + Send;

    /// Get a rule by id, `None` when the backend does not know it.
    fn get_rule(
        &self,
        id: &RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, HomeDashError>> + Send;

    /// Create a rule and return the id the backend assigned.
    fn create_rule(&self, rule: Rule) -> impl Future<Output = Result<RuleId, HomeDashError>> + Send;

    /// Replace the rule stored under `id`.
    fn update_rule(
        &self,
        id: &RuleId,
        rule: Rule,
    ) -> impl Future<Output = Result<(), HomeDashError>> + Send;

    /// Delete a rule.
    fn delete_rule(&self, id: &RuleId) -> impl Future<Output = Result<(), HomeDashError>> + Send;

    /// Set a rule's active flag, or flip it when `active` is `None`.
    fn toggle_rule(
        &self,
        id: &RuleId,
        active: Option<bool>,
    ) -> impl Future<Output = Result<(), HomeDashError>> + Send;

    /// Replace every rule with the backend's defaults.
    fn reset_rules(&self) -> impl Future<Output = Result<(), HomeDashError>> + Send;
}

impl<T: RuleApi + Send + Sync> RuleApi for std::sync::Arc<T> {
    fn list_rules(&self) -> impl Future<Output = Result<Vec<Rule>, HomeDashError>> + Send {
        (**self).list_rules()
    }

    fn get_rule(
        &self,
        id: &RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, HomeDashError>> + Send {
        (**self).get_rule(id)
    }

    fn create_rule(&self, rule: Rule) -> impl Future<Output = Result<RuleId, HomeDashError>> + Send {
        (**self).create_rule(rule)
    }

    fn update_rule(
        &self,
        id: &RuleId,
        rule: Rule,
    ) -> impl Future<Output = Result<(), HomeDashError>> + Send {
        (**self).update_rule(id, rule)
    }

    fn delete_rule(&self, id: &RuleId) -> impl Future<Output = Result<(), HomeDashError>> + Send {
        (**self).delete_rule(id)
    }

    fn toggle_rule(
        &self,
        id: &RuleId,
        active: Option<bool>,
    ) -> impl Future<Output = Result<(), HomeDashError>> + Send {
        (**self).toggle_rule(id, active)
    }

    fn reset_rules(&self) -> impl Future<Output = Result<(), HomeDashError>> + Send {
        (**self).reset_rules()
    }
}
