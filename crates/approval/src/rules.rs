//! Approval rule management

use std::sync::Arc;

use thiserror::Error;

use procura_model::{ApprovalRule, ApprovalStep, RuleForm, ValidationError};
use procura_store::MemoryStore;

/// Errors from rule management
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Approval rule not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// CRUD over the approval rule collection
pub struct RuleService {
    store: Arc<MemoryStore>,
}

impl RuleService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<ApprovalRule> {
        self.store.read().approval_rules.clone()
    }

    pub fn get(&self, id: &str) -> Result<ApprovalRule, RuleError> {
        self.store
            .read()
            .approval_rule(id)
            .cloned()
            .ok_or_else(|| RuleError::NotFound(id.to_string()))
    }

    /// Create a rule; submitted steps are renumbered from 1 in the order
    /// given (role uniqueness is enforced by the form).
    pub fn create(&self, form: &RuleForm) -> Result<ApprovalRule, RuleError> {
        form.validate()?;

        let rule = ApprovalRule {
            id: procura_model::new_id(),
            name: form.name.clone(),
            conditions: form.conditions.clone(),
            steps: renumber(&form.steps),
        };

        let mut state = self.store.write();
        state.approval_rules.insert(0, rule.clone());
        tracing::info!(rule_id = %rule.id, name = %rule.name, "Approval rule created");
        Ok(rule)
    }

    pub fn update(&self, id: &str, form: &RuleForm) -> Result<ApprovalRule, RuleError> {
        form.validate()?;

        let mut state = self.store.write();
        let rule = state
            .approval_rule_mut(id)
            .ok_or_else(|| RuleError::NotFound(id.to_string()))?;

        rule.name = form.name.clone();
        rule.conditions = form.conditions.clone();
        rule.steps = renumber(&form.steps);

        let updated = rule.clone();
        tracing::info!(rule_id = %updated.id, "Approval rule updated");
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<ApprovalRule, RuleError> {
        let mut state = self.store.write();
        let index = state
            .approval_rules
            .iter()
            .position(|rule| rule.id == id)
            .ok_or_else(|| RuleError::NotFound(id.to_string()))?;

        let removed = state.approval_rules.remove(index);
        tracing::info!(rule_id = %removed.id, name = %removed.name, "Approval rule deleted");
        Ok(removed)
    }
}

fn renumber(steps: &[ApprovalStep]) -> Vec<ApprovalStep> {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| ApprovalStep::new(index as u32 + 1, step.role))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_core::Amount;
    use procura_model::{ApprovalRole, RuleConditions};
    use rust_decimal_macros::dec;

    fn service() -> RuleService {
        RuleService::new(Arc::new(MemoryStore::empty()))
    }

    fn form(name: &str) -> RuleForm {
        RuleForm {
            name: name.to_string(),
            conditions: RuleConditions {
                amount_gte: Some(Amount::new(dec!(50_000_000)).unwrap()),
                ..Default::default()
            },
            steps: vec![
                ApprovalStep::new(7, ApprovalRole::Approver),
                ApprovalStep::new(9, ApprovalRole::Finance),
            ],
        }
    }

    #[test]
    fn test_create_renumbers_steps() {
        let service = service();
        let rule = service.create(&form("Mid value")).unwrap();

        assert_eq!(rule.steps[0], ApprovalStep::new(1, ApprovalRole::Approver));
        assert_eq!(rule.steps[1], ApprovalStep::new(2, ApprovalRole::Finance));
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn test_create_rejects_empty_conditions() {
        let service = service();
        let mut invalid = form("No conditions");
        invalid.conditions = RuleConditions::default();

        let result = service.create(&invalid);
        assert!(matches!(result, Err(RuleError::Validation(_))));
    }

    #[test]
    fn test_update_replaces_fields() {
        let service = service();
        let rule = service.create(&form("Before")).unwrap();

        let mut changed = form("After");
        changed.steps = vec![ApprovalStep::new(1, ApprovalRole::ProcurementAdmin)];
        let updated = service.update(&rule.id, &changed).unwrap();

        assert_eq!(updated.name, "After");
        assert_eq!(updated.steps.len(), 1);
        assert_eq!(service.get(&rule.id).unwrap().name, "After");
    }

    #[test]
    fn test_update_unknown_rule() {
        let service = service();
        let result = service.update("missing", &form("Anything"));
        assert!(matches!(result, Err(RuleError::NotFound(_))));
    }

    #[test]
    fn test_delete_removes_rule() {
        let service = service();
        let rule = service.create(&form("Short lived")).unwrap();

        let removed = service.delete(&rule.id).unwrap();
        assert_eq!(removed.id, rule.id);
        assert!(service.list().is_empty());
        assert!(matches!(service.delete(&rule.id), Err(RuleError::NotFound(_))));
    }
}
