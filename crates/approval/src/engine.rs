//! Pure approval chain evaluation
//!
//! Nothing in here touches the store; callers pass the rule set and the
//! requisition in and get the decision back. Services call these under
//! their own lock guard.

use std::collections::HashSet;

use procura_model::{
    ApprovalAction, ApprovalRole, ApprovalRule, ApprovalStep, Requisition, Role, User,
};

/// Does this rule apply to the requisition?
///
/// Every populated condition must hold: `amount_gte` compares against
/// the requisition total, `category` matches if any line item carries
/// it, `cost_center` is exact equality.
pub fn rule_matches(rule: &ApprovalRule, requisition: &Requisition) -> bool {
    let conditions = &rule.conditions;
    if let Some(amount_gte) = conditions.amount_gte {
        if requisition.total < amount_gte {
            return false;
        }
    }
    if let Some(category) = conditions.category {
        if !requisition.items.iter().any(|item| item.category == category) {
            return false;
        }
    }
    if let Some(cost_center) = &conditions.cost_center {
        if requisition.cost_center != *cost_center {
            return false;
        }
    }
    true
}

/// Fallback chain when no rule matches: a single approver step
pub fn default_steps() -> Vec<ApprovalStep> {
    vec![ApprovalStep::new(1, ApprovalRole::Approver)]
}

/// Canonicalize a merged step list.
///
/// Steps are ordered by (order, role name), deduplicated keeping the
/// first occurrence of each role, then renumbered from 1. An empty
/// result falls back to [`default_steps`]. Normalization is idempotent.
pub fn normalize_steps(steps: &[ApprovalStep]) -> Vec<ApprovalStep> {
    let mut sorted: Vec<ApprovalStep> = steps.to_vec();
    sorted.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.role.as_str().cmp(b.role.as_str()))
    });

    let mut roles: Vec<ApprovalRole> = Vec::new();
    for step in &sorted {
        if !roles.contains(&step.role) {
            roles.push(step.role);
        }
    }

    if roles.is_empty() {
        return default_steps();
    }
    roles
        .into_iter()
        .enumerate()
        .map(|(index, role)| ApprovalStep::new(index as u32 + 1, role))
        .collect()
}

/// Decide the approval chain for a requisition.
///
/// Matching rules compete on specificity: only those with the highest
/// condition weight contribute, and their steps are merged through
/// [`normalize_steps`]. Equal-weight rules therefore produce the union
/// of their chains, deduplicated by role.
pub fn evaluate_steps(rules: &[ApprovalRule], requisition: &Requisition) -> Vec<ApprovalStep> {
    let matched: Vec<&ApprovalRule> = rules
        .iter()
        .filter(|rule| rule_matches(rule, requisition))
        .collect();
    if matched.is_empty() {
        return default_steps();
    }

    let max_weight = matched
        .iter()
        .map(|rule| rule.conditions.weight())
        .max()
        .unwrap_or(0);
    let merged: Vec<ApprovalStep> = matched
        .iter()
        .filter(|rule| rule.conditions.weight() == max_weight)
        .flat_map(|rule| rule.steps.iter().copied())
        .collect();

    normalize_steps(&merged)
}

/// First chain step without an `approved` trail entry.
///
/// Trail entries are keyed by (step, role); a returned requisition that
/// is resubmitted keeps its old trail, so completed steps stay
/// completed. `None` once every step is approved, or when no chain has
/// been evaluated yet.
pub fn pending_step(requisition: &Requisition) -> Option<ApprovalStep> {
    if requisition.approval_steps.is_empty() {
        return None;
    }

    let approved: HashSet<(u32, Role)> = requisition
        .approval_trail
        .iter()
        .filter(|event| event.action == ApprovalAction::Approved)
        .map(|event| (event.step, event.role))
        .collect();

    requisition
        .approval_steps
        .iter()
        .find(|step| !approved.contains(&(step.order, Role::from(step.role))))
        .copied()
}

/// Whether this user's role is the one the pending step is waiting on
pub fn can_user_approve(user: &User, requisition: &Requisition) -> bool {
    match pending_step(requisition) {
        Some(step) => Role::from(step.role) == user.role,
        None => false,
    }
}
