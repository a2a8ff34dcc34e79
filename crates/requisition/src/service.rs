//! Requisition lifecycle service

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use procura_budget::BudgetError;
use procura_model::{
    new_id, total_of, ApprovalAction, ApprovalEvent, Requisition, RequisitionForm,
    RequisitionItem, RequisitionItemForm, RequisitionStatus, Role, User, ValidationError,
};
use procura_store::MemoryStore;

/// Errors from the requisition lifecycle
#[derive(Debug, Error)]
pub enum RequisitionError {
    #[error("Requisition not found: {0}")]
    NotFound(String),

    #[error("Only draft requisitions can be edited")]
    EditNonDraft,

    #[error("Only draft requisitions can be submitted")]
    SubmitNonDraft,

    #[error("Only submitted requisitions can be processed")]
    ProcessNonSubmitted,

    #[error("Not allowed to edit this requisition")]
    EditForbidden,

    #[error("Not allowed to submit this requisition")]
    SubmitForbidden,

    #[error("No pending approval step")]
    NoPendingStep,

    #[error("You are not authorized for this step")]
    NotYourStep,

    #[error(transparent)]
    Budget(#[from] BudgetError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// What an approver can do with a pending step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    Approve,
    /// Send the requisition back to draft for rework
    Return,
}

impl ApprovalDecision {
    fn action(self) -> ApprovalAction {
        match self {
            ApprovalDecision::Approve => ApprovalAction::Approved,
            ApprovalDecision::Return => ApprovalAction::Returned,
        }
    }
}

/// Drives requisitions through their lifecycle.
///
/// Every operation takes one write guard for its whole check-then-mutate
/// sequence; the budget gate and chain evaluation run under that same
/// guard, so a submission can never race another one past the budget.
pub struct RequisitionService {
    store: Arc<MemoryStore>,
}

impl RequisitionService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Requisition> {
        self.store.read().requisitions.clone()
    }

    pub fn get(&self, id: &str) -> Result<Requisition, RequisitionError> {
        self.store
            .read()
            .requisition(id)
            .cloned()
            .ok_or_else(|| RequisitionError::NotFound(id.to_string()))
    }

    /// Create a draft owned by `requester`
    pub fn create(
        &self,
        form: &RequisitionForm,
        requester: &User,
    ) -> Result<Requisition, RequisitionError> {
        form.validate()?;

        let mut state = self.store.write();
        let req_no = state.next_requisition_number();
        let items = materialize_items(&form.items);
        let now = Utc::now();

        let requisition = Requisition {
            id: new_id(),
            req_no,
            requester_id: requester.id.clone(),
            department: form.department.clone(),
            cost_center: form.cost_center.clone(),
            needed_by: form.needed_by,
            status: RequisitionStatus::Draft,
            total: total_of(&items),
            items,
            attachments: form.attachments.clone(),
            notes: form.notes.clone(),
            created_at: now,
            updated_at: now,
            approval_trail: vec![],
            approval_steps: vec![],
        };

        state.requisitions.insert(0, requisition.clone());
        tracing::info!(
            req_no = %requisition.req_no,
            total = %requisition.total,
            "Requisition created"
        );
        Ok(requisition)
    }

    /// Replace a draft's content.
    ///
    /// Only the requester or a procurement admin may edit, and only while
    /// the requisition is a draft. Any previously evaluated chain and
    /// trail are cleared; the next submission starts fresh.
    pub fn update(
        &self,
        id: &str,
        form: &RequisitionForm,
        user: &User,
    ) -> Result<Requisition, RequisitionError> {
        form.validate()?;

        let mut state = self.store.write();
        let requisition = state
            .requisition_mut(id)
            .ok_or_else(|| RequisitionError::NotFound(id.to_string()))?;

        if requisition.status != RequisitionStatus::Draft {
            return Err(RequisitionError::EditNonDraft);
        }
        if requisition.requester_id != user.id && user.role != Role::ProcurementAdmin {
            return Err(RequisitionError::EditForbidden);
        }

        let items = materialize_items(&form.items);
        requisition.department = form.department.clone();
        requisition.cost_center = form.cost_center.clone();
        requisition.needed_by = form.needed_by;
        requisition.notes = form.notes.clone();
        requisition.attachments = form.attachments.clone();
        requisition.total = total_of(&items);
        requisition.items = items;
        requisition.updated_at = Utc::now();
        requisition.approval_steps.clear();
        requisition.approval_trail.clear();

        let updated = requisition.clone();
        tracing::info!(req_no = %updated.req_no, "Requisition updated");
        Ok(updated)
    }

    /// Submit a draft for approval.
    ///
    /// Runs the budget gate (excluding this requisition from usage, so a
    /// resubmission does not count itself), evaluates the approval chain
    /// and records the step-0 submission event. On a budget failure the
    /// requisition is left untouched in draft.
    pub fn submit(&self, id: &str, user: &User) -> Result<Requisition, RequisitionError> {
        let mut state = self.store.write();

        let requisition = state
            .requisition(id)
            .ok_or_else(|| RequisitionError::NotFound(id.to_string()))?;
        if requisition.status != RequisitionStatus::Draft {
            return Err(RequisitionError::SubmitNonDraft);
        }
        if requisition.requester_id != user.id && user.role != Role::ProcurementAdmin {
            return Err(RequisitionError::SubmitForbidden);
        }

        if let Some(check) = procura_budget::ensure_available(
            &state,
            &requisition.cost_center,
            requisition.total,
            &[requisition.id.as_str()],
        )? {
            tracing::debug!(
                cost_center = %check.budget.cost_center,
                remaining_after = %check.remaining_after,
                "Budget check passed"
            );
        }
        let steps = procura_approval::evaluate_steps(&state.approval_rules, requisition);

        let requisition = state
            .requisition_mut(id)
            .ok_or_else(|| RequisitionError::NotFound(id.to_string()))?;
        requisition.approval_steps = steps;
        requisition.status = RequisitionStatus::Submitted;
        requisition.approval_trail.push(ApprovalEvent {
            step: 0,
            role: Role::Employee,
            user_id: Some(user.id.clone()),
            action: ApprovalAction::Submitted,
            comment: None,
            at: Utc::now(),
        });
        requisition.updated_at = Utc::now();

        let submitted = requisition.clone();
        tracing::info!(
            req_no = %submitted.req_no,
            steps = submitted.approval_steps.len(),
            "Requisition submitted"
        );
        Ok(submitted)
    }

    /// Approve or return the pending step.
    ///
    /// The acting user's role must match the pending step. An approval
    /// that clears the last step moves the requisition to approved; a
    /// return moves it back to draft but keeps the chain and trail, so
    /// already-approved steps stay completed across a resubmission.
    pub fn process_approval(
        &self,
        id: &str,
        user: &User,
        decision: ApprovalDecision,
        comment: Option<&str>,
    ) -> Result<Requisition, RequisitionError> {
        let mut state = self.store.write();

        let requisition = state
            .requisition(id)
            .ok_or_else(|| RequisitionError::NotFound(id.to_string()))?;
        if requisition.status != RequisitionStatus::Submitted {
            return Err(RequisitionError::ProcessNonSubmitted);
        }
        let pending =
            procura_approval::pending_step(requisition).ok_or(RequisitionError::NoPendingStep)?;
        if Role::from(pending.role) != user.role {
            return Err(RequisitionError::NotYourStep);
        }

        let requisition = state
            .requisition_mut(id)
            .ok_or_else(|| RequisitionError::NotFound(id.to_string()))?;
        requisition.approval_trail.push(ApprovalEvent {
            step: pending.order,
            role: Role::from(pending.role),
            user_id: Some(user.id.clone()),
            action: decision.action(),
            comment: comment.map(str::to_string),
            at: Utc::now(),
        });
        requisition.updated_at = Utc::now();

        match decision {
            ApprovalDecision::Return => {
                requisition.status = RequisitionStatus::Draft;
            }
            ApprovalDecision::Approve => {
                if procura_approval::pending_step(requisition).is_none() {
                    requisition.status = RequisitionStatus::Approved;
                }
            }
        }

        let processed = requisition.clone();
        tracing::info!(
            req_no = %processed.req_no,
            step = pending.order,
            status = %processed.status,
            "Approval processed"
        );
        Ok(processed)
    }
}

fn materialize_items(items: &[RequisitionItemForm]) -> Vec<RequisitionItem> {
    items
        .iter()
        .map(|item| RequisitionItem {
            id: item.id.clone().unwrap_or_else(new_id),
            sku: item.sku.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            uom: item.uom.clone(),
            unit_price: item.unit_price,
            currency: item.currency.clone(),
            category: item.category,
            vendor_preference_id: item.vendor_preference_id.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_core::{Amount, Currency};
    use procura_model::{ApprovalRole, VendorCategory};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn setup() -> (Arc<MemoryStore>, RequisitionService) {
        let store = Arc::new(MemoryStore::seeded());
        let service = RequisitionService::new(store.clone());
        (store, service)
    }

    fn seeded_user(store: &MemoryStore, id: &str) -> User {
        store.read().user(id).cloned().unwrap()
    }

    fn form(cost_center: &str, unit_price: Decimal) -> RequisitionForm {
        RequisitionForm {
            department: "Operations".to_string(),
            cost_center: cost_center.to_string(),
            needed_by: Utc::now() + chrono::Duration::days(14),
            notes: None,
            items: vec![RequisitionItemForm {
                id: None,
                sku: None,
                description: "Pallet Jacks".to_string(),
                quantity: dec!(1),
                uom: "unit".to_string(),
                unit_price: Amount::new(unit_price).unwrap(),
                currency: Currency::Idr,
                category: VendorCategory::Logistics,
                vendor_preference_id: None,
            }],
            attachments: vec![],
        }
    }

    #[test]
    fn test_create_assigns_next_number() {
        let (store, service) = setup();
        let employee = seeded_user(&store, "user-employee");

        let requisition = service.create(&form("OPS-110", dec!(60_000_000)), &employee).unwrap();

        assert_eq!(requisition.req_no, "PR-2024-0006");
        assert_eq!(requisition.status, RequisitionStatus::Draft);
        assert_eq!(requisition.total.value(), dec!(60_000_000));
        assert!(requisition.approval_steps.is_empty());
        assert_eq!(service.list().len(), 6);
        assert_eq!(service.list()[0].id, requisition.id);
    }

    #[test]
    fn test_update_clears_chain_and_trail() {
        let (store, service) = setup();
        let employee = seeded_user(&store, "user-employee");

        let requisition = service.create(&form("OPS-110", dec!(10_000_000)), &employee).unwrap();
        let updated = service
            .update(&requisition.id, &form("FAC-202", dec!(20_000_000)), &employee)
            .unwrap();

        assert_eq!(updated.cost_center, "FAC-202");
        assert_eq!(updated.total.value(), dec!(20_000_000));
        assert!(updated.approval_steps.is_empty());
        assert!(updated.approval_trail.is_empty());
    }

    #[test]
    fn test_update_rejects_non_draft_and_strangers() {
        let (store, service) = setup();
        let employee = seeded_user(&store, "user-employee");
        let approver = seeded_user(&store, "user-approver");
        let admin = seeded_user(&store, "user-procurement");

        let submitted_id = store.read().requisitions[1].id.clone();
        let result = service.update(&submitted_id, &form("FAC-202", dec!(1)), &employee);
        assert!(matches!(result, Err(RequisitionError::EditNonDraft)));

        let draft = service.create(&form("OPS-110", dec!(5_000_000)), &employee).unwrap();
        let result = service.update(&draft.id, &form("OPS-110", dec!(6_000_000)), &approver);
        assert!(matches!(result, Err(RequisitionError::EditForbidden)));

        // A procurement admin can edit anyone's draft.
        assert!(service.update(&draft.id, &form("OPS-110", dec!(6_000_000)), &admin).is_ok());
    }

    #[test]
    fn test_submit_evaluates_chain_and_logs_event() {
        let (store, service) = setup();
        let employee = seeded_user(&store, "user-employee");

        let requisition = service.create(&form("OPS-110", dec!(60_000_000)), &employee).unwrap();
        let submitted = service.submit(&requisition.id, &employee).unwrap();

        assert_eq!(submitted.status, RequisitionStatus::Submitted);
        // 60M matches only the catch-all rule.
        let roles: Vec<ApprovalRole> =
            submitted.approval_steps.iter().map(|step| step.role).collect();
        assert_eq!(roles, vec![ApprovalRole::Approver, ApprovalRole::ProcurementAdmin]);

        assert_eq!(submitted.approval_trail.len(), 1);
        let event = &submitted.approval_trail[0];
        assert_eq!(event.step, 0);
        assert_eq!(event.role, Role::Employee);
        assert_eq!(event.action, ApprovalAction::Submitted);
        assert_eq!(event.user_id.as_deref(), Some("user-employee"));
    }

    #[test]
    fn test_submit_high_value_requires_finance() {
        let (store, service) = setup();
        let employee = seeded_user(&store, "user-employee");

        let requisition = service.create(&form("OPS-110", dec!(100_000_000)), &employee).unwrap();
        let submitted = service.submit(&requisition.id, &employee).unwrap();

        let roles: Vec<ApprovalRole> =
            submitted.approval_steps.iter().map(|step| step.role).collect();
        assert_eq!(
            roles,
            vec![
                ApprovalRole::Approver,
                ApprovalRole::Finance,
                ApprovalRole::ProcurementAdmin,
            ]
        );
    }

    #[test]
    fn test_submit_over_budget_leaves_draft_untouched() {
        let (store, service) = setup();
        let employee = seeded_user(&store, "user-employee");

        // OPS-110 has 450M headroom.
        let requisition = service.create(&form("OPS-110", dec!(500_000_000)), &employee).unwrap();
        let result = service.submit(&requisition.id, &employee);
        assert!(matches!(result, Err(RequisitionError::Budget(_))));

        let unchanged = service.get(&requisition.id).unwrap();
        assert_eq!(unchanged.status, RequisitionStatus::Draft);
        assert!(unchanged.approval_trail.is_empty());
        assert!(unchanged.approval_steps.is_empty());
    }

    #[test]
    fn test_submit_checks_ownership_and_state() {
        let (store, service) = setup();
        let employee = seeded_user(&store, "user-employee");
        let approver = seeded_user(&store, "user-approver");

        let requisition = service.create(&form("OPS-110", dec!(1_000_000)), &employee).unwrap();
        let result = service.submit(&requisition.id, &approver);
        assert!(matches!(result, Err(RequisitionError::SubmitForbidden)));

        service.submit(&requisition.id, &employee).unwrap();
        let result = service.submit(&requisition.id, &employee);
        assert!(matches!(result, Err(RequisitionError::SubmitNonDraft)));

        assert!(matches!(
            service.submit("missing", &employee),
            Err(RequisitionError::NotFound(_))
        ));
    }

    #[test]
    fn test_full_approval_chain() {
        let (store, service) = setup();
        let employee = seeded_user(&store, "user-employee");
        let approver = seeded_user(&store, "user-approver");
        let admin = seeded_user(&store, "user-procurement");

        let requisition = service.create(&form("OPS-110", dec!(60_000_000)), &employee).unwrap();
        service.submit(&requisition.id, &employee).unwrap();

        let after_first = service
            .process_approval(&requisition.id, &approver, ApprovalDecision::Approve, None)
            .unwrap();
        assert_eq!(after_first.status, RequisitionStatus::Submitted);

        let done = service
            .process_approval(&requisition.id, &admin, ApprovalDecision::Approve, None)
            .unwrap();
        assert_eq!(done.status, RequisitionStatus::Approved);
        // submitted + two approvals
        assert_eq!(done.approval_trail.len(), 3);
    }

    #[test]
    fn test_role_mismatch_is_rejected() {
        let (store, service) = setup();
        let employee = seeded_user(&store, "user-employee");
        let finance = seeded_user(&store, "user-finance");

        let requisition = service.create(&form("OPS-110", dec!(60_000_000)), &employee).unwrap();
        service.submit(&requisition.id, &employee).unwrap();

        // Chain starts with approver; finance is not up yet.
        let result =
            service.process_approval(&requisition.id, &finance, ApprovalDecision::Approve, None);
        assert!(matches!(result, Err(RequisitionError::NotYourStep)));
    }

    #[test]
    fn test_return_goes_back_to_draft_and_resubmits() {
        let (store, service) = setup();
        let employee = seeded_user(&store, "user-employee");
        let approver = seeded_user(&store, "user-approver");

        let requisition = service.create(&form("OPS-110", dec!(60_000_000)), &employee).unwrap();
        service.submit(&requisition.id, &employee).unwrap();

        let returned = service
            .process_approval(
                &requisition.id,
                &approver,
                ApprovalDecision::Return,
                Some("Need three quotes first"),
            )
            .unwrap();
        assert_eq!(returned.status, RequisitionStatus::Draft);
        // Trail keeps the submission and the return.
        assert_eq!(returned.approval_trail.len(), 2);
        assert_eq!(
            returned.approval_trail[1].comment.as_deref(),
            Some("Need three quotes first")
        );
        // The chain survives the return; only an edit clears it.
        assert!(!returned.approval_steps.is_empty());

        // Processing a draft is invalid until it is resubmitted.
        let result =
            service.process_approval(&requisition.id, &approver, ApprovalDecision::Approve, None);
        assert!(matches!(result, Err(RequisitionError::ProcessNonSubmitted)));

        let resubmitted = service.submit(&requisition.id, &employee).unwrap();
        assert_eq!(resubmitted.status, RequisitionStatus::Submitted);
        assert_eq!(resubmitted.approval_trail.len(), 3);
    }

    #[test]
    fn test_resubmission_excludes_itself_from_budget() {
        let (store, service) = setup();
        let employee = seeded_user(&store, "user-employee");
        let approver = seeded_user(&store, "user-approver");

        // 440M fits OPS-110's 450M budget only if the requisition's own
        // prior submission is not double counted.
        let requisition = service.create(&form("OPS-110", dec!(440_000_000)), &employee).unwrap();
        service.submit(&requisition.id, &employee).unwrap();
        service
            .process_approval(&requisition.id, &approver, ApprovalDecision::Return, None)
            .unwrap();

        assert!(service.submit(&requisition.id, &employee).is_ok());
    }
}
