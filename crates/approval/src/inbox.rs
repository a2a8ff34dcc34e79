//! Approval inbox - what is waiting on a given user

use std::sync::Arc;

use serde::Serialize;

use procura_model::{ApprovalStep, Requisition, RequisitionStatus, User};
use procura_store::MemoryStore;

use crate::engine;

/// A submitted requisition whose pending step matches the user's role
#[derive(Debug, Clone, Serialize)]
pub struct InboxItem {
    pub requisition_id: String,
    pub requisition: Requisition,
    pub current_step: ApprovalStep,
}

/// Lists requisitions awaiting action, per user
pub struct ApprovalInbox {
    store: Arc<MemoryStore>,
}

impl ApprovalInbox {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Submitted requisitions whose next step is waiting on this user's role
    pub fn pending_for(&self, user: &User) -> Vec<InboxItem> {
        let state = self.store.read();
        state
            .requisitions
            .iter()
            .filter(|req| req.status == RequisitionStatus::Submitted)
            .filter_map(|req| {
                let step = engine::pending_step(req)?;
                if procura_model::Role::from(step.role) != user.role {
                    return None;
                }
                Some(InboxItem {
                    requisition_id: req.id.clone(),
                    requisition: req.clone(),
                    current_step: step,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_model::{ApprovalRole, Role};

    #[test]
    fn test_inbox_routes_by_pending_role() {
        let store = Arc::new(MemoryStore::seeded());
        let inbox = ApprovalInbox::new(store.clone());

        // The seeded submitted requisition has cleared its approver step;
        // procurement_admin is next.
        let procurement = store.read().user("user-procurement").cloned().unwrap();
        let items = inbox.pending_for(&procurement);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].requisition.req_no, "PR-2024-0002");
        assert_eq!(items[0].current_step.role, ApprovalRole::ProcurementAdmin);
        assert_eq!(items[0].current_step.order, 2);
    }

    #[test]
    fn test_inbox_empty_for_other_roles() {
        let store = Arc::new(MemoryStore::seeded());
        let inbox = ApprovalInbox::new(store.clone());

        let approver = store.read().user("user-approver").cloned().unwrap();
        assert!(inbox.pending_for(&approver).is_empty());

        let employee = store.read().user("user-employee").cloned().unwrap();
        assert_eq!(employee.role, Role::Employee);
        assert!(inbox.pending_for(&employee).is_empty());
    }
}
