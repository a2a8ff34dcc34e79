//! Application context - wires everything together

use procura_approval::{ApprovalInbox, RuleService};
use procura_budget::BudgetService;
use procura_directory::{UserService, VendorService};
use procura_model::User;
use procura_reporting::ReportingService;
use procura_requisition::RequisitionService;
use procura_sourcing::{CaptchaStore, PoService, RfqService};
use procura_store::MemoryStore;
use std::sync::Arc;

/// Application context - wires together all services over one store
pub struct AppContext {
    pub store: Arc<MemoryStore>,
    pub captcha: Arc<CaptchaStore>,
    pub requisitions: RequisitionService,
    pub rules: RuleService,
    pub inbox: ApprovalInbox,
    pub budgets: BudgetService,
    pub vendors: VendorService,
    pub users: UserService,
    pub rfqs: RfqService,
    pub pos: PoService,
    pub reporting: ReportingService,
}

impl AppContext {
    /// Create a context over a fresh copy of the demo dataset
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::seeded()))
    }

    /// Create a context over an existing store
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        let captcha = Arc::new(CaptchaStore::new());

        Self {
            requisitions: RequisitionService::new(store.clone()),
            rules: RuleService::new(store.clone()),
            inbox: ApprovalInbox::new(store.clone()),
            budgets: BudgetService::new(store.clone()),
            vendors: VendorService::new(store.clone()),
            users: UserService::new(store.clone()),
            rfqs: RfqService::new(store.clone(), captcha.clone()),
            pos: PoService::new(store.clone()),
            reporting: ReportingService::new(store.clone()),
            store,
            captcha,
        }
    }

    /// Resolve the acting user by id
    pub fn actor(&self, user_id: &str) -> Result<User, ContextError> {
        self.store
            .read()
            .user(user_id)
            .cloned()
            .ok_or_else(|| ContextError::UnknownUser(user_id.to_string()))
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors resolving the acting user
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("Unknown user: {0} (see `procura user list`)")]
    UnknownUser(String),
}
