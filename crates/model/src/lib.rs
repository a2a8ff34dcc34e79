//! Procura Model - Domain entities
//!
//! Everything the procurement workflow operates on lives here: parties
//! (users, vendors), budgets, requisitions with their approval trail,
//! approval rules, RFQs with vendor quotes, and purchase orders, plus the
//! validated input forms the services accept.

pub mod attachment;
pub mod budget;
pub mod forms;
pub mod po;
pub mod requisition;
pub mod rfq;
pub mod roles;
pub mod rule;
pub mod user;
pub mod vendor;

pub use attachment::FileMeta;
pub use budget::Budget;
pub use forms::{
    QuoteItemForm, RequisitionForm, RequisitionItemForm, RfqForm, RuleForm, UserForm,
    ValidationError, VendorForm, VendorQuoteForm,
};
pub use po::{PoLine, PoStatus, PurchaseOrder};
pub use requisition::{
    total_of, ApprovalAction, ApprovalEvent, Requisition, RequisitionItem, RequisitionStatus,
};
pub use rfq::{Quote, QuoteItem, QuoteSource, Rfq, RfqStatus};
pub use roles::{ApprovalRole, Role};
pub use rule::{ApprovalRule, ApprovalStep, RuleConditions};
pub use user::User;
pub use vendor::{Vendor, VendorCategory};

/// Generate a fresh entity id (uuid v4, lowercase hyphenated)
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
