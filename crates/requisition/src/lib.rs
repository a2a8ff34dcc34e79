//! Procura Requisition - the purchase request lifecycle
//!
//! Drafts are created and edited freely by their requester (or a
//! procurement admin). Submission runs the budget gate and fixes the
//! approval chain; from there the requisition moves through
//! [`process_approval`](service::RequisitionService::process_approval)
//! until every step is approved or an approver returns it to draft.
//!
//! ```text
//! draft -> submitted -> approved -> converted
//!   ^         |
//!   +---------+  (returned by an approver)
//! ```

pub mod service;

pub use service::{ApprovalDecision, RequisitionError, RequisitionService};
