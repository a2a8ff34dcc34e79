//! Procura Approval - who has to sign off, and in what order
//!
//! The [`engine`] module is pure: given the configured rules and a
//! requisition, it decides the approval chain and tracks the pending
//! step from the trail. [`rules`] manages the rule collection itself
//! and [`inbox`] lists what is waiting on a given user.
//!
//! # Chain evaluation
//!
//! All rules whose conditions hold are matched, then only the most
//! specific ones (highest count of populated conditions) contribute.
//! Their steps are merged, deduplicated by role and renumbered. A
//! requisition no rule matches falls back to a single `approver` step.

pub mod engine;
pub mod inbox;
pub mod rules;

pub use engine::{
    can_user_approve, default_steps, evaluate_steps, normalize_steps, pending_step, rule_matches,
};
pub use inbox::{ApprovalInbox, InboxItem};
pub use rules::{RuleError, RuleService};
