//! Procura Budget - spend gating per cost center
//!
//! Budgets are never decremented. Usage is derived on every check from
//! the live collections: submitted and approved requisitions in the
//! cost center, plus every purchase order (any status but canceled)
//! linked to a requisition in it. The gate in [`usage`] is pure and
//! takes a `&State`, so callers already holding the store lock can run
//! it without taking another guard.

pub mod service;
pub mod usage;

pub use service::BudgetService;
pub use usage::{
    budget_usage, ensure_available, summaries, BudgetCheck, BudgetError, BudgetSummary,
    BudgetUsage,
};
