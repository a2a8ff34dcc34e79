//! Budgets - spending allowances per cost center

use procura_core::{Amount, Currency};
use serde::{Deserialize, Serialize};

/// A budget allocation for one cost center and period.
///
/// Usage against a budget is derived, never stored: active requisitions
/// plus active purchase orders for the cost center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub name: String,
    pub cost_center: String,
    pub amount: Amount,
    pub currency: Currency,
    /// Fiscal period label, e.g. `FY2024`
    pub period: String,
}
