//! Pure budget math over a state snapshot

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use procura_core::{format_currency, Amount};
use procura_model::{Budget, PoStatus, RequisitionStatus};
use procura_store::State;

/// Errors from the budget gate
#[derive(Debug, Error)]
pub enum BudgetError {
    /// The requested amount does not fit in the remaining headroom.
    /// Amounts are pre-formatted; remaining is clamped at zero for
    /// display even when the budget is already overcommitted.
    #[error("Budget {name} ({cost_center}) exceeded. Remaining {remaining}, requested {requested}.")]
    Exceeded {
        name: String,
        cost_center: String,
        remaining: String,
        requested: String,
    },
}

/// Current commitment against one budget
#[derive(Debug, Clone, Serialize)]
pub struct BudgetUsage {
    pub budget: Budget,
    pub usage: Amount,
    /// Negative when the cost center is overcommitted
    pub remaining: Decimal,
}

/// A passed gate check, with the headroom left after the new spend
#[derive(Debug, Clone, Serialize)]
pub struct BudgetCheck {
    pub budget: Budget,
    pub usage: Amount,
    pub remaining: Decimal,
    pub remaining_after: Decimal,
}

/// One budget with derived usage, for listings
#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummary {
    #[serde(flatten)]
    pub budget: Budget,
    pub usage: Amount,
    pub remaining: Decimal,
}

/// Committed spend in a cost center.
///
/// Requisitions count while submitted or approved; `exclude` drops the
/// given requisition ids (a resubmission must not count itself).
/// Purchase orders count in any status but canceled, in full, when any
/// linked requisition belongs to the cost center; the exclusion list
/// does not apply to them.
fn commitment(state: &State, cost_center: &str, exclude: &[&str]) -> Amount {
    let requisition_commitment: Decimal = state
        .requisitions
        .iter()
        .filter(|req| req.cost_center == cost_center)
        .filter(|req| !exclude.contains(&req.id.as_str()))
        .filter(|req| {
            matches!(
                req.status,
                RequisitionStatus::Submitted | RequisitionStatus::Approved
            )
        })
        .map(|req| req.total.value())
        .sum();

    let po_commitment: Decimal = state
        .purchase_orders
        .iter()
        .filter(|po| po.status != PoStatus::Canceled)
        .filter(|po| {
            po.linked_requisition_ids.iter().any(|id| {
                state
                    .requisition(id)
                    .map_or(false, |req| req.cost_center == cost_center)
            })
        })
        .map(|po| po.total.value())
        .sum();

    Amount::new_unchecked(requisition_commitment + po_commitment)
}

/// Usage and headroom for a cost center; `None` when no budget is
/// configured for it.
pub fn budget_usage(state: &State, cost_center: &str, exclude: &[&str]) -> Option<BudgetUsage> {
    let budget = state.budget_for_cost_center(cost_center)?.clone();
    let usage = commitment(state, cost_center, exclude);
    let remaining = budget.amount.value() - usage.value();

    Some(BudgetUsage {
        budget,
        usage,
        remaining,
    })
}

/// Gate a new spend against the cost center's headroom.
///
/// Cost centers without a configured budget are unconstrained: the
/// check passes with `Ok(None)`.
pub fn ensure_available(
    state: &State,
    cost_center: &str,
    amount: Amount,
    exclude: &[&str],
) -> Result<Option<BudgetCheck>, BudgetError> {
    let Some(summary) = budget_usage(state, cost_center, exclude) else {
        return Ok(None);
    };

    if amount.value() > summary.remaining {
        return Err(BudgetError::Exceeded {
            name: summary.budget.name.clone(),
            cost_center: summary.budget.cost_center.clone(),
            remaining: format_currency(
                summary.remaining.max(Decimal::ZERO),
                &summary.budget.currency,
            ),
            requested: format_currency(amount.value(), &summary.budget.currency),
        });
    }

    Ok(Some(BudgetCheck {
        remaining_after: summary.remaining - amount.value(),
        budget: summary.budget,
        usage: summary.usage,
        remaining: summary.remaining,
    }))
}

/// Usage for every configured budget
pub fn summaries(state: &State) -> Vec<BudgetSummary> {
    state
        .budgets
        .iter()
        .map(|budget| {
            let usage = commitment(state, &budget.cost_center, &[]);
            BudgetSummary {
                usage,
                remaining: budget.amount.value() - usage.value(),
                budget: budget.clone(),
            }
        })
        .collect()
}
