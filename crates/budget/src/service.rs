//! Store-backed facade over the budget math

use std::sync::Arc;

use procura_core::Amount;
use procura_model::Budget;
use procura_store::MemoryStore;

use crate::usage::{self, BudgetCheck, BudgetError, BudgetSummary, BudgetUsage};

/// Budget queries and gate checks against the shared store.
///
/// Each call takes its own read guard; callers already holding a guard
/// (the requisition submit path) use the pure functions in [`usage`]
/// directly instead.
pub struct BudgetService {
    store: Arc<MemoryStore>,
}

impl BudgetService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Budget> {
        self.store.read().budgets.clone()
    }

    pub fn by_cost_center(&self, cost_center: &str) -> Option<Budget> {
        self.store.read().budget_for_cost_center(cost_center).cloned()
    }

    pub fn usage(&self, cost_center: &str) -> Option<BudgetUsage> {
        usage::budget_usage(&self.store.read(), cost_center, &[])
    }

    pub fn ensure_available(
        &self,
        cost_center: &str,
        amount: Amount,
    ) -> Result<Option<BudgetCheck>, BudgetError> {
        let result = usage::ensure_available(&self.store.read(), cost_center, amount, &[]);
        if let Err(e) = &result {
            tracing::warn!(cost_center = %cost_center, "Budget check failed: {e}");
        }
        result
    }

    pub fn summaries(&self) -> Vec<BudgetSummary> {
        usage::summaries(&self.store.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_service_reads_seeded_budgets() {
        let service = BudgetService::new(Arc::new(MemoryStore::seeded()));

        assert_eq!(service.list().len(), 4);
        let budget = service.by_cost_center("LOG-450").unwrap();
        assert_eq!(budget.name, "Logistics Fleet 2024");

        let usage = service.usage("LOG-450").unwrap();
        assert_eq!(usage.usage.value(), dec!(270_000_000));
    }

    #[test]
    fn test_service_gate() {
        let service = BudgetService::new(Arc::new(MemoryStore::seeded()));

        let ok = service
            .ensure_available("OPS-110", Amount::new(dec!(60_000_000)).unwrap())
            .unwrap();
        assert_eq!(ok.unwrap().remaining_after, dec!(390_000_000));

        let err = service
            .ensure_available("OPS-110", Amount::new(dec!(450_000_001)).unwrap())
            .unwrap_err();
        assert!(matches!(err, BudgetError::Exceeded { .. }));
    }
}
