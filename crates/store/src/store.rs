//! Shared store with interior mutability

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::seed;
use crate::state::State;

/// Process-wide store the services share
///
/// Callers take one guard per operation and hold it across the whole
/// check-then-mutate sequence. Never take a second guard while one is
/// held; the lock is not reentrant.
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create a store with no data
    pub fn empty() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    /// Create a store preloaded with the demo dataset
    pub fn seeded() -> Self {
        Self {
            state: RwLock::new(seed::demo_state()),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap()
    }

    /// Throw away all data and reload the demo dataset
    pub fn reset(&self) {
        *self.state.write().unwrap() = seed::demo_state();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_model::RequisitionStatus;

    #[test]
    fn test_empty_store_has_no_data() {
        let store = MemoryStore::empty();
        let state = store.read();
        assert!(state.users.is_empty());
        assert!(state.requisitions.is_empty());
    }

    #[test]
    fn test_seeded_store_counts() {
        let store = MemoryStore::seeded();
        let state = store.read();
        assert_eq!(state.users.len(), 4);
        assert_eq!(state.vendors.len(), 6);
        assert_eq!(state.budgets.len(), 4);
        assert_eq!(state.requisitions.len(), 5);
        assert_eq!(state.approval_rules.len(), 3);
        assert_eq!(state.rfqs.len(), 2);
        assert_eq!(state.purchase_orders.len(), 3);
    }

    #[test]
    fn test_reset_restores_seed() {
        let store = MemoryStore::seeded();
        {
            let mut state = store.write();
            state.requisitions.clear();
        }
        assert!(store.read().requisitions.is_empty());

        store.reset();
        let state = store.read();
        assert_eq!(state.requisitions.len(), 5);
        assert!(state
            .requisitions
            .iter()
            .any(|req| req.status == RequisitionStatus::Draft));
    }
}
