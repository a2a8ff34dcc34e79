//! Store-backed facade over the report derivations

use std::sync::Arc;

use procura_store::MemoryStore;

use crate::documents::{self, AuditEventRecord, DocumentRecord};
use crate::metrics::{self, DashboardMetrics};
use crate::report::{self, ProcurementRecord};

/// Read-model queries against the shared store. Each call takes its own
/// read guard; callers already holding one use the pure functions
/// directly.
pub struct ReportingService {
    store: Arc<MemoryStore>,
}

impl ReportingService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn dashboard(&self) -> DashboardMetrics {
        metrics::dashboard_metrics(&self.store.read())
    }

    pub fn procurement_report(&self) -> Vec<ProcurementRecord> {
        report::procurement_report(&self.store.read())
    }

    pub fn procurement_record(&self, id: &str) -> Option<ProcurementRecord> {
        report::report_by_id(&self.store.read(), id)
    }

    pub fn documents(&self) -> Vec<DocumentRecord> {
        documents::list_documents(&self.store.read())
    }

    pub fn audit_events(&self) -> Vec<AuditEventRecord> {
        documents::list_audit_events(&self.store.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_reads_seeded_state() {
        let service = ReportingService::new(Arc::new(MemoryStore::seeded()));

        assert_eq!(service.dashboard().requisitions.total, 5);
        assert_eq!(service.procurement_report().len(), 2);
        assert!(service.documents().is_empty());
        assert_eq!(service.audit_events().len(), 14);
        assert!(service.procurement_record("nope").is_none());
    }
}
