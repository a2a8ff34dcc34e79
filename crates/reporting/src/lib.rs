//! Procura Reporting - read models over the live collections
//!
//! Nothing in this crate mutates state. Every function takes a `&State`
//! snapshot and derives its answer on the spot: the dashboard payload,
//! the PO-centric procurement report, the document listing and the audit
//! feed. Callers already holding a store guard pass it straight through;
//! the [`ReportingService`] facade takes the read guard for them.

pub mod documents;
pub mod metrics;
pub mod report;
pub mod service;

pub use documents::{list_audit_events, list_documents, AuditEventRecord, DocumentRecord, RecordEntity};
pub use metrics::{dashboard_metrics, DashboardMetrics};
pub use report::{procurement_report, report_by_id, ProcurementRecord};
pub use service::ReportingService;
