//! Document listing and audit feed.
//!
//! Neither is stored anywhere: documents are the requisition attachments
//! and PO payment proofs viewed as one collection, and the audit feed is
//! the approval trails plus one creation event per purchase order.

use chrono::{DateTime, Utc};
use serde::Serialize;

use procura_model::{FileMeta, Role};
use procura_store::State;

/// Which collection a derived record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordEntity {
    Requisition,
    PurchaseOrder,
}

/// One uploaded file with the context of its owning document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    pub id: String,
    pub name: String,
    pub source: RecordEntity,
    /// Human document number of the owner (`PR-...` or `PO-...`)
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub url: String,
    pub mime: String,
    pub size: u64,
}

/// One entry in the derived audit feed
#[derive(Debug, Clone, Serialize)]
pub struct AuditEventRecord {
    pub id: String,
    pub entity: RecordEntity,
    pub reference: String,
    pub action: String,
    /// Resolved user name, or "System" when the event has no user
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn document(
    file: &FileMeta,
    source: RecordEntity,
    reference: &str,
    cost_center: Option<&str>,
    uploaded_at: DateTime<Utc>,
) -> DocumentRecord {
    DocumentRecord {
        id: file.id.clone(),
        name: file.name.clone(),
        source,
        reference: reference.to_string(),
        cost_center: cost_center.map(str::to_string),
        uploaded_at,
        url: file.url.clone(),
        mime: file.mime.clone(),
        size: file.size,
    }
}

/// Every attachment and payment proof across the workspace, newest first.
/// A payment proof inherits the cost center of the first linked
/// requisition still on file.
pub fn list_documents(state: &State) -> Vec<DocumentRecord> {
    let mut documents: Vec<DocumentRecord> = state
        .requisitions
        .iter()
        .flat_map(|req| {
            req.attachments.iter().map(|file| {
                document(
                    file,
                    RecordEntity::Requisition,
                    &req.req_no,
                    Some(&req.cost_center),
                    req.updated_at,
                )
            })
        })
        .collect();

    documents.extend(state.purchase_orders.iter().flat_map(|po| {
        let cost_center = state
            .requisitions
            .iter()
            .find(|req| po.linked_requisition_ids.contains(&req.id))
            .map(|req| req.cost_center.as_str());
        po.payment_proofs.iter().map(move |file| {
            document(
                file,
                RecordEntity::PurchaseOrder,
                &po.po_no,
                cost_center,
                po.created_at,
            )
        })
    }));

    documents.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
    documents
}

/// Approval trail entries and PO creation events as one feed, newest
/// first. Event ids are stable across calls for the same state.
pub fn list_audit_events(state: &State) -> Vec<AuditEventRecord> {
    let mut events: Vec<AuditEventRecord> = state
        .requisitions
        .iter()
        .flat_map(|req| {
            req.approval_trail.iter().map(|event| {
                let actor = event
                    .user_id
                    .as_deref()
                    .and_then(|id| state.user(id))
                    .map_or_else(|| "System".to_string(), |user| user.name.clone());
                AuditEventRecord {
                    id: format!(
                        "{}-{}-{}-{}-{}",
                        req.id,
                        event.step,
                        event.role,
                        event.action,
                        event.at.timestamp_millis()
                    ),
                    entity: RecordEntity::Requisition,
                    reference: req.req_no.clone(),
                    action: event.action.to_string(),
                    actor,
                    role: Some(event.role),
                    at: event.at,
                    notes: event.comment.clone(),
                }
            })
        })
        .collect();

    events.extend(state.purchase_orders.iter().map(|po| AuditEventRecord {
        id: format!("{}-created", po.id),
        entity: RecordEntity::PurchaseOrder,
        reference: po.po_no.clone(),
        action: format!("status:{}", po.status),
        actor: "System".to_string(),
        role: None,
        at: po.created_at,
        notes: None,
    }));

    events.sort_by(|a, b| b.at.cmp(&a.at));
    events
}
