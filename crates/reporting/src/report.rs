//! PO-centric procurement report.
//!
//! One record per purchase order that made it past draft, joined with
//! its vendor, the linked requisitions (trail included), any RFQs run
//! against those requisitions, and the PO lines matched back to the
//! requisition items they were copied from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use procura_core::{Amount, Currency};
use procura_model::{
    ApprovalEvent, PoStatus, Requisition, RequisitionStatus, Rfq, RfqStatus, VendorCategory,
};
use procura_store::State;

/// Statuses that count as fulfilled procurement
const SUCCESS_STATUSES: [PoStatus; 3] = [
    PoStatus::Issued,
    PoStatus::PartiallyReceived,
    PoStatus::Closed,
];

/// One PO line joined back to its requisition item
#[derive(Debug, Clone, Serialize)]
pub struct ReportLineItem {
    pub requisition_item_id: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Amount,
    pub total: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<VendorCategory>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRequisitionItem {
    pub id: String,
    pub description: String,
    pub quantity: Decimal,
    pub uom: String,
    pub unit_price: Amount,
    pub total: Amount,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRequisition {
    pub id: String,
    pub req_no: String,
    pub department: String,
    pub cost_center: String,
    pub total: Amount,
    pub status: RequisitionStatus,
    pub created_at: DateTime<Utc>,
    pub approval_trail: Vec<ApprovalEvent>,
    pub items: Vec<ReportRequisitionItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRfq {
    pub id: String,
    pub rfq_no: String,
    pub status: RfqStatus,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub vendor_count: usize,
    pub quote_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportVendor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: VendorCategory,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportPo {
    pub id: String,
    pub po_no: String,
    pub status: PoStatus,
    pub total: Amount,
    pub currency: Currency,
    pub terms: String,
    pub created_at: DateTime<Utc>,
}

/// Everything known about one fulfilled purchase order
#[derive(Debug, Clone, Serialize)]
pub struct ProcurementRecord {
    pub id: String,
    pub po: ReportPo,
    pub vendor: Option<ReportVendor>,
    pub requisitions: Vec<ReportRequisition>,
    pub rfqs: Vec<ReportRfq>,
    pub line_items: Vec<ReportLineItem>,
}

fn requisition_summary(req: &Requisition) -> ReportRequisition {
    ReportRequisition {
        id: req.id.clone(),
        req_no: req.req_no.clone(),
        department: req.department.clone(),
        cost_center: req.cost_center.clone(),
        total: req.total,
        status: req.status,
        created_at: req.created_at,
        approval_trail: req.approval_trail.clone(),
        items: req
            .items
            .iter()
            .map(|item| ReportRequisitionItem {
                id: item.id.clone(),
                description: item.description.clone(),
                quantity: item.quantity,
                uom: item.uom.clone(),
                unit_price: item.unit_price,
                total: item.line_total(),
            })
            .collect(),
    }
}

fn rfq_summary(rfq: &Rfq) -> ReportRfq {
    ReportRfq {
        id: rfq.id.clone(),
        rfq_no: rfq.rfq_no.clone(),
        status: rfq.status,
        due_date: rfq.due_date,
        created_at: rfq.created_at,
        vendor_count: rfq.vendor_ids.len(),
        quote_count: rfq.quotes.len(),
    }
}

/// Issued, partially received and closed purchase orders with their
/// linked context, newest first.
pub fn procurement_report(state: &State) -> Vec<ProcurementRecord> {
    let mut records: Vec<ProcurementRecord> = state
        .purchase_orders
        .iter()
        .filter(|po| SUCCESS_STATUSES.contains(&po.status))
        .map(|po| {
            let linked: Vec<&Requisition> = po
                .linked_requisition_ids
                .iter()
                .filter_map(|id| state.requisition(id))
                .collect();
            let rfqs: Vec<ReportRfq> = state
                .rfqs
                .iter()
                .filter(|rfq| linked.iter().any(|req| req.id == rfq.requisition_id))
                .map(rfq_summary)
                .collect();
            let vendor = state.vendor(&po.vendor_id).map(|vendor| ReportVendor {
                id: vendor.id.clone(),
                name: vendor.name.clone(),
                email: vendor.email.clone(),
                phone: vendor.phone.clone(),
                category: vendor.category,
            });

            let line_items = po
                .lines
                .iter()
                .map(|line| {
                    let matched = linked
                        .iter()
                        .flat_map(|req| req.items.iter())
                        .find(|item| item.id == line.requisition_item_id);
                    ReportLineItem {
                        requisition_item_id: line.requisition_item_id.clone(),
                        description: matched
                            .map_or_else(|| "Item".to_string(), |item| item.description.clone()),
                        quantity: line.quantity,
                        unit_price: line.unit_price,
                        total: line.total,
                        uom: matched.map(|item| item.uom.clone()),
                        category: matched.map(|item| item.category),
                    }
                })
                .collect();

            ProcurementRecord {
                id: po.id.clone(),
                po: ReportPo {
                    id: po.id.clone(),
                    po_no: po.po_no.clone(),
                    status: po.status,
                    total: po.total,
                    currency: po.currency.clone(),
                    terms: po.terms.clone(),
                    created_at: po.created_at,
                },
                vendor,
                requisitions: linked.into_iter().map(requisition_summary).collect(),
                rfqs,
                line_items,
            }
        })
        .collect();

    records.sort_by(|a, b| b.po.created_at.cmp(&a.po.created_at));
    records
}

/// A single report record by purchase order id
pub fn report_by_id(state: &State, id: &str) -> Option<ProcurementRecord> {
    procurement_report(state)
        .into_iter()
        .find(|record| record.id == id)
}
