//! Purchase order drafting and maintenance

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use procura_budget::BudgetError;
use procura_core::{Amount, Currency};
use procura_model::{new_id, FileMeta, PoLine, PoStatus, PurchaseOrder, RequisitionStatus};
use procura_store::{MemoryStore, State};

/// Errors from purchase order operations
#[derive(Debug, Error)]
pub enum PoError {
    #[error("Purchase order not found: {0}")]
    NotFound(String),

    #[error("Requisition not found: {0}")]
    RequisitionNotFound(String),

    #[error("Closed or canceled purchase orders cannot be edited")]
    NotEditable,

    #[error(transparent)]
    Budget(#[from] BudgetError),
}

/// Input for drafting a purchase order from a requisition
#[derive(Debug, Clone)]
pub struct PoDraftParams {
    pub requisition_id: String,
    pub vendor_id: String,
    /// Overrides the requisition total (the winning quote's total)
    pub quote_total: Option<Amount>,
    pub currency: Option<Currency>,
    pub terms: Option<String>,
}

/// Partial update for an existing purchase order
#[derive(Debug, Clone, Default)]
pub struct PoChanges {
    pub status: Option<PoStatus>,
    pub payment_proofs: Option<Vec<FileMeta>>,
}

/// Draft a purchase order from a requisition, under the caller's guard.
///
/// Lines are copied from the requisition items and the total comes from
/// the winning quote when one is given. The budget gate runs before any
/// mutation, excluding the source requisition so its own submitted total
/// is not counted twice. On success the order lands at the front of the
/// list and the requisition is marked converted.
pub fn create_po_draft(
    state: &mut State,
    params: &PoDraftParams,
) -> Result<PurchaseOrder, PoError> {
    let requisition = state
        .requisition(&params.requisition_id)
        .ok_or_else(|| PoError::RequisitionNotFound(params.requisition_id.clone()))?;

    let cost_center = requisition.cost_center.clone();
    let lines: Vec<PoLine> = requisition
        .items
        .iter()
        .map(|item| PoLine {
            requisition_item_id: item.id.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total: item.line_total(),
        })
        .collect();
    let total = params.quote_total.unwrap_or(requisition.total);

    if let Some(check) = procura_budget::ensure_available(
        state,
        &cost_center,
        total,
        &[params.requisition_id.as_str()],
    )? {
        tracing::debug!(
            cost_center = %check.budget.cost_center,
            remaining_after = %check.remaining_after,
            "Budget check passed"
        );
    }

    let order = PurchaseOrder {
        id: new_id(),
        po_no: state.next_po_number(),
        vendor_id: params.vendor_id.clone(),
        status: PoStatus::Draft,
        lines,
        total,
        currency: params.currency.clone().unwrap_or_default(),
        terms: params
            .terms
            .clone()
            .unwrap_or_else(|| "Standard terms".to_string()),
        linked_requisition_ids: vec![params.requisition_id.clone()],
        created_at: Utc::now(),
        payment_proofs: vec![],
    };
    state.purchase_orders.insert(0, order.clone());

    if let Some(requisition) = state.requisition_mut(&params.requisition_id) {
        requisition.status = RequisitionStatus::Converted;
        requisition.updated_at = Utc::now();
    }

    tracing::info!(
        po_no = %order.po_no,
        requisition_id = %params.requisition_id,
        total = %order.total,
        "Purchase order drafted"
    );
    Ok(order)
}

/// Purchase order listing, drafting and updates
pub struct PoService {
    store: Arc<MemoryStore>,
}

impl PoService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<PurchaseOrder> {
        self.store.read().purchase_orders.clone()
    }

    pub fn get(&self, id: &str) -> Result<PurchaseOrder, PoError> {
        self.store
            .read()
            .purchase_order(id)
            .cloned()
            .ok_or_else(|| PoError::NotFound(id.to_string()))
    }

    pub fn create_draft(&self, params: &PoDraftParams) -> Result<PurchaseOrder, PoError> {
        let mut state = self.store.write();
        create_po_draft(&mut state, params)
    }

    /// Apply a partial update. Closed and canceled orders are frozen.
    pub fn update(&self, id: &str, changes: &PoChanges) -> Result<PurchaseOrder, PoError> {
        let mut state = self.store.write();
        let order = state
            .purchase_order_mut(id)
            .ok_or_else(|| PoError::NotFound(id.to_string()))?;

        if matches!(order.status, PoStatus::Closed | PoStatus::Canceled) {
            return Err(PoError::NotEditable);
        }

        if let Some(status) = changes.status {
            order.status = status;
        }
        if let Some(proofs) = &changes.payment_proofs {
            order.payment_proofs = proofs.clone();
        }

        tracing::info!(po_no = %order.po_no, status = %order.status, "Purchase order updated");
        Ok(order.clone())
    }
}
