//! Dashboard aggregation.
//!
//! Derived in one pass over a state snapshot. Map-shaped sections use
//! `BTreeMap` so the serialized payload is deterministic.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use procura_budget::BudgetSummary;
use procura_core::Amount;
use procura_model::{ApprovalAction, ApprovalEvent, PoStatus, RequisitionStatus, RfqStatus};
use procura_store::State;

use crate::documents::{list_audit_events, AuditEventRecord};

const MS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

#[derive(Debug, Clone, Serialize)]
pub struct RequisitionMetrics {
    pub total: usize,
    /// Drafts plus submitted
    pub open: usize,
    pub pending_approvals: usize,
    /// Submission to last approval, averaged, one decimal place
    pub average_approval_days: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RfqMetrics {
    pub total: usize,
    pub in_progress: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    /// `YYYY-MM` bucket key
    pub month: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoMetrics {
    pub total: usize,
    pub status: BTreeMap<String, usize>,
    pub total_value: Decimal,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetMetrics {
    pub total: Decimal,
    pub used: Decimal,
    pub remaining: Decimal,
    /// The three tightest budgets by remaining headroom
    pub summaries: Vec<BudgetSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentRequisition {
    pub id: String,
    pub req_no: String,
    pub department: String,
    pub status: RequisitionStatus,
    pub total: Amount,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentPo {
    pub id: String,
    pub po_no: String,
    pub status: PoStatus,
    pub total: Amount,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentActivity {
    pub requisitions: Vec<RecentRequisition>,
    pub pos: Vec<RecentPo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityMetrics {
    pub audits: Vec<AuditEventRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VendorSpend {
    pub id: String,
    pub name: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct VendorMetrics {
    pub top: Vec<VendorSpend>,
}

/// The full dashboard payload
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    pub requisitions: RequisitionMetrics,
    /// Pending submitted requisitions bucketed by the role they wait on
    pub approvals: BTreeMap<String, usize>,
    pub rfqs: RfqMetrics,
    pub pos: PoMetrics,
    pub spend_by_category: BTreeMap<String, Decimal>,
    pub spend_total: Decimal,
    pub budget: BudgetMetrics,
    pub activity: ActivityMetrics,
    pub recent: RecentActivity,
    pub vendors: VendorMetrics,
}

/// Submission-to-final-approval duration in days, when both ends exist
fn approval_duration_days(trail: &[ApprovalEvent]) -> Option<f64> {
    let submitted = trail
        .iter()
        .find(|event| event.action == ApprovalAction::Submitted)?;
    let last_approval = trail
        .iter()
        .filter(|event| event.action == ApprovalAction::Approved)
        .max_by_key(|event| event.at)?;
    let diff_ms = (last_approval.at - submitted.at).num_milliseconds() as f64;
    Some(diff_ms / MS_PER_DAY)
}

pub fn dashboard_metrics(state: &State) -> DashboardMetrics {
    let open = state
        .requisitions
        .iter()
        .filter(|req| {
            matches!(
                req.status,
                RequisitionStatus::Draft | RequisitionStatus::Submitted
            )
        })
        .count();

    let mut approvals: BTreeMap<String, usize> = BTreeMap::new();
    let mut pending_approvals = 0usize;
    for req in &state.requisitions {
        if req.status != RequisitionStatus::Submitted {
            continue;
        }
        pending_approvals += 1;
        let step = procura_approval::pending_step(req).or_else(|| {
            procura_approval::evaluate_steps(&state.approval_rules, req)
                .first()
                .copied()
        });
        if let Some(step) = step {
            *approvals.entry(step.role.as_str().to_string()).or_default() += 1;
        }
    }

    let durations: Vec<f64> = state
        .requisitions
        .iter()
        .filter_map(|req| approval_duration_days(&req.approval_trail))
        .collect();
    let average_approval_days = if durations.is_empty() {
        0.0
    } else {
        let avg = durations.iter().sum::<f64>() / durations.len() as f64;
        (avg * 10.0).round() / 10.0
    };

    let mut spend_by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    for req in &state.requisitions {
        for item in &req.items {
            *spend_by_category
                .entry(item.category.as_str().to_string())
                .or_default() += item.line_total().value();
        }
    }
    let spend_total: Decimal = spend_by_category.values().copied().sum();

    let mut po_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut trend_map: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut vendor_spend: BTreeMap<String, Decimal> = BTreeMap::new();
    for po in &state.purchase_orders {
        *po_status.entry(po.status.to_string()).or_default() += 1;
        *trend_map
            .entry(po.created_at.format("%Y-%m").to_string())
            .or_default() += po.total.value();
        *vendor_spend.entry(po.vendor_id.clone()).or_default() += po.total.value();
    }
    let total_po_value: Decimal = state
        .purchase_orders
        .iter()
        .map(|po| po.total.value())
        .sum();
    let trend = trend_map
        .into_iter()
        .map(|(month, amount)| TrendPoint { month, amount })
        .collect();

    let mut top_vendors: Vec<VendorSpend> = vendor_spend
        .into_iter()
        .map(|(id, total)| VendorSpend {
            name: state
                .vendor(&id)
                .map_or_else(|| "Unknown Vendor".to_string(), |vendor| vendor.name.clone()),
            id,
            total,
        })
        .collect();
    top_vendors.sort_by(|a, b| b.total.cmp(&a.total));
    top_vendors.truncate(4);

    let budgets = procura_budget::summaries(state);
    let total_budget: Decimal = budgets
        .iter()
        .map(|summary| summary.budget.amount.value())
        .sum();
    let used_budget: Decimal = budgets.iter().map(|summary| summary.usage.value()).sum();
    let mut tightest = budgets;
    tightest.sort_by(|a, b| a.remaining.cmp(&b.remaining));
    tightest.truncate(3);

    let mut recent_requisitions: Vec<RecentRequisition> = state
        .requisitions
        .iter()
        .map(|req| RecentRequisition {
            id: req.id.clone(),
            req_no: req.req_no.clone(),
            department: req.department.clone(),
            status: req.status,
            total: req.total,
            created_at: req.created_at,
        })
        .collect();
    recent_requisitions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent_requisitions.truncate(5);

    let mut recent_pos: Vec<RecentPo> = state
        .purchase_orders
        .iter()
        .map(|po| RecentPo {
            id: po.id.clone(),
            po_no: po.po_no.clone(),
            status: po.status,
            total: po.total,
            created_at: po.created_at,
        })
        .collect();
    recent_pos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent_pos.truncate(5);

    let audits: Vec<AuditEventRecord> = list_audit_events(state).into_iter().take(6).collect();

    DashboardMetrics {
        requisitions: RequisitionMetrics {
            total: state.requisitions.len(),
            open,
            pending_approvals,
            average_approval_days,
        },
        approvals,
        rfqs: RfqMetrics {
            total: state.rfqs.len(),
            in_progress: state
                .rfqs
                .iter()
                .filter(|rfq| rfq.status != RfqStatus::Closed)
                .count(),
        },
        pos: PoMetrics {
            total: state.purchase_orders.len(),
            status: po_status,
            total_value: total_po_value,
            trend,
        },
        spend_by_category,
        spend_total,
        budget: BudgetMetrics {
            total: total_budget,
            used: used_budget,
            remaining: total_budget - used_budget,
            summaries: tightest,
        },
        activity: ActivityMetrics { audits },
        recent: RecentActivity {
            requisitions: recent_requisitions,
            pos: recent_pos,
        },
        vendors: VendorMetrics { top: top_vendors },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_store::MemoryStore;
    use rust_decimal_macros::dec;

    fn metrics() -> DashboardMetrics {
        let store = MemoryStore::seeded();
        let state = store.read();
        dashboard_metrics(&state)
    }

    #[test]
    fn test_requisition_counters() {
        let m = metrics();
        assert_eq!(m.requisitions.total, 5);
        assert_eq!(m.requisitions.open, 2);
        assert_eq!(m.requisitions.pending_approvals, 1);
        // Durations of 2, 1 and 3 days across the approved trails
        assert_eq!(m.requisitions.average_approval_days, 2.0);
    }

    #[test]
    fn test_pending_approvals_bucketed_by_role() {
        let m = metrics();
        // The submitted requisition waits on its procurement admin step
        assert_eq!(m.approvals.len(), 1);
        assert_eq!(m.approvals.get("procurement_admin"), Some(&1));
    }

    #[test]
    fn test_spend_by_category() {
        let m = metrics();
        assert_eq!(m.spend_by_category.get("IT"), Some(&dec!(310_000_000)));
        assert_eq!(m.spend_by_category.get("Office"), Some(&dec!(135_000_000)));
        assert_eq!(
            m.spend_by_category.get("Logistics"),
            Some(&dec!(330_000_000))
        );
        assert_eq!(m.spend_total, dec!(775_000_000));
    }

    #[test]
    fn test_po_rollups() {
        let m = metrics();
        assert_eq!(m.pos.total, 3);
        assert_eq!(m.pos.status.get("draft"), Some(&1));
        assert_eq!(m.pos.status.get("issued"), Some(&1));
        assert_eq!(m.pos.status.get("closed"), Some(&1));
        assert_eq!(m.pos.total_value, dec!(560_000_000));

        let trend_total: Decimal = m.pos.trend.iter().map(|point| point.amount).sum();
        assert_eq!(trend_total, dec!(560_000_000));
        assert!(m
            .pos
            .trend
            .windows(2)
            .all(|pair| pair[0].month < pair[1].month));
    }

    #[test]
    fn test_budget_rollup_and_tightest() {
        let m = metrics();
        assert_eq!(m.budget.total, dec!(2_750_000_000));
        assert_eq!(m.budget.used, dec!(970_000_000));
        assert_eq!(m.budget.remaining, dec!(1_780_000_000));

        let cost_centers: Vec<&str> = m
            .budget
            .summaries
            .iter()
            .map(|summary| summary.budget.cost_center.as_str())
            .collect();
        assert_eq!(cost_centers, vec!["LOG-450", "OPS-110", "FAC-202"]);
    }

    #[test]
    fn test_recent_lists() {
        let m = metrics();
        let numbers: Vec<&str> = m
            .recent
            .requisitions
            .iter()
            .map(|req| req.req_no.as_str())
            .collect();
        assert_eq!(numbers[0], "PR-2024-0003");
        assert_eq!(numbers.last().copied(), Some("PR-2024-0005"));

        assert_eq!(m.recent.pos.len(), 3);
        assert_eq!(m.recent.pos.last().unwrap().po_no, "PO-2024-022");
        assert_eq!(m.activity.audits.len(), 6);
    }

    #[test]
    fn test_top_vendors_by_po_spend() {
        let m = metrics();
        let names: Vec<&str> = m
            .vendors
            .top
            .iter()
            .map(|vendor| vendor.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Nusantara Tech Supplies",
                "Sahabat Office Mart",
                "LogiXpress Indonesia"
            ]
        );
        assert_eq!(m.vendors.top[0].total, dec!(275_000_000));
    }

    #[test]
    fn test_unknown_vendor_label() {
        let store = MemoryStore::seeded();
        {
            let mut state = store.write();
            state.purchase_orders[0].vendor_id = "quotes@borneosupply.id".to_string();
        }
        let m = dashboard_metrics(&store.read());
        assert!(m
            .vendors
            .top
            .iter()
            .any(|vendor| vendor.name == "Unknown Vendor"));
    }

    #[test]
    fn test_rfq_counters() {
        let m = metrics();
        assert_eq!(m.rfqs.total, 2);
        assert_eq!(m.rfqs.in_progress, 2);
    }
}
