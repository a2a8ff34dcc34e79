//! Requisitions - purchase requests and their approval state

use chrono::{DateTime, Utc};
use procura_core::{Amount, Currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::attachment::FileMeta;
use crate::roles::Role;
use crate::rule::ApprovalStep;
use crate::vendor::VendorCategory;

/// Lifecycle status of a requisition.
///
/// `rejected` is historical: no transition produces it, but seeded data
/// can carry it. `converted` is terminal and set when a purchase order
/// draft is created from the requisition.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumString,
    Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequisitionStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
    Converted,
}

/// Action recorded in the approval trail
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAction {
    Submitted,
    Approved,
    Returned,
    Rejected,
}

/// One entry in a requisition's append-only approval trail.
///
/// Step 0 with role `employee` records the submission itself; steps 1..
/// mirror the approval steps acted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalEvent {
    pub step: u32,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub action: ApprovalAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub at: DateTime<Utc>,
}

/// One line item on a requisition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequisitionItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub description: String,
    /// Validated positive; fractional quantities are allowed (e.g. 2.5 tons)
    pub quantity: Decimal,
    pub uom: String,
    pub unit_price: Amount,
    pub currency: Currency,
    pub category: VendorCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_preference_id: Option<String>,
}

impl RequisitionItem {
    /// quantity x unit price for this line
    pub fn line_total(&self) -> Amount {
        // SAFETY: quantity is validated positive and unit_price non-negative
        Amount::new_unchecked(self.quantity * self.unit_price.value())
    }
}

/// Sum of line totals across the given items
pub fn total_of(items: &[RequisitionItem]) -> Amount {
    let sum: Decimal = items.iter().map(|item| item.line_total().value()).sum();
    Amount::new_unchecked(sum)
}

/// A purchase requisition.
///
/// `approval_steps` is fixed at submission time by rule evaluation and is
/// only cleared by an edit; the trail is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requisition {
    pub id: String,
    pub req_no: String,
    pub requester_id: String,
    pub department: String,
    pub cost_center: String,
    pub needed_by: DateTime<Utc>,
    pub status: RequisitionStatus,
    pub items: Vec<RequisitionItem>,
    pub attachments: Vec<FileMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub total: Amount,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub approval_trail: Vec<ApprovalEvent>,
    pub approval_steps: Vec<ApprovalStep>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_id;
    use rust_decimal_macros::dec;

    fn item(quantity: Decimal, unit_price: Decimal) -> RequisitionItem {
        RequisitionItem {
            id: new_id(),
            sku: None,
            description: "Enterprise Laptops".to_string(),
            quantity,
            uom: "unit".to_string(),
            unit_price: Amount::new(unit_price).unwrap(),
            currency: Currency::Idr,
            category: VendorCategory::It,
            vendor_preference_id: None,
        }
    }

    #[test]
    fn test_line_total() {
        let line = item(dec!(10), dec!(25_000_000));
        assert_eq!(line.line_total().value(), dec!(250_000_000));
    }

    #[test]
    fn test_total_of_sums_lines() {
        let items = vec![item(dec!(10), dec!(25_000_000)), item(dec!(10), dec!(2_500_000))];
        assert_eq!(total_of(&items).value(), dec!(275_000_000));
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(RequisitionStatus::Draft.to_string(), "draft");
        assert_eq!(
            serde_json::to_string(&RequisitionStatus::Converted).unwrap(),
            "\"converted\""
        );
        assert_eq!(ApprovalAction::Returned.to_string(), "returned");
    }
}
