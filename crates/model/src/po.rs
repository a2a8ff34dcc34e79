//! Purchase orders

use chrono::{DateTime, Utc};
use procura_core::{Amount, Currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::attachment::FileMeta;

/// Purchase order lifecycle status.
///
/// Everything except `canceled` counts as committed spend against the
/// linked cost center's budget.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumString,
    Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PoStatus {
    Draft,
    Issued,
    PartiallyReceived,
    Closed,
    Canceled,
}

/// One purchase order line, copied from a requisition item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoLine {
    pub requisition_item_id: String,
    pub quantity: Decimal,
    pub unit_price: Amount,
    pub total: Amount,
}

/// A purchase order issued to one vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: String,
    pub po_no: String,
    pub vendor_id: String,
    pub status: PoStatus,
    pub lines: Vec<PoLine>,
    pub total: Amount,
    pub currency: Currency,
    pub terms: String,
    pub linked_requisition_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub payment_proofs: Vec<FileMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(PoStatus::PartiallyReceived.to_string(), "partially_received");
        assert_eq!(
            serde_json::to_string(&PoStatus::PartiallyReceived).unwrap(),
            "\"partially_received\""
        );
    }
}
