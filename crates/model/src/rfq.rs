//! RFQs - requests for quotation sent to vendors

use chrono::{DateTime, Utc};
use procura_core::{Amount, Currency};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// RFQ lifecycle status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RfqStatus {
    Draft,
    Sent,
    Received,
    Closed,
}

/// Where a quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QuoteSource {
    /// Entered by procurement staff on the vendor's behalf
    Admin,
    /// Submitted by the vendor through the public quote portal
    Vendor,
}

/// One quoted line, referencing a requisition item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub requisition_item_id: String,
    pub unit_price: Amount,
    pub currency: Currency,
    pub lead_time_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A vendor's quote against an RFQ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub vendor_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_company: Option<String>,
    pub items: Vec<QuoteItem>,
    pub subtotal: Amount,
    pub taxes: Amount,
    pub shipping: Amount,
    pub total: Amount,
    /// Longest lead time across the quoted items
    pub lead_time_days: u32,
    pub payment_terms: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<QuoteSource>,
}

/// A request for quotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rfq {
    pub id: String,
    pub rfq_no: String,
    pub requisition_id: String,
    pub vendor_ids: Vec<String>,
    pub status: RfqStatus,
    pub quotes: Vec<Quote>,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Rfq {
    /// The quote submitted by the given vendor, if any
    pub fn quote_from(&self, vendor_id: &str) -> Option<&Quote> {
        self.quotes.iter().find(|quote| quote.vendor_id == vendor_id)
    }
}
