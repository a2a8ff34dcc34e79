//! Input forms - validated payloads accepted by the services
//!
//! Mirrors the validation layer of the web tier: each form checks its own
//! invariants before a service touches the store. Non-negativity of money
//! is already carried by `Amount`, so only the residual rules live here.

use chrono::{DateTime, Utc};
use procura_core::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attachment::FileMeta;
use crate::roles::Role;
use crate::rule::{ApprovalStep, RuleConditions};
use crate::vendor::VendorCategory;

/// A rejected input field with a human-readable reason
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn is_valid_email(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

/// One line item on a requisition form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequisitionItemForm {
    /// Existing item id when editing; a fresh id is assigned when absent
    pub id: Option<String>,
    pub sku: Option<String>,
    pub description: String,
    pub quantity: Decimal,
    pub uom: String,
    pub unit_price: Amount,
    pub currency: procura_core::Currency,
    pub category: VendorCategory,
    pub vendor_preference_id: Option<String>,
}

/// Create/edit payload for a requisition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequisitionForm {
    pub department: String,
    pub cost_center: String,
    pub needed_by: DateTime<Utc>,
    pub notes: Option<String>,
    pub items: Vec<RequisitionItemForm>,
    pub attachments: Vec<FileMeta>,
}

impl RequisitionForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.department.trim().len() < 2 {
            return Err(ValidationError::new("department", "Department is required"));
        }
        if self.cost_center.trim().len() < 2 {
            return Err(ValidationError::new("cost_center", "Cost center is required"));
        }
        if self.items.is_empty() {
            return Err(ValidationError::new("items", "Add at least one line item"));
        }
        for item in &self.items {
            if item.description.trim().len() < 3 {
                return Err(ValidationError::new(
                    "items.description",
                    "Description must be at least 3 characters",
                ));
            }
            if item.quantity <= Decimal::ZERO {
                return Err(ValidationError::new("items.quantity", "Quantity must be positive"));
            }
            if item.uom.trim().is_empty() {
                return Err(ValidationError::new("items.uom", "Unit of measure is required"));
            }
        }
        Ok(())
    }
}

/// Create/edit payload for an approval rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleForm {
    pub name: String,
    pub conditions: RuleConditions,
    pub steps: Vec<ApprovalStep>,
}

impl RuleForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().len() < 3 {
            return Err(ValidationError::new("name", "Name must be at least 3 characters"));
        }
        if self.conditions.is_empty() {
            return Err(ValidationError::new("conditions", "Specify at least one condition"));
        }
        if self.steps.is_empty() {
            return Err(ValidationError::new("steps", "Add at least one approval step"));
        }
        for (index, step) in self.steps.iter().enumerate() {
            if self.steps[..index].iter().any(|other| other.role == step.role) {
                return Err(ValidationError::new("steps", "Step roles must be unique"));
            }
        }
        Ok(())
    }
}

/// Create/edit payload for a vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: VendorCategory,
    pub rating: u8,
    pub address: String,
    pub tax_id: String,
    pub attachments: Vec<FileMeta>,
    /// Defaults to active when absent
    pub is_active: Option<bool>,
}

impl VendorForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name = self.name.trim();
        if name.len() < 2 {
            return Err(ValidationError::new("name", "Name is required"));
        }
        if name.len() > 120 {
            return Err(ValidationError::new("name", "Name must be at most 120 characters"));
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::new("email", "Valid email is required"));
        }
        if self.phone.trim().len() < 6 {
            return Err(ValidationError::new("phone", "Phone must be at least 6 characters"));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::new("rating", "Rating must be between 1 and 5"));
        }
        if self.address.trim().len() < 4 {
            return Err(ValidationError::new(
                "address",
                "Address must be at least 4 characters",
            ));
        }
        Ok(())
    }
}

/// Create payload for an RFQ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfqForm {
    pub requisition_id: String,
    pub vendor_ids: Vec<String>,
    pub due_date: DateTime<Utc>,
}

impl RfqForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.requisition_id.trim().is_empty() {
            return Err(ValidationError::new("requisition_id", "Requisition is required"));
        }
        if self.vendor_ids.is_empty() {
            return Err(ValidationError::new("vendor_ids", "Select at least one vendor"));
        }
        if self.due_date <= Utc::now() {
            return Err(ValidationError::new("due_date", "Due date must be in the future"));
        }
        Ok(())
    }
}

/// One quoted line on the public vendor quote form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteItemForm {
    pub requisition_item_id: String,
    pub unit_price: Amount,
    pub lead_time_days: u32,
    pub notes: Option<String>,
}

/// Payload a vendor submits through the public quote portal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorQuoteForm {
    pub vendor_name: String,
    pub vendor_email: String,
    pub vendor_company: Option<String>,
    pub payment_terms: String,
    pub taxes: Amount,
    pub shipping: Amount,
    pub notes: Option<String>,
    pub items: Vec<QuoteItemForm>,
    pub captcha_id: String,
    pub captcha_answer: u32,
}

impl VendorQuoteForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.vendor_name.trim().len() < 2 {
            return Err(ValidationError::new("vendor_name", "Vendor name is required"));
        }
        if !is_valid_email(&self.vendor_email) {
            return Err(ValidationError::new("vendor_email", "Valid email is required"));
        }
        if self.payment_terms.trim().len() < 3 {
            return Err(ValidationError::new("payment_terms", "Payment terms are required"));
        }
        if self.items.is_empty() {
            return Err(ValidationError::new("items", "Add at least one quote item"));
        }
        Ok(())
    }
}

/// Create payload for a user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().len() < 2 {
            return Err(ValidationError::new("name", "Name is required"));
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::new("email", "Valid email is required"));
        }
        Ok(())
    }
}
