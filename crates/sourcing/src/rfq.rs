//! RFQ lifecycle and vendor quote intake.
//!
//! The portal-facing pieces live here too: a price-free public view of
//! the RFQ and the quote submission endpoint vendors reach without an
//! account, gated by a captcha.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use procura_core::{Amount, Currency};
use procura_model::{
    new_id, PurchaseOrder, Quote, QuoteItem, QuoteSource, RequisitionStatus, Rfq, RfqForm,
    RfqStatus, Role, User, ValidationError, VendorCategory, VendorQuoteForm,
};
use procura_store::MemoryStore;

use crate::captcha::CaptchaStore;
use crate::po::{create_po_draft, PoDraftParams, PoError};

/// Errors from RFQ operations
#[derive(Debug, Error)]
pub enum RfqError {
    #[error("RFQ not found: {0}")]
    NotFound(String),

    #[error("Requisition not found: {0}")]
    RequisitionNotFound(String),

    #[error("Linked requisition not found")]
    LinkedRequisitionMissing,

    #[error("Only approver or procurement admin can create RFQ")]
    CreateForbidden,

    #[error("Only approved requisitions can be converted to RFQ")]
    RequisitionNotApproved,

    #[error("Winner must be part of RFQ vendors")]
    WinnerNotInvited,

    #[error("RFQ already closed")]
    AlreadyClosed,

    #[error("Invalid captcha response")]
    InvalidCaptcha,

    #[error("Invalid requisition item in quote")]
    UnknownQuoteItem,

    #[error(transparent)]
    Po(#[from] PoError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Partial update for an RFQ
#[derive(Debug, Clone, Default)]
pub struct RfqChanges {
    pub quotes: Option<Vec<Quote>>,
    pub status: Option<RfqStatus>,
    pub due_date: Option<DateTime<Utc>>,
}

/// One requisition line as shown to vendors, with prices stripped
#[derive(Debug, Clone, Serialize)]
pub struct PublicItemView {
    pub id: String,
    pub description: String,
    pub quantity: Decimal,
    pub uom: String,
    pub currency: Currency,
    pub category: VendorCategory,
}

/// The requisition half of the public RFQ view
#[derive(Debug, Clone, Serialize)]
pub struct PublicRequisitionView {
    pub id: String,
    pub department: String,
    pub needed_by: DateTime<Utc>,
    pub items: Vec<PublicItemView>,
}

/// What the vendor portal may see about an RFQ. Unit prices and totals
/// never appear here.
#[derive(Debug, Clone, Serialize)]
pub struct RfqPublicView {
    pub id: String,
    pub rfq_no: String,
    pub status: RfqStatus,
    pub due_date: DateTime<Utc>,
    pub requisition: PublicRequisitionView,
}

/// RFQ lifecycle: create, send, collect quotes, close on a winner.
///
/// Every operation takes one store guard for its whole sequence; closing
/// drafts the purchase order under the same guard it closes the RFQ.
pub struct RfqService {
    store: Arc<MemoryStore>,
    captcha: Arc<CaptchaStore>,
}

impl RfqService {
    pub fn new(store: Arc<MemoryStore>, captcha: Arc<CaptchaStore>) -> Self {
        Self { store, captcha }
    }

    pub fn list(&self) -> Vec<Rfq> {
        self.store.read().rfqs.clone()
    }

    pub fn get(&self, id: &str) -> Result<Rfq, RfqError> {
        self.store
            .read()
            .rfq(id)
            .cloned()
            .ok_or_else(|| RfqError::NotFound(id.to_string()))
    }

    /// Open a bidding round for an approved requisition
    pub fn create(&self, form: &RfqForm, user: &User) -> Result<Rfq, RfqError> {
        form.validate()?;
        if !matches!(user.role, Role::Approver | Role::ProcurementAdmin) {
            return Err(RfqError::CreateForbidden);
        }

        let mut state = self.store.write();
        let requisition = state
            .requisition(&form.requisition_id)
            .ok_or_else(|| RfqError::RequisitionNotFound(form.requisition_id.clone()))?;
        if !matches!(
            requisition.status,
            RequisitionStatus::Approved | RequisitionStatus::Converted
        ) {
            return Err(RfqError::RequisitionNotApproved);
        }

        let rfq = Rfq {
            id: new_id(),
            rfq_no: state.next_rfq_number(),
            requisition_id: form.requisition_id.clone(),
            vendor_ids: form.vendor_ids.clone(),
            status: RfqStatus::Draft,
            quotes: vec![],
            due_date: form.due_date,
            created_at: Utc::now(),
        };
        state.rfqs.insert(0, rfq.clone());
        tracing::info!(
            rfq_no = %rfq.rfq_no,
            requisition_id = %rfq.requisition_id,
            vendors = rfq.vendor_ids.len(),
            "RFQ created"
        );
        Ok(rfq)
    }

    /// Mark the RFQ as sent to its vendors
    pub fn send(&self, id: &str) -> Result<Rfq, RfqError> {
        let mut state = self.store.write();
        let rfq = state
            .rfq_mut(id)
            .ok_or_else(|| RfqError::NotFound(id.to_string()))?;

        rfq.status = RfqStatus::Sent;
        tracing::info!(rfq_no = %rfq.rfq_no, "RFQ sent");
        Ok(rfq.clone())
    }

    /// Apply a partial update (procurement-side quote edits included)
    pub fn update(&self, id: &str, changes: &RfqChanges) -> Result<Rfq, RfqError> {
        let mut state = self.store.write();
        let rfq = state
            .rfq_mut(id)
            .ok_or_else(|| RfqError::NotFound(id.to_string()))?;

        if let Some(quotes) = &changes.quotes {
            rfq.quotes = quotes.clone();
        }
        if let Some(status) = changes.status {
            rfq.status = status;
        }
        if let Some(due_date) = changes.due_date {
            rfq.due_date = due_date;
        }
        Ok(rfq.clone())
    }

    /// Close the bidding round on a winner and draft the purchase order
    /// from the winning quote.
    ///
    /// The RFQ is marked closed before the order is drafted; a failed
    /// budget gate leaves it closed with no order. A winner without a
    /// submitted quote falls back to the requisition total.
    pub fn close(&self, id: &str, winner_vendor_id: &str) -> Result<Rfq, RfqError> {
        let mut state = self.store.write();
        let rfq = state
            .rfq_mut(id)
            .ok_or_else(|| RfqError::NotFound(id.to_string()))?;
        if !rfq.vendor_ids.iter().any(|vendor| vendor == winner_vendor_id) {
            return Err(RfqError::WinnerNotInvited);
        }

        let requisition_id = rfq.requisition_id.clone();
        let winning_quote = rfq.quote_from(winner_vendor_id).cloned();
        rfq.status = RfqStatus::Closed;
        let closed = rfq.clone();

        if state.requisition(&requisition_id).is_some() {
            create_po_draft(
                &mut state,
                &PoDraftParams {
                    requisition_id,
                    vendor_id: winner_vendor_id.to_string(),
                    quote_total: winning_quote.as_ref().map(|quote| quote.total),
                    currency: winning_quote
                        .as_ref()
                        .and_then(|quote| quote.items.first())
                        .map(|item| item.currency.clone()),
                    terms: winning_quote.map(|quote| quote.payment_terms),
                },
            )?;
        }

        tracing::info!(rfq_no = %closed.rfq_no, winner = %winner_vendor_id, "RFQ closed");
        Ok(closed)
    }

    /// Draft a purchase order for any bidder without closing the round
    pub fn create_po(&self, id: &str, vendor_id: &str) -> Result<PurchaseOrder, RfqError> {
        let mut state = self.store.write();
        let rfq = state
            .rfq(id)
            .ok_or_else(|| RfqError::NotFound(id.to_string()))?;

        let quote = rfq.quote_from(vendor_id).cloned();
        let params = PoDraftParams {
            requisition_id: rfq.requisition_id.clone(),
            vendor_id: vendor_id.to_string(),
            quote_total: quote.as_ref().map(|quote| quote.total),
            currency: quote
                .as_ref()
                .and_then(|quote| quote.items.first())
                .map(|item| item.currency.clone()),
            terms: quote.map(|quote| quote.payment_terms),
        };
        Ok(create_po_draft(&mut state, &params)?)
    }

    /// The vendor-facing view, looked up by id or RFQ number
    /// (case-insensitive). `None` when the RFQ or its requisition is gone.
    pub fn public_view(&self, identifier: &str) -> Option<RfqPublicView> {
        let state = self.store.read();
        let rfq = state.rfq_by_identifier(identifier)?;
        let requisition = state.requisition(&rfq.requisition_id)?;

        Some(RfqPublicView {
            id: rfq.id.clone(),
            rfq_no: rfq.rfq_no.clone(),
            status: rfq.status,
            due_date: rfq.due_date,
            requisition: PublicRequisitionView {
                id: requisition.id.clone(),
                department: requisition.department.clone(),
                needed_by: requisition.needed_by,
                items: requisition
                    .items
                    .iter()
                    .map(|item| PublicItemView {
                        id: item.id.clone(),
                        description: item.description.clone(),
                        quantity: item.quantity,
                        uom: item.uom.clone(),
                        currency: item.currency.clone(),
                        category: item.category,
                    })
                    .collect(),
            },
        })
    }

    /// Quote intake from the public portal.
    ///
    /// The captcha gate runs first. The quote is rebuilt server side:
    /// every line must reference a requisition item, line currency comes
    /// from the requisition, and the subtotal is requisition quantity
    /// times quoted unit price. A vendor known by email submits under its
    /// vendor id and is added to the invite list; an unknown vendor
    /// submits under its normalized email. Resubmission replaces the
    /// vendor's earlier quote.
    pub fn submit_vendor_quote(
        &self,
        rfq_identifier: &str,
        form: &VendorQuoteForm,
    ) -> Result<Quote, RfqError> {
        form.validate()?;
        if !self.captcha.validate(&form.captcha_id, form.captcha_answer) {
            return Err(RfqError::InvalidCaptcha);
        }

        let mut state = self.store.write();
        let rfq = state
            .rfq_by_identifier(rfq_identifier)
            .ok_or_else(|| RfqError::NotFound(rfq_identifier.to_string()))?;
        if rfq.status == RfqStatus::Closed {
            return Err(RfqError::AlreadyClosed);
        }
        let requisition = state
            .requisition(&rfq.requisition_id)
            .ok_or(RfqError::LinkedRequisitionMissing)?;

        let vendor_email = form.vendor_email.to_lowercase();
        let vendor_record = state
            .vendors
            .iter()
            .find(|vendor| vendor.email.eq_ignore_ascii_case(&vendor_email));
        let vendor_id = vendor_record.map_or_else(|| vendor_email.clone(), |v| v.id.clone());
        let vendor_name = vendor_record.map_or_else(|| form.vendor_name.clone(), |v| v.name.clone());

        let mut items = Vec::with_capacity(form.items.len());
        let mut subtotal = Decimal::ZERO;
        let mut lead_time_days = 0u32;
        for line in &form.items {
            let requisition_item = requisition
                .items
                .iter()
                .find(|item| item.id == line.requisition_item_id)
                .ok_or(RfqError::UnknownQuoteItem)?;

            subtotal += requisition_item.quantity * line.unit_price.value();
            lead_time_days = lead_time_days.max(line.lead_time_days);
            items.push(QuoteItem {
                requisition_item_id: requisition_item.id.clone(),
                unit_price: line.unit_price,
                currency: requisition_item.currency.clone(),
                lead_time_days: line.lead_time_days,
                notes: line.notes.clone(),
            });
        }
        let total = subtotal + form.taxes.value() + form.shipping.value();

        let quote = Quote {
            vendor_id: vendor_id.clone(),
            vendor_name: Some(vendor_name),
            vendor_email: Some(vendor_email),
            vendor_company: form.vendor_company.clone(),
            items,
            subtotal: Amount::new_unchecked(subtotal),
            taxes: form.taxes,
            shipping: form.shipping,
            total: Amount::new_unchecked(total),
            lead_time_days,
            payment_terms: form.payment_terms.clone(),
            notes: form.notes.clone(),
            submitted_at: Some(Utc::now()),
            source: Some(QuoteSource::Vendor),
        };

        let rfq = state
            .rfq_by_identifier_mut(rfq_identifier)
            .ok_or_else(|| RfqError::NotFound(rfq_identifier.to_string()))?;
        match rfq.quotes.iter_mut().find(|q| q.vendor_id == vendor_id) {
            Some(existing) => *existing = quote.clone(),
            None => rfq.quotes.push(quote.clone()),
        }
        if matches!(rfq.status, RfqStatus::Draft | RfqStatus::Sent) {
            rfq.status = RfqStatus::Received;
        }
        if !rfq.vendor_ids.contains(&vendor_id) {
            rfq.vendor_ids.push(vendor_id.clone());
        }

        tracing::info!(
            rfq_no = %rfq.rfq_no,
            vendor_id = %vendor_id,
            total = %quote.total,
            "Vendor quote received"
        );
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_model::{PoStatus, QuoteItemForm};
    use rust_decimal_macros::dec;

    fn setup() -> (Arc<MemoryStore>, Arc<CaptchaStore>, RfqService) {
        let store = Arc::new(MemoryStore::seeded());
        let captcha = Arc::new(CaptchaStore::new());
        let service = RfqService::new(store.clone(), captcha.clone());
        (store, captcha, service)
    }

    fn seeded_user(store: &MemoryStore, id: &str) -> User {
        store.read().user(id).cloned().unwrap()
    }

    /// Solves "What is {a} + {b}?" by summing the numbers in it
    fn solve(question: &str) -> u32 {
        question
            .split_whitespace()
            .filter_map(|token| token.trim_end_matches('?').parse::<u32>().ok())
            .sum()
    }

    fn solved_captcha(captcha: &CaptchaStore) -> (String, u32) {
        let challenge = captcha.challenge();
        let answer = solve(&challenge.question);
        (challenge.id, answer)
    }

    fn quote_form(store: &MemoryStore, rfq_index: usize, captcha: (String, u32)) -> VendorQuoteForm {
        let state = store.read();
        let requisition = state
            .requisition(&state.rfqs[rfq_index].requisition_id)
            .unwrap();
        VendorQuoteForm {
            vendor_name: "Borneo Supply Co".to_string(),
            vendor_email: "quotes@borneosupply.id".to_string(),
            vendor_company: Some("PT Borneo Supply".to_string()),
            payment_terms: "45 days".to_string(),
            taxes: Amount::new(dec!(1_000_000)).unwrap(),
            shipping: Amount::new(dec!(250_000)).unwrap(),
            notes: None,
            items: vec![QuoteItemForm {
                requisition_item_id: requisition.items[0].id.clone(),
                unit_price: Amount::new(dec!(20_000_000)).unwrap(),
                lead_time_days: 10,
                notes: Some("Ex stock".to_string()),
            }],
            captcha_id: captcha.0,
            captcha_answer: captcha.1,
        }
    }

    #[test]
    fn test_create_requires_sourcing_role() {
        let (store, _captcha, service) = setup();
        let employee = seeded_user(&store, "user-employee");
        let approver = seeded_user(&store, "user-approver");
        let approved_id = store.read().requisitions[0].id.clone();

        let form = RfqForm {
            requisition_id: approved_id,
            vendor_ids: vec![store.read().vendors[0].id.clone()],
            due_date: Utc::now() + chrono::Duration::days(10),
        };

        assert!(matches!(
            service.create(&form, &employee),
            Err(RfqError::CreateForbidden)
        ));

        let rfq = service.create(&form, &approver).unwrap();
        assert_eq!(rfq.rfq_no, "RFQ-2024-012");
        assert_eq!(rfq.status, RfqStatus::Draft);
        assert!(rfq.quotes.is_empty());
        assert_eq!(store.read().rfqs[0].id, rfq.id);
    }

    #[test]
    fn test_create_rejects_unapproved_requisition() {
        let (store, _captcha, service) = setup();
        let approver = seeded_user(&store, "user-approver");
        let submitted_id = store.read().requisitions[1].id.clone();

        let mut form = RfqForm {
            requisition_id: submitted_id,
            vendor_ids: vec![store.read().vendors[0].id.clone()],
            due_date: Utc::now() + chrono::Duration::days(10),
        };
        assert!(matches!(
            service.create(&form, &approver),
            Err(RfqError::RequisitionNotApproved)
        ));

        form.requisition_id = "no-such-requisition".to_string();
        assert!(matches!(
            service.create(&form, &approver),
            Err(RfqError::RequisitionNotFound(_))
        ));
    }

    #[test]
    fn test_send_and_partial_update() {
        let (store, _captcha, service) = setup();
        let draft_id = store.read().rfqs[0].id.clone();

        let sent = service.send(&draft_id).unwrap();
        assert_eq!(sent.status, RfqStatus::Sent);

        let due = Utc::now() + chrono::Duration::days(21);
        let updated = service
            .update(
                &draft_id,
                &RfqChanges {
                    quotes: None,
                    status: None,
                    due_date: Some(due),
                },
            )
            .unwrap();
        assert_eq!(updated.due_date, due);
        assert_eq!(updated.status, RfqStatus::Sent);
    }

    #[test]
    fn test_public_view_strips_prices() {
        let (store, _captcha, service) = setup();
        let rfq = store.read().rfqs[1].clone();

        // Lookup by number is case-insensitive
        let view = service.public_view("rfq-2024-011").unwrap();
        assert_eq!(view.id, rfq.id);
        assert_eq!(view.status, RfqStatus::Received);
        assert_eq!(view.requisition.items.len(), 2);

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("unit_price"));
        assert!(!json.contains("total"));

        assert!(service.public_view("RFQ-2024-999").is_none());
    }

    #[test]
    fn test_vendor_quote_from_known_vendor_uses_record() {
        let (store, captcha, service) = setup();
        let rfq_no = "RFQ-2024-010";

        let mut form = quote_form(&store, 0, solved_captcha(&captcha));
        form.vendor_email = "CONTACT@NusantaraTech.co.id".to_string();
        form.vendor_name = "Somebody Else".to_string();

        let quote = service.submit_vendor_quote(rfq_no, &form).unwrap();

        let expected_vendor = store.read().vendors[0].clone();
        assert_eq!(quote.vendor_id, expected_vendor.id);
        assert_eq!(quote.vendor_name.as_deref(), Some("Nusantara Tech Supplies"));
        assert_eq!(
            quote.vendor_email.as_deref(),
            Some("contact@nusantaratech.co.id")
        );
        // 10 laptops at the quoted 20M each, plus taxes and shipping
        assert_eq!(quote.subtotal.value(), dec!(200_000_000));
        assert_eq!(quote.total.value(), dec!(201_250_000));
        assert_eq!(quote.lead_time_days, 10);
        assert_eq!(quote.source, Some(QuoteSource::Vendor));

        let state = store.read();
        let rfq = &state.rfqs[0];
        assert_eq!(rfq.status, RfqStatus::Received);
        assert_eq!(rfq.quotes.len(), 1);
        // Already invited, so the vendor list is unchanged
        assert_eq!(rfq.vendor_ids.len(), 3);
    }

    #[test]
    fn test_vendor_quote_from_unknown_vendor_keys_by_email() {
        let (store, captcha, service) = setup();
        let rfq_id = store.read().rfqs[0].id.clone();

        let form = quote_form(&store, 0, solved_captcha(&captcha));
        let quote = service.submit_vendor_quote(&rfq_id, &form).unwrap();

        assert_eq!(quote.vendor_id, "quotes@borneosupply.id");
        assert_eq!(quote.vendor_name.as_deref(), Some("Borneo Supply Co"));

        let state = store.read();
        let rfq = &state.rfqs[0];
        assert_eq!(rfq.vendor_ids.len(), 4);
        assert!(rfq.vendor_ids.contains(&"quotes@borneosupply.id".to_string()));
    }

    #[test]
    fn test_vendor_quote_resubmission_replaces() {
        let (store, captcha, service) = setup();
        let rfq_id = store.read().rfqs[0].id.clone();

        let first = quote_form(&store, 0, solved_captcha(&captcha));
        service.submit_vendor_quote(&rfq_id, &first).unwrap();

        let mut second = quote_form(&store, 0, solved_captcha(&captcha));
        second.items[0].unit_price = Amount::new(dec!(19_000_000)).unwrap();
        service.submit_vendor_quote(&rfq_id, &second).unwrap();

        let state = store.read();
        let rfq = &state.rfqs[0];
        assert_eq!(rfq.quotes.len(), 1);
        assert_eq!(rfq.quotes[0].subtotal.value(), dec!(190_000_000));
    }

    #[test]
    fn test_vendor_quote_gate_failures() {
        let (store, captcha, service) = setup();
        let rfq_id = store.read().rfqs[0].id.clone();

        // Wrong captcha answer
        let challenge = captcha.challenge();
        let answer = solve(&challenge.question);
        let mut form = quote_form(&store, 0, (challenge.id, answer + 1));
        assert!(matches!(
            service.submit_vendor_quote(&rfq_id, &form),
            Err(RfqError::InvalidCaptcha)
        ));

        // Quote line pointing at a foreign item
        form = quote_form(&store, 0, solved_captcha(&captcha));
        form.items[0].requisition_item_id = "no-such-item".to_string();
        assert!(matches!(
            service.submit_vendor_quote(&rfq_id, &form),
            Err(RfqError::UnknownQuoteItem)
        ));

        // Closed RFQs take no more quotes
        service
            .update(
                &rfq_id,
                &RfqChanges {
                    status: Some(RfqStatus::Closed),
                    ..RfqChanges::default()
                },
            )
            .unwrap();
        form = quote_form(&store, 0, solved_captcha(&captcha));
        assert!(matches!(
            service.submit_vendor_quote(&rfq_id, &form),
            Err(RfqError::AlreadyClosed)
        ));
    }

    #[test]
    fn test_close_drafts_po_from_winning_quote() {
        let (store, _captcha, service) = setup();
        let rfq = store.read().rfqs[1].clone();
        let winner = rfq.vendor_ids[0].clone();

        let closed = service.close(&rfq.id, &winner).unwrap();
        assert_eq!(closed.status, RfqStatus::Closed);

        let state = store.read();
        let order = &state.purchase_orders[0];
        assert_eq!(order.vendor_id, winner);
        assert_eq!(order.status, PoStatus::Draft);
        assert_eq!(order.total.value(), dec!(150_350_000));
        assert_eq!(order.terms, "30 days");
        assert_eq!(
            state.requisition(&rfq.requisition_id).unwrap().status,
            RequisitionStatus::Converted
        );
    }

    #[test]
    fn test_close_without_quote_uses_requisition_total() {
        let (store, _captcha, service) = setup();
        let rfq = store.read().rfqs[0].clone();
        let winner = rfq.vendor_ids[0].clone();

        service.close(&rfq.id, &winner).unwrap();

        let state = store.read();
        let order = &state.purchase_orders[0];
        assert_eq!(order.total.value(), dec!(275_000_000));
        assert_eq!(order.terms, "Standard terms");
        assert_eq!(order.currency, Currency::Idr);
    }

    #[test]
    fn test_close_rejects_uninvited_winner() {
        let (store, _captcha, service) = setup();
        let rfq_id = store.read().rfqs[1].id.clone();
        let outsider = store.read().vendors[0].id.clone();

        assert!(matches!(
            service.close(&rfq_id, &outsider),
            Err(RfqError::WinnerNotInvited)
        ));
    }

    #[test]
    fn test_close_sticks_even_when_budget_blocks_the_po() {
        let (store, _captcha, service) = setup();
        let rfq = store.read().rfqs[1].clone();
        let winner = rfq.vendor_ids[0].clone();

        // Inflate the winning quote past the 600M facilities budget
        let mut quotes = rfq.quotes.clone();
        quotes[0].total = Amount::new(dec!(700_000_000)).unwrap();
        service
            .update(
                &rfq.id,
                &RfqChanges {
                    quotes: Some(quotes),
                    ..RfqChanges::default()
                },
            )
            .unwrap();

        let result = service.close(&rfq.id, &winner);
        assert!(matches!(result, Err(RfqError::Po(PoError::Budget(_)))));

        let state = store.read();
        assert_eq!(state.rfq(&rfq.id).unwrap().status, RfqStatus::Closed);
        assert_eq!(state.purchase_orders.len(), 3);
        assert_eq!(
            state.requisition(&rfq.requisition_id).unwrap().status,
            RequisitionStatus::Submitted
        );
    }

    #[test]
    fn test_create_po_for_bidder_keeps_rfq_open() {
        let (store, _captcha, service) = setup();
        let rfq = store.read().rfqs[1].clone();
        let bidder = rfq.quotes[1].vendor_id.clone();

        let order = service.create_po(&rfq.id, &bidder).unwrap();
        assert_eq!(order.total.value(), dec!(157_600_000));

        let state = store.read();
        assert_eq!(state.rfq(&rfq.id).unwrap().status, RfqStatus::Received);
        assert_eq!(
            state.requisition(&rfq.requisition_id).unwrap().status,
            RequisitionStatus::Converted
        );
    }
}
