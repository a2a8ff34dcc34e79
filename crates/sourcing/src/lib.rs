//! Procura Sourcing - RFQs, vendor quotes and purchase orders
//!
//! Once a requisition is approved, procurement invites vendors to bid on
//! it through an RFQ. Vendors submit quotes via a public portal guarded
//! by an arithmetic captcha; procurement compares the quotes, closes the
//! RFQ on a winner, and the system drafts a purchase order from the
//! winning quote. Purchase orders can also be drafted directly from a
//! requisition without a bidding round.
//!
//! Drafting a purchase order is the second budget control point: the PO
//! total is checked against the cost center budget (excluding the source
//! requisition's own commitment) before anything is written.

pub mod captcha;
pub mod po;
pub mod rfq;

pub use captcha::{CaptchaChallenge, CaptchaStore};
pub use po::{create_po_draft, PoChanges, PoDraftParams, PoError, PoService};
pub use rfq::{RfqChanges, RfqError, RfqPublicView, RfqService};
