//! Application state and lookup helpers

use procura_model::{ApprovalRule, Budget, PurchaseOrder, Requisition, Rfq, User, Vendor};

/// Every collection the system operates on
///
/// Lists are kept newest-first: create operations insert at the front,
/// matching the order screens and reports present them in.
#[derive(Debug, Clone, Default)]
pub struct State {
    pub users: Vec<User>,
    pub vendors: Vec<Vendor>,
    pub budgets: Vec<Budget>,
    pub requisitions: Vec<Requisition>,
    pub approval_rules: Vec<ApprovalRule>,
    pub rfqs: Vec<Rfq>,
    pub purchase_orders: Vec<PurchaseOrder>,
}

impl State {
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }

    pub fn vendor(&self, id: &str) -> Option<&Vendor> {
        self.vendors.iter().find(|vendor| vendor.id == id)
    }

    pub fn vendor_mut(&mut self, id: &str) -> Option<&mut Vendor> {
        self.vendors.iter_mut().find(|vendor| vendor.id == id)
    }

    pub fn budget_for_cost_center(&self, cost_center: &str) -> Option<&Budget> {
        self.budgets
            .iter()
            .find(|budget| budget.cost_center == cost_center)
    }

    pub fn requisition(&self, id: &str) -> Option<&Requisition> {
        self.requisitions.iter().find(|req| req.id == id)
    }

    pub fn requisition_mut(&mut self, id: &str) -> Option<&mut Requisition> {
        self.requisitions.iter_mut().find(|req| req.id == id)
    }

    pub fn approval_rule(&self, id: &str) -> Option<&ApprovalRule> {
        self.approval_rules.iter().find(|rule| rule.id == id)
    }

    pub fn approval_rule_mut(&mut self, id: &str) -> Option<&mut ApprovalRule> {
        self.approval_rules.iter_mut().find(|rule| rule.id == id)
    }

    pub fn rfq(&self, id: &str) -> Option<&Rfq> {
        self.rfqs.iter().find(|rfq| rfq.id == id)
    }

    pub fn rfq_mut(&mut self, id: &str) -> Option<&mut Rfq> {
        self.rfqs.iter_mut().find(|rfq| rfq.id == id)
    }

    /// Find an RFQ by internal id or by document number (case-insensitive)
    ///
    /// The public quote portal hands vendors the document number, so both
    /// forms have to resolve.
    pub fn rfq_by_identifier(&self, identifier: &str) -> Option<&Rfq> {
        self.rfqs.iter().find(|rfq| {
            rfq.id.eq_ignore_ascii_case(identifier) || rfq.rfq_no.eq_ignore_ascii_case(identifier)
        })
    }

    pub fn rfq_by_identifier_mut(&mut self, identifier: &str) -> Option<&mut Rfq> {
        self.rfqs.iter_mut().find(|rfq| {
            rfq.id.eq_ignore_ascii_case(identifier) || rfq.rfq_no.eq_ignore_ascii_case(identifier)
        })
    }

    pub fn purchase_order(&self, id: &str) -> Option<&PurchaseOrder> {
        self.purchase_orders.iter().find(|po| po.id == id)
    }

    pub fn purchase_order_mut(&mut self, id: &str) -> Option<&mut PurchaseOrder> {
        self.purchase_orders.iter_mut().find(|po| po.id == id)
    }

    /// Next requisition number, e.g. `PR-2024-0006`
    pub fn next_requisition_number(&self) -> String {
        next_number(self.requisitions.iter().map(|req| req.req_no.as_str()), "PR-2024-", 4)
    }

    /// Next RFQ number, e.g. `RFQ-2024-012`
    pub fn next_rfq_number(&self) -> String {
        next_number(self.rfqs.iter().map(|rfq| rfq.rfq_no.as_str()), "RFQ-2024-", 3)
    }

    /// Next purchase order number, e.g. `PO-2024-0023`
    pub fn next_po_number(&self) -> String {
        next_number(
            self.purchase_orders.iter().map(|po| po.po_no.as_str()),
            "PO-2024-",
            4,
        )
    }
}

/// Derive the next document number from the trailing digit run of each
/// existing number: highest seen plus one, zero-padded to `width`.
fn next_number<'a>(existing: impl Iterator<Item = &'a str>, prefix: &str, width: usize) -> String {
    let latest = existing.filter_map(trailing_number).max().unwrap_or(0);
    format!("{prefix}{:0width$}", latest + 1)
}

fn trailing_number(value: &str) -> Option<u64> {
    let start = value.rfind(|c: char| !c.is_ascii_digit()).map_or(0, |i| i + 1);
    value[start..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_number() {
        assert_eq!(trailing_number("PR-2024-0005"), Some(5));
        assert_eq!(trailing_number("RFQ-2024-011"), Some(11));
        assert_eq!(trailing_number("PO-2024-"), None);
        assert_eq!(trailing_number("0042"), Some(42));
    }

    #[test]
    fn test_next_number_pads_and_increments() {
        let numbers = ["PO-2024-020", "PO-2024-022", "PO-2024-021"];
        assert_eq!(
            next_number(numbers.iter().copied(), "PO-2024-", 4),
            "PO-2024-0023"
        );
    }

    #[test]
    fn test_next_number_starts_from_one() {
        assert_eq!(
            next_number(std::iter::empty(), "PR-2024-", 4),
            "PR-2024-0001"
        );
    }

    #[test]
    fn test_seeded_lookups() {
        let state = crate::seed::demo_state();

        let employee = state.user("user-employee").unwrap();
        assert_eq!(employee.name, "Employee A");
        assert!(state.user_by_email("FINANCE@example.com").is_some());

        let budget = state.budget_for_cost_center("IT-OPS-001").unwrap();
        assert_eq!(budget.name, "IT Operations 2024");
        assert!(state.budget_for_cost_center("UNKNOWN-000").is_none());

        let rfq = state.rfq_by_identifier("rfq-2024-010").unwrap();
        assert_eq!(rfq.rfq_no, "RFQ-2024-010");
    }

    #[test]
    fn test_seeded_document_sequences() {
        let state = crate::seed::demo_state();

        assert_eq!(state.next_requisition_number(), "PR-2024-0006");
        assert_eq!(state.next_rfq_number(), "RFQ-2024-012");
        assert_eq!(state.next_po_number(), "PO-2024-0023");
    }
}
