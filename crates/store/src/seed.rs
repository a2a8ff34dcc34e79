//! Demo dataset
//!
//! Mirrors a mid-year snapshot of a small Indonesian company: four users
//! (one per role), six vendors, four cost-center budgets, five
//! requisitions spread across the lifecycle, three approval rules, two
//! RFQs and three purchase orders. Timestamps are relative to now so
//! dashboards always have recent activity.

use chrono::{DateTime, Duration, Utc};
use procura_core::{Amount, Currency};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use procura_model::{
    new_id, ApprovalAction, ApprovalEvent, ApprovalRole, ApprovalRule, ApprovalStep, Budget,
    PoLine, PoStatus, PurchaseOrder, Quote, QuoteItem, QuoteSource, Requisition, RequisitionItem,
    RequisitionStatus, Rfq, RfqStatus, Role, RuleConditions, User, Vendor, VendorCategory,
};

use crate::state::State;

/// Build the demo dataset from scratch
pub fn demo_state() -> State {
    let users = seed_users();
    let vendors = seed_vendors();
    let requisitions = seed_requisitions(&users, &vendors);
    let rfqs = seed_rfqs(&requisitions, &vendors);
    let purchase_orders = seed_purchase_orders(&requisitions, &vendors);

    State {
        users,
        vendors,
        budgets: seed_budgets(),
        requisitions,
        approval_rules: seed_approval_rules(),
        rfqs,
        purchase_orders,
    }
}

// Seed values are literal non-negative numbers.
fn idr(value: Decimal) -> Amount {
    Amount::new_unchecked(value)
}

fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

fn days_ahead(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

fn seed_users() -> Vec<User> {
    vec![
        User::new("user-employee", "Employee A", Role::Employee, "employee@example.com"),
        User::new("user-approver", "Manager B", Role::Approver, "approver@example.com"),
        User::new(
            "user-procurement",
            "Citra Prasetyo",
            Role::ProcurementAdmin,
            "procurement@example.com",
        ),
        User::new("user-finance", "Dito Wijaya", Role::Finance, "finance@example.com"),
    ]
}

fn seed_vendors() -> Vec<Vendor> {
    vec![
        Vendor {
            id: new_id(),
            name: "Nusantara Tech Supplies".to_string(),
            email: "contact@nusantaratech.co.id".to_string(),
            phone: "+62-21-555-1000".to_string(),
            category: VendorCategory::It,
            rating: 5,
            address: "Jl. Sudirman Kav. 21, Jakarta".to_string(),
            tax_id: "01.234.567.8-999.000".to_string(),
            attachments: vec![],
            is_active: true,
        },
        Vendor {
            id: new_id(),
            name: "Sahabat Office Mart".to_string(),
            email: "sales@sahabatoffice.id".to_string(),
            phone: "+62-21-777-2211".to_string(),
            category: VendorCategory::Office,
            rating: 4,
            address: "Jl. Gatot Subroto No. 45, Jakarta".to_string(),
            tax_id: "02.987.654.3-888.000".to_string(),
            attachments: vec![],
            is_active: true,
        },
        Vendor {
            id: new_id(),
            name: "LogiXpress Indonesia".to_string(),
            email: "hello@logixpress.id".to_string(),
            phone: "+62-21-333-9021".to_string(),
            category: VendorCategory::Logistics,
            rating: 4,
            address: "Jl. Raya Bekasi Timur No. 77, Bekasi".to_string(),
            tax_id: "03.321.123.5-777.000".to_string(),
            attachments: vec![],
            is_active: true,
        },
        Vendor {
            id: new_id(),
            name: "Prima IT Solutions".to_string(),
            email: "marketing@primait.co.id".to_string(),
            phone: "+62-21-889-5512".to_string(),
            category: VendorCategory::It,
            rating: 3,
            address: "Jl. Thamrin No. 18, Jakarta".to_string(),
            tax_id: "04.555.901.2-666.000".to_string(),
            attachments: vec![],
            is_active: true,
        },
        Vendor {
            id: new_id(),
            name: "QuickFix Facility Services".to_string(),
            email: "support@quickfixfacilities.id".to_string(),
            phone: "+62-21-889-1122".to_string(),
            category: VendorCategory::Facilities,
            rating: 5,
            address: "Jl. Daan Mogot No. 90, Jakarta".to_string(),
            tax_id: "05.777.888.1-555.000".to_string(),
            attachments: vec![],
            is_active: true,
        },
        Vendor {
            id: new_id(),
            name: "Satria Logistics".to_string(),
            email: "info@satrialogistics.id".to_string(),
            phone: "+62-21-665-4433".to_string(),
            category: VendorCategory::Logistics,
            rating: 4,
            address: "Jl. Pelabuhan No. 7, Surabaya".to_string(),
            tax_id: "06.999.222.0-444.000".to_string(),
            attachments: vec![],
            is_active: false,
        },
    ]
}

fn seed_budgets() -> Vec<Budget> {
    vec![
        Budget {
            id: new_id(),
            name: "IT Operations 2024".to_string(),
            cost_center: "IT-OPS-001".to_string(),
            amount: idr(dec!(1_200_000_000)),
            currency: Currency::Idr,
            period: "FY2024".to_string(),
        },
        Budget {
            id: new_id(),
            name: "Facilities Upgrade 2024".to_string(),
            cost_center: "FAC-202".to_string(),
            amount: idr(dec!(600_000_000)),
            currency: Currency::Idr,
            period: "FY2024".to_string(),
        },
        Budget {
            id: new_id(),
            name: "Operations Improvements 2024".to_string(),
            cost_center: "OPS-110".to_string(),
            amount: idr(dec!(450_000_000)),
            currency: Currency::Idr,
            period: "FY2024".to_string(),
        },
        Budget {
            id: new_id(),
            name: "Logistics Fleet 2024".to_string(),
            cost_center: "LOG-450".to_string(),
            amount: idr(dec!(500_000_000)),
            currency: Currency::Idr,
            period: "FY2024".to_string(),
        },
    ]
}

fn item(
    description: &str,
    quantity: Decimal,
    unit_price: Decimal,
    category: VendorCategory,
    vendor_preference_id: &str,
) -> RequisitionItem {
    RequisitionItem {
        id: new_id(),
        sku: None,
        description: description.to_string(),
        quantity,
        uom: "unit".to_string(),
        unit_price: idr(unit_price),
        currency: Currency::Idr,
        category,
        vendor_preference_id: Some(vendor_preference_id.to_string()),
    }
}

fn submitted_event(user_id: &str, at: DateTime<Utc>) -> ApprovalEvent {
    ApprovalEvent {
        step: 0,
        role: Role::Employee,
        user_id: Some(user_id.to_string()),
        action: ApprovalAction::Submitted,
        comment: None,
        at,
    }
}

fn approved_event(step: u32, role: Role, user_id: &str, at: DateTime<Utc>) -> ApprovalEvent {
    ApprovalEvent {
        step,
        role,
        user_id: Some(user_id.to_string()),
        action: ApprovalAction::Approved,
        comment: None,
        at,
    }
}

fn seed_requisitions(users: &[User], vendors: &[Vendor]) -> Vec<Requisition> {
    let employee = users[0].id.as_str();
    let approver = users[1].id.as_str();
    let procurement = users[2].id.as_str();
    let finance = users[3].id.as_str();

    let mut requisitions = vec![
        Requisition {
            id: new_id(),
            req_no: "PR-2024-0001".to_string(),
            requester_id: employee.to_string(),
            department: "IT".to_string(),
            cost_center: "IT-OPS-001".to_string(),
            needed_by: days_ahead(14),
            status: RequisitionStatus::Approved,
            items: vec![
                item("Enterprise Laptops", dec!(10), dec!(25_000_000), VendorCategory::It, &vendors[0].id),
                item("Docking Stations", dec!(10), dec!(2_500_000), VendorCategory::It, &vendors[0].id),
            ],
            attachments: vec![],
            notes: Some("Refresh equipment for new hires".to_string()),
            total: Amount::ZERO,
            created_at: days_ago(10),
            updated_at: days_ago(5),
            approval_trail: vec![
                submitted_event(employee, days_ago(7)),
                approved_event(1, Role::Approver, approver, days_ago(6)),
                approved_event(2, Role::Finance, finance, days_ago(5)),
            ],
            approval_steps: vec![
                ApprovalStep::new(1, ApprovalRole::Approver),
                ApprovalStep::new(2, ApprovalRole::Finance),
            ],
        },
        Requisition {
            id: new_id(),
            req_no: "PR-2024-0002".to_string(),
            requester_id: employee.to_string(),
            department: "Facilities".to_string(),
            cost_center: "FAC-202".to_string(),
            needed_by: days_ahead(21),
            status: RequisitionStatus::Submitted,
            items: vec![
                item("Office Chairs", dec!(30), dec!(1_500_000), VendorCategory::Office, &vendors[1].id),
                item("Standing Desks", dec!(20), dec!(4_500_000), VendorCategory::Office, &vendors[1].id),
            ],
            attachments: vec![],
            notes: Some("Office expansion level 12".to_string()),
            total: Amount::ZERO,
            created_at: days_ago(4),
            updated_at: days_ago(2),
            approval_trail: vec![
                submitted_event(employee, days_ago(3)),
                approved_event(1, Role::Approver, approver, days_ago(2)),
            ],
            approval_steps: vec![
                ApprovalStep::new(1, ApprovalRole::Approver),
                ApprovalStep::new(2, ApprovalRole::ProcurementAdmin),
            ],
        },
        Requisition {
            id: new_id(),
            req_no: "PR-2024-0003".to_string(),
            requester_id: employee.to_string(),
            department: "Operations".to_string(),
            cost_center: "OPS-110".to_string(),
            needed_by: days_ahead(30),
            status: RequisitionStatus::Draft,
            items: vec![item(
                "Warehouse Shelving",
                dec!(50),
                dec!(1_200_000),
                VendorCategory::Logistics,
                &vendors[2].id,
            )],
            attachments: vec![],
            notes: None,
            total: Amount::ZERO,
            created_at: days_ago(1),
            updated_at: days_ago(1),
            approval_trail: vec![],
            approval_steps: vec![],
        },
        Requisition {
            id: new_id(),
            req_no: "PR-2024-0004".to_string(),
            requester_id: employee.to_string(),
            department: "IT".to_string(),
            cost_center: "IT-OPS-001".to_string(),
            needed_by: days_ahead(10),
            status: RequisitionStatus::Rejected,
            items: vec![item(
                "Network Switches",
                dec!(5),
                dec!(7_000_000),
                VendorCategory::It,
                &vendors[3].id,
            )],
            attachments: vec![],
            notes: Some("Upgrade for network backbone".to_string()),
            total: Amount::ZERO,
            created_at: days_ago(13),
            updated_at: days_ago(11),
            approval_trail: vec![
                submitted_event(employee, days_ago(12)),
                ApprovalEvent {
                    step: 1,
                    role: Role::Approver,
                    user_id: None,
                    action: ApprovalAction::Returned,
                    comment: Some("Please provide justification for upgrade.".to_string()),
                    at: days_ago(11),
                },
            ],
            approval_steps: vec![ApprovalStep::new(1, ApprovalRole::Approver)],
        },
        Requisition {
            id: new_id(),
            req_no: "PR-2024-0005".to_string(),
            requester_id: employee.to_string(),
            department: "Logistics".to_string(),
            cost_center: "LOG-450".to_string(),
            needed_by: days_ahead(5),
            status: RequisitionStatus::Converted,
            items: vec![item(
                "Delivery Vans Leasing",
                dec!(3),
                dec!(90_000_000),
                VendorCategory::Logistics,
                &vendors[5].id,
            )],
            attachments: vec![],
            notes: Some("Leasing for new distribution channel".to_string()),
            total: Amount::ZERO,
            created_at: days_ago(25),
            updated_at: days_ago(17),
            approval_trail: vec![
                submitted_event(employee, days_ago(20)),
                approved_event(1, Role::Approver, approver, days_ago(19)),
                approved_event(2, Role::Finance, finance, days_ago(18)),
                approved_event(3, Role::ProcurementAdmin, procurement, days_ago(17)),
            ],
            approval_steps: vec![
                ApprovalStep::new(1, ApprovalRole::Approver),
                ApprovalStep::new(2, ApprovalRole::Finance),
                ApprovalStep::new(3, ApprovalRole::ProcurementAdmin),
            ],
        },
    ];

    for requisition in &mut requisitions {
        requisition.total = procura_model::total_of(&requisition.items);
    }
    requisitions
}

fn seed_approval_rules() -> Vec<ApprovalRule> {
    vec![
        ApprovalRule {
            id: new_id(),
            name: "Default approval up to 50M".to_string(),
            conditions: RuleConditions {
                amount_gte: Some(Amount::ZERO),
                ..Default::default()
            },
            steps: vec![
                ApprovalStep::new(1, ApprovalRole::Approver),
                ApprovalStep::new(2, ApprovalRole::ProcurementAdmin),
            ],
        },
        ApprovalRule {
            id: new_id(),
            name: "High value requires finance".to_string(),
            conditions: RuleConditions {
                amount_gte: Some(idr(dec!(100_000_000))),
                ..Default::default()
            },
            steps: vec![
                ApprovalStep::new(1, ApprovalRole::Approver),
                ApprovalStep::new(2, ApprovalRole::Finance),
                ApprovalStep::new(3, ApprovalRole::ProcurementAdmin),
            ],
        },
        ApprovalRule {
            id: new_id(),
            name: "IT Cost Center special rule".to_string(),
            conditions: RuleConditions {
                amount_gte: None,
                category: Some(VendorCategory::It),
                cost_center: Some("IT-OPS-001".to_string()),
            },
            steps: vec![
                ApprovalStep::new(1, ApprovalRole::Approver),
                ApprovalStep::new(2, ApprovalRole::Finance),
            ],
        },
    ]
}

fn seed_rfqs(requisitions: &[Requisition], vendors: &[Vendor]) -> Vec<Rfq> {
    let approved = &requisitions[0];
    let submitted = &requisitions[1];

    let quotes = vendors[1..4]
        .iter()
        .enumerate()
        .map(|(index, vendor)| {
            let markup = Decimal::ONE + Decimal::from(index as u32) * dec!(0.05);
            let subtotal = submitted.total.value() * markup;
            let taxes = submitted.total.value() * dec!(0.11);
            let shipping = dec!(500_000) * Decimal::from(index as u32 + 1);
            Quote {
                vendor_id: vendor.id.clone(),
                vendor_name: Some(vendor.name.clone()),
                vendor_email: Some(vendor.email.clone()),
                vendor_company: Some(vendor.name.clone()),
                items: submitted
                    .items
                    .iter()
                    .map(|item| QuoteItem {
                        requisition_item_id: item.id.clone(),
                        unit_price: idr(item.unit_price.value() * markup),
                        currency: item.currency.clone(),
                        lead_time_days: 7 + index as u32 * 2,
                        notes: None,
                    })
                    .collect(),
                subtotal: idr(subtotal),
                taxes: idr(taxes),
                shipping: idr(shipping),
                total: idr(subtotal + taxes + shipping),
                lead_time_days: 7 + index as u32 * 2,
                payment_terms: "30 days".to_string(),
                notes: (index == 0).then(|| "Best lead time".to_string()),
                submitted_at: Some(Utc::now() - Duration::hours(12 * (index as i64 + 1))),
                source: Some(QuoteSource::Vendor),
            }
        })
        .collect();

    vec![
        Rfq {
            id: new_id(),
            rfq_no: "RFQ-2024-010".to_string(),
            requisition_id: approved.id.clone(),
            vendor_ids: vendors[..3].iter().map(|v| v.id.clone()).collect(),
            status: RfqStatus::Draft,
            quotes: vec![],
            due_date: days_ahead(7),
            created_at: Utc::now(),
        },
        Rfq {
            id: new_id(),
            rfq_no: "RFQ-2024-011".to_string(),
            requisition_id: submitted.id.clone(),
            vendor_ids: vendors[1..4].iter().map(|v| v.id.clone()).collect(),
            status: RfqStatus::Received,
            quotes,
            due_date: days_ago(1),
            created_at: days_ago(5),
        },
    ]
}

fn po_lines_from(requisition: &Requisition) -> Vec<PoLine> {
    requisition
        .items
        .iter()
        .map(|item| PoLine {
            requisition_item_id: item.id.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total: item.line_total(),
        })
        .collect()
}

fn seed_purchase_orders(requisitions: &[Requisition], vendors: &[Vendor]) -> Vec<PurchaseOrder> {
    let approved = &requisitions[0];
    let converted = &requisitions[4];

    vec![
        PurchaseOrder {
            id: new_id(),
            po_no: "PO-2024-020".to_string(),
            vendor_id: vendors[0].id.clone(),
            status: PoStatus::Draft,
            lines: po_lines_from(approved),
            total: approved.total,
            currency: Currency::Idr,
            terms: "Delivery within 14 days".to_string(),
            linked_requisition_ids: vec![approved.id.clone()],
            created_at: Utc::now(),
            payment_proofs: vec![],
        },
        PurchaseOrder {
            id: new_id(),
            po_no: "PO-2024-021".to_string(),
            vendor_id: vendors[1].id.clone(),
            status: PoStatus::Issued,
            lines: po_lines_from(converted),
            total: converted.total,
            currency: Currency::Idr,
            terms: "Delivery within 30 days".to_string(),
            linked_requisition_ids: vec![converted.id.clone()],
            created_at: Utc::now(),
            payment_proofs: vec![],
        },
        PurchaseOrder {
            id: new_id(),
            po_no: "PO-2024-022".to_string(),
            vendor_id: vendors[2].id.clone(),
            status: PoStatus::Closed,
            lines: vec![PoLine {
                requisition_item_id: approved.items[0].id.clone(),
                quantity: dec!(10),
                unit_price: idr(dec!(1_500_000)),
                total: idr(dec!(15_000_000)),
            }],
            total: idr(dec!(15_000_000)),
            currency: Currency::Idr,
            terms: "Delivered complete".to_string(),
            linked_requisition_ids: vec![approved.id.clone()],
            created_at: days_ago(30),
            payment_proofs: vec![],
        },
    ]
}
