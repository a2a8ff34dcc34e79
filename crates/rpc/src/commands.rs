//! CLI commands
//!
//! Entity arguments accept either the internal id or the human document
//! number (`PR-...`, `RFQ-...`, `PO-...`); vendors also resolve by name
//! or email. The store is reseeded on every invocation, so the document
//! numbers are the stable handles.

use chrono::{Duration, Utc};
use procura_core::{Amount, Currency};
use procura_model::{
    new_id, ApprovalRole, ApprovalStep, FileMeta, PoStatus, QuoteItemForm, RequisitionForm,
    RequisitionItemForm, RfqForm, RuleConditions, RuleForm, UserForm, VendorCategory, VendorForm,
    VendorQuoteForm,
};
use procura_requisition::ApprovalDecision;
use procura_sourcing::{PoChanges, PoDraftParams, RfqChanges};
use rust_decimal::Decimal;

use crate::context::AppContext;

// === Requisitions ===

/// List all requisitions
pub fn req_list(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let requisitions = ctx.requisitions.list();

    println!("Requisitions ({}):", requisitions.len());
    println!("{:-<80}", "");
    println!(
        "{:<14} | {:>9} | {:<12} | {:<12} | {:>16} | {}",
        "Number", "Status", "Department", "Cost center", "Total", "Created"
    );
    println!("{:-<80}", "");

    for req in &requisitions {
        println!(
            "{:<14} | {:>9} | {:<12} | {:<12} | {:>16} | {}",
            req.req_no,
            req.status,
            req.department,
            req.cost_center,
            req.total,
            req.created_at.format("%Y-%m-%d"),
        );
    }

    Ok(())
}

/// Show one requisition as JSON
pub fn req_show(ctx: &AppContext, handle: &str) -> Result<(), anyhow::Error> {
    let id = resolve_requisition(ctx, handle)?;
    let requisition = ctx.requisitions.get(&id)?;
    println!("{}", serde_json::to_string_pretty(&requisition)?);
    Ok(())
}

/// Create a draft requisition
pub fn req_create(
    ctx: &AppContext,
    actor_id: &str,
    department: &str,
    cost_center: &str,
    needed_in_days: i64,
    item_specs: &[String],
    notes: Option<&str>,
) -> Result<(), anyhow::Error> {
    let actor = ctx.actor(actor_id)?;
    let form = requisition_form(department, cost_center, needed_in_days, item_specs, notes)?;

    let requisition = ctx.requisitions.create(&form, &actor)?;

    println!(
        "✅ Created {} ({} items, total {})",
        requisition.req_no,
        requisition.items.len(),
        requisition.total.format(&Currency::Idr),
    );
    println!("   id: {}", requisition.id);
    Ok(())
}

/// Replace a draft requisition's content
pub fn req_update(
    ctx: &AppContext,
    actor_id: &str,
    handle: &str,
    department: &str,
    cost_center: &str,
    needed_in_days: i64,
    item_specs: &[String],
    notes: Option<&str>,
) -> Result<(), anyhow::Error> {
    let actor = ctx.actor(actor_id)?;
    let id = resolve_requisition(ctx, handle)?;
    let form = requisition_form(department, cost_center, needed_in_days, item_specs, notes)?;

    let requisition = ctx.requisitions.update(&id, &form, &actor)?;

    println!(
        "✅ Updated {} (total {})",
        requisition.req_no,
        requisition.total.format(&Currency::Idr),
    );
    Ok(())
}

/// Submit a draft for approval
pub fn req_submit(ctx: &AppContext, actor_id: &str, handle: &str) -> Result<(), anyhow::Error> {
    let actor = ctx.actor(actor_id)?;
    let id = resolve_requisition(ctx, handle)?;

    let requisition = ctx.requisitions.submit(&id, &actor)?;

    println!(
        "✅ Submitted {} for approval ({} steps)",
        requisition.req_no,
        requisition.approval_steps.len(),
    );
    for step in &requisition.approval_steps {
        println!("   step {}: {}", step.order, step.role);
    }
    Ok(())
}

/// Approve the pending step
pub fn req_approve(
    ctx: &AppContext,
    actor_id: &str,
    handle: &str,
    comment: Option<&str>,
) -> Result<(), anyhow::Error> {
    let actor = ctx.actor(actor_id)?;
    let id = resolve_requisition(ctx, handle)?;

    let requisition =
        ctx.requisitions
            .process_approval(&id, &actor, ApprovalDecision::Approve, comment)?;

    match procura_approval::pending_step(&requisition) {
        Some(step) => println!(
            "✅ Step approved on {}, now waiting on {}",
            requisition.req_no, step.role
        ),
        None => println!("✅ {} fully approved", requisition.req_no),
    }
    Ok(())
}

/// Return the requisition to its requester
pub fn req_return(
    ctx: &AppContext,
    actor_id: &str,
    handle: &str,
    comment: Option<&str>,
) -> Result<(), anyhow::Error> {
    let actor = ctx.actor(actor_id)?;
    let id = resolve_requisition(ctx, handle)?;

    let requisition =
        ctx.requisitions
            .process_approval(&id, &actor, ApprovalDecision::Return, comment)?;

    println!("✅ Returned {} to draft", requisition.req_no);
    Ok(())
}

/// List requisitions waiting on the acting user
pub fn inbox(ctx: &AppContext, actor_id: &str) -> Result<(), anyhow::Error> {
    let actor = ctx.actor(actor_id)?;
    let items = ctx.inbox.pending_for(&actor);

    if items.is_empty() {
        println!("Nothing waiting on {}", actor.name);
        return Ok(());
    }

    println!("Pending approvals for {} ({}):", actor.name, items.len());
    println!("{:-<80}", "");
    for item in &items {
        println!(
            "{:<14} | step {} ({}) | {:<12} | {:>16}",
            item.requisition.req_no,
            item.current_step.order,
            item.current_step.role,
            item.requisition.department,
            item.requisition.total,
        );
    }
    Ok(())
}

// === Approval rules ===

/// List the configured approval rules
pub fn rule_list(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let rules = ctx.rules.list();

    println!("Approval rules ({}):", rules.len());
    println!("{:-<80}", "");
    for rule in &rules {
        let steps = rule
            .steps
            .iter()
            .map(|step| step.role.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        println!("{} [{}]", rule.name, rule.id);
        println!("   when:  {}", describe_conditions(&rule.conditions));
        println!("   chain: {}", steps);
    }
    Ok(())
}

/// Create an approval rule
pub fn rule_add(
    ctx: &AppContext,
    name: &str,
    amount_gte: Option<Decimal>,
    category: Option<&str>,
    cost_center: Option<&str>,
    steps_spec: &str,
) -> Result<(), anyhow::Error> {
    let form = rule_form(name, amount_gte, category, cost_center, steps_spec)?;
    let rule = ctx.rules.create(&form)?;

    println!("✅ Created rule '{}' ({} steps)", rule.name, rule.steps.len());
    println!("   id: {}", rule.id);
    Ok(())
}

/// Replace an approval rule
pub fn rule_update(
    ctx: &AppContext,
    id: &str,
    name: &str,
    amount_gte: Option<Decimal>,
    category: Option<&str>,
    cost_center: Option<&str>,
    steps_spec: &str,
) -> Result<(), anyhow::Error> {
    let form = rule_form(name, amount_gte, category, cost_center, steps_spec)?;
    let rule = ctx.rules.update(id, &form)?;

    println!("✅ Updated rule '{}'", rule.name);
    Ok(())
}

/// Delete an approval rule
pub fn rule_rm(ctx: &AppContext, id: &str) -> Result<(), anyhow::Error> {
    let removed = ctx.rules.delete(id)?;
    println!("✅ Deleted rule '{}'", removed.name);
    Ok(())
}

// === Budgets ===

/// List budgets with derived usage
pub fn budget_list(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let summaries = ctx.budgets.summaries();

    println!("Budgets ({}):", summaries.len());
    println!("{:-<80}", "");
    println!(
        "{:<12} | {:<28} | {:>14} | {:>14} | {:>14}",
        "Cost center", "Name", "Amount", "Used", "Remaining"
    );
    println!("{:-<80}", "");
    for summary in &summaries {
        println!(
            "{:<12} | {:<28} | {:>14} | {:>14} | {:>14}",
            summary.budget.cost_center,
            summary.budget.name,
            summary.budget.amount,
            summary.usage,
            summary.remaining,
        );
    }
    Ok(())
}

// === Vendors ===

/// List vendors
pub fn vendor_list(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let vendors = ctx.vendors.list();

    println!("Vendors ({}):", vendors.len());
    println!("{:-<80}", "");
    for vendor in &vendors {
        println!(
            "{:<28} | {:<10} | rating {} | {:<8} | {}",
            vendor.name,
            vendor.category,
            vendor.rating,
            if vendor.is_active { "active" } else { "inactive" },
            vendor.email,
        );
    }
    Ok(())
}

/// Show one vendor as JSON
pub fn vendor_show(ctx: &AppContext, handle: &str) -> Result<(), anyhow::Error> {
    let id = resolve_vendor(ctx, handle)?;
    let vendor = ctx.vendors.get(&id)?;
    println!("{}", serde_json::to_string_pretty(&vendor)?);
    Ok(())
}

/// Register a vendor
#[allow(clippy::too_many_arguments)]
pub fn vendor_add(
    ctx: &AppContext,
    name: &str,
    email: &str,
    phone: &str,
    category: &str,
    rating: u8,
    address: &str,
    tax_id: &str,
) -> Result<(), anyhow::Error> {
    let form = VendorForm {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        category: parse_category(category)?,
        rating,
        address: address.to_string(),
        tax_id: tax_id.to_string(),
        attachments: vec![],
        is_active: None,
    };

    let vendor = ctx.vendors.create(&form)?;
    println!("✅ Registered vendor {} ({})", vendor.name, vendor.category);
    println!("   id: {}", vendor.id);
    Ok(())
}

/// Update a vendor; omitted fields keep their current value
#[allow(clippy::too_many_arguments)]
pub fn vendor_update(
    ctx: &AppContext,
    handle: &str,
    name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
    category: Option<&str>,
    rating: Option<u8>,
    active: Option<bool>,
) -> Result<(), anyhow::Error> {
    let id = resolve_vendor(ctx, handle)?;
    let current = ctx.vendors.get(&id)?;

    let form = VendorForm {
        name: name.unwrap_or(&current.name).to_string(),
        email: email.unwrap_or(&current.email).to_string(),
        phone: phone.unwrap_or(&current.phone).to_string(),
        category: match category {
            Some(value) => parse_category(value)?,
            None => current.category,
        },
        rating: rating.unwrap_or(current.rating),
        address: current.address.clone(),
        tax_id: current.tax_id.clone(),
        attachments: current.attachments.clone(),
        is_active: Some(active.unwrap_or(current.is_active)),
    };

    let vendor = ctx.vendors.update(&id, &form)?;
    println!(
        "✅ Updated vendor {} ({})",
        vendor.name,
        if vendor.is_active { "active" } else { "inactive" },
    );
    Ok(())
}

/// Remove a vendor from the directory
pub fn vendor_rm(ctx: &AppContext, handle: &str) -> Result<(), anyhow::Error> {
    let id = resolve_vendor(ctx, handle)?;
    let removed = ctx.vendors.delete(&id)?;
    println!("✅ Removed vendor {}", removed.name);
    Ok(())
}

// === Users ===

/// List users
pub fn user_list(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let users = ctx.users.list();

    println!("Users ({}):", users.len());
    println!("{:-<80}", "");
    for user in &users {
        println!(
            "{:<20} | {:<20} | {:<17} | {}",
            user.id, user.name, user.role, user.email,
        );
    }
    Ok(())
}

/// Create a user account
pub fn user_add(ctx: &AppContext, name: &str, email: &str, role: &str) -> Result<(), anyhow::Error> {
    let form = UserForm {
        name: name.to_string(),
        email: email.to_string(),
        role: role.parse().map_err(|_| {
            anyhow::anyhow!(
                "Unknown role '{}', expected one of: employee, approver, procurement_admin, finance",
                role
            )
        })?,
    };

    let user = ctx.users.create(&form)?;
    println!("✅ Created user {} ({})", user.name, user.role);
    println!("   id: {}", user.id);
    Ok(())
}

// === RFQs ===

/// List RFQs
pub fn rfq_list(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let rfqs = ctx.rfqs.list();
    let state = ctx.store.read();

    println!("RFQs ({}):", rfqs.len());
    println!("{:-<80}", "");
    println!(
        "{:<13} | {:>8} | {:<14} | {:>7} | {:>6} | {}",
        "Number", "Status", "Requisition", "Vendors", "Quotes", "Due"
    );
    println!("{:-<80}", "");
    for rfq in &rfqs {
        let req_no = state
            .requisition(&rfq.requisition_id)
            .map_or("?", |req| req.req_no.as_str());
        println!(
            "{:<13} | {:>8} | {:<14} | {:>7} | {:>6} | {}",
            rfq.rfq_no,
            rfq.status,
            req_no,
            rfq.vendor_ids.len(),
            rfq.quotes.len(),
            rfq.due_date.format("%Y-%m-%d"),
        );
    }
    Ok(())
}

/// Show one RFQ as JSON
pub fn rfq_show(ctx: &AppContext, handle: &str) -> Result<(), anyhow::Error> {
    let id = resolve_rfq(ctx, handle)?;
    let rfq = ctx.rfqs.get(&id)?;
    println!("{}", serde_json::to_string_pretty(&rfq)?);
    Ok(())
}

/// Open a bidding round for an approved requisition
pub fn rfq_create(
    ctx: &AppContext,
    actor_id: &str,
    requisition: &str,
    vendor_handles: &[String],
    due_in_days: i64,
) -> Result<(), anyhow::Error> {
    let actor = ctx.actor(actor_id)?;
    let requisition_id = resolve_requisition(ctx, requisition)?;
    let vendor_ids = vendor_handles
        .iter()
        .map(|handle| resolve_vendor(ctx, handle))
        .collect::<Result<Vec<_>, _>>()?;

    let form = RfqForm {
        requisition_id,
        vendor_ids,
        due_date: Utc::now() + Duration::days(due_in_days),
    };

    let rfq = ctx.rfqs.create(&form, &actor)?;
    println!(
        "✅ Created {} with {} vendors (due {})",
        rfq.rfq_no,
        rfq.vendor_ids.len(),
        rfq.due_date.format("%Y-%m-%d"),
    );
    println!("   id: {}", rfq.id);
    Ok(())
}

/// Mark an RFQ as sent to its vendors
pub fn rfq_send(ctx: &AppContext, handle: &str) -> Result<(), anyhow::Error> {
    let id = resolve_rfq(ctx, handle)?;
    let rfq = ctx.rfqs.send(&id)?;
    println!("✅ {} sent to {} vendors", rfq.rfq_no, rfq.vendor_ids.len());
    Ok(())
}

/// Push the RFQ due date out
pub fn rfq_update(ctx: &AppContext, handle: &str, due_in_days: i64) -> Result<(), anyhow::Error> {
    let id = resolve_rfq(ctx, handle)?;
    let changes = RfqChanges {
        due_date: Some(Utc::now() + Duration::days(due_in_days)),
        ..Default::default()
    };

    let rfq = ctx.rfqs.update(&id, &changes)?;
    println!("✅ {} now due {}", rfq.rfq_no, rfq.due_date.format("%Y-%m-%d"));
    Ok(())
}

/// Close an RFQ on a winner and draft the purchase order
pub fn rfq_close(ctx: &AppContext, handle: &str, winner: &str) -> Result<(), anyhow::Error> {
    let id = resolve_rfq(ctx, handle)?;
    let winner_id = resolve_vendor(ctx, winner)?;

    let rfq = ctx.rfqs.close(&id, &winner_id)?;
    println!("✅ Closed {} on winner {}", rfq.rfq_no, winner);

    // The draft order lands at the head of the list when the gate passes
    if let Some(order) = ctx
        .pos
        .list()
        .into_iter()
        .find(|po| po.linked_requisition_ids.contains(&rfq.requisition_id))
    {
        println!("   Drafted {} (total {})", order.po_no, order.total);
    }
    Ok(())
}

/// Draft a purchase order from any quoted vendor on the RFQ
pub fn rfq_po(ctx: &AppContext, handle: &str, vendor: &str) -> Result<(), anyhow::Error> {
    let id = resolve_rfq(ctx, handle)?;
    let vendor_id = resolve_vendor(ctx, vendor)?;

    let order = ctx.rfqs.create_po(&id, &vendor_id)?;
    println!("✅ Drafted {} (total {})", order.po_no, order.total);
    Ok(())
}

/// Show the price-free vendor view of an RFQ
pub fn rfq_view(ctx: &AppContext, identifier: &str) -> Result<(), anyhow::Error> {
    let Some(view) = ctx.rfqs.public_view(identifier) else {
        anyhow::bail!("RFQ not found: {}", identifier);
    };
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// Record a vendor quote against an open RFQ
#[allow(clippy::too_many_arguments)]
pub fn rfq_quote(
    ctx: &AppContext,
    identifier: &str,
    vendor_name: &str,
    vendor_email: &str,
    terms: &str,
    taxes: Decimal,
    shipping: Decimal,
    item_specs: &[String],
) -> Result<(), anyhow::Error> {
    let items = item_specs
        .iter()
        .map(|spec| parse_quote_item(spec))
        .collect::<Result<Vec<_>, _>>()?;

    // The captcha store lives and dies with the process, so a previously
    // issued challenge id cannot exist here. The operator entering a
    // quote on a vendor's behalf answers a fresh one.
    let challenge = ctx.captcha.challenge();
    let form = VendorQuoteForm {
        vendor_name: vendor_name.to_string(),
        vendor_email: vendor_email.to_string(),
        vendor_company: None,
        payment_terms: terms.to_string(),
        taxes: Amount::new(taxes)?,
        shipping: Amount::new(shipping)?,
        notes: None,
        items,
        captcha_answer: solve_captcha(&challenge.question),
        captcha_id: challenge.id,
    };

    let quote = ctx.rfqs.submit_vendor_quote(identifier, &form)?;
    println!(
        "✅ Quote recorded for {} (total {}, lead time {} days)",
        vendor_name, quote.total, quote.lead_time_days,
    );
    Ok(())
}

// === Purchase orders ===

/// List purchase orders
pub fn po_list(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let orders = ctx.pos.list();
    let state = ctx.store.read();

    println!("Purchase orders ({}):", orders.len());
    println!("{:-<80}", "");
    println!(
        "{:<13} | {:>18} | {:<28} | {:>16}",
        "Number", "Status", "Vendor", "Total"
    );
    println!("{:-<80}", "");
    for order in &orders {
        let vendor = state
            .vendor(&order.vendor_id)
            .map_or("?", |vendor| vendor.name.as_str());
        println!(
            "{:<13} | {:>18} | {:<28} | {:>16}",
            order.po_no, order.status, vendor, order.total,
        );
    }
    Ok(())
}

/// Show one purchase order as JSON
pub fn po_show(ctx: &AppContext, handle: &str) -> Result<(), anyhow::Error> {
    let id = resolve_po(ctx, handle)?;
    let order = ctx.pos.get(&id)?;
    println!("{}", serde_json::to_string_pretty(&order)?);
    Ok(())
}

/// Draft a purchase order directly from a requisition
pub fn po_create(
    ctx: &AppContext,
    requisition: &str,
    vendor: &str,
    total: Option<Decimal>,
    terms: Option<&str>,
) -> Result<(), anyhow::Error> {
    let requisition_id = resolve_requisition(ctx, requisition)?;
    let vendor_id = resolve_vendor(ctx, vendor)?;

    let quote_total = match total {
        Some(value) => Some(Amount::new(value)?),
        None => None,
    };
    let params = PoDraftParams {
        requisition_id,
        vendor_id,
        quote_total,
        currency: None,
        terms: terms.map(str::to_string),
    };

    let order = ctx.pos.create_draft(&params)?;
    println!("✅ Drafted {} (total {})", order.po_no, order.total);
    println!("   id: {}", order.id);
    Ok(())
}

/// Move a purchase order through its lifecycle or attach a payment proof
pub fn po_update(
    ctx: &AppContext,
    handle: &str,
    status: Option<&str>,
    proof_url: Option<&str>,
) -> Result<(), anyhow::Error> {
    let id = resolve_po(ctx, handle)?;

    let status = match status {
        Some(value) => Some(parse_po_status(value)?),
        None => None,
    };
    let payment_proofs = proof_url.map(|url| {
        let mut proofs = ctx
            .pos
            .get(&id)
            .map(|order| order.payment_proofs)
            .unwrap_or_default();
        proofs.push(proof_meta(url));
        proofs
    });

    let changes = PoChanges {
        status,
        payment_proofs,
    };
    let order = ctx.pos.update(&id, &changes)?;

    println!(
        "✅ {} is now {} ({} payment proofs)",
        order.po_no,
        order.status,
        order.payment_proofs.len(),
    );
    Ok(())
}

// === Reporting ===

/// Print the dashboard rollup
pub fn dashboard(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let metrics = ctx.reporting.dashboard();

    println!("Procurement dashboard");
    println!("{:-<80}", "");
    println!(
        "Requisitions:  {} total / {} open / {} pending approval (avg approval {:.1} days)",
        metrics.requisitions.total,
        metrics.requisitions.open,
        metrics.requisitions.pending_approvals,
        metrics.requisitions.average_approval_days,
    );
    println!(
        "RFQs:          {} total / {} in progress",
        metrics.rfqs.total, metrics.rfqs.in_progress,
    );
    println!(
        "POs:           {} total, value {}",
        metrics.pos.total, metrics.pos.total_value,
    );
    if !metrics.pos.status.is_empty() {
        let by_status = metrics
            .pos
            .status
            .iter()
            .map(|(status, count)| format!("{}: {}", status, count))
            .collect::<Vec<_>>()
            .join(", ");
        println!("               by status: {}", by_status);
    }
    if !metrics.approvals.is_empty() {
        let waiting = metrics
            .approvals
            .iter()
            .map(|(role, count)| format!("{}: {}", role, count))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Waiting on:    {}", waiting);
    }

    println!();
    println!("Spend by category (submitted and approved):");
    for (category, amount) in &metrics.spend_by_category {
        println!("   {:<12} {:>16}", category, amount);
    }
    println!("   {:<12} {:>16}", "total", metrics.spend_total);

    println!();
    println!(
        "Budget: {} allocated / {} used / {} remaining",
        metrics.budget.total, metrics.budget.used, metrics.budget.remaining,
    );
    for summary in &metrics.budget.summaries {
        println!(
            "   {:<12} {:>16} remaining",
            summary.budget.cost_center, summary.remaining,
        );
    }

    if !metrics.vendors.top.is_empty() {
        println!();
        println!("Top vendors by PO value:");
        for vendor in &metrics.vendors.top {
            println!("   {:<28} {:>16}", vendor.name, vendor.total);
        }
    }

    println!();
    println!("Recent requisitions:");
    for req in &metrics.recent.requisitions {
        println!(
            "   {:<14} {:>9} {:>16}  {}",
            req.req_no,
            req.status,
            req.total,
            req.created_at.format("%Y-%m-%d"),
        );
    }
    Ok(())
}

/// Export the procurement report (successful POs with their context)
pub fn report(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let records = ctx.reporting.procurement_report();
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// List every uploaded document across requisitions and POs
pub fn documents(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let documents = ctx.reporting.documents();

    if documents.is_empty() {
        println!("No documents on file");
        return Ok(());
    }

    println!("Documents ({}):", documents.len());
    println!("{:-<80}", "");
    for doc in &documents {
        println!(
            "{:<28} | {:<13} | {:<12} | {}",
            doc.name,
            doc.reference,
            doc.cost_center.as_deref().unwrap_or("-"),
            doc.uploaded_at.format("%Y-%m-%d"),
        );
    }
    Ok(())
}

/// Show the audit feed, newest first
pub fn audits(ctx: &AppContext, limit: usize) -> Result<(), anyhow::Error> {
    let events = ctx.reporting.audit_events();

    println!("Audit feed ({} events):", events.len());
    println!("{:-<80}", "");
    for event in events.iter().take(limit) {
        println!(
            "{} | {:<13} | {:<16} | {}",
            event.at.format("%Y-%m-%d %H:%M"),
            event.reference,
            event.action,
            event.actor,
        );
        if let Some(notes) = &event.notes {
            println!("   note: {}", notes);
        }
    }
    Ok(())
}

// === Demo walkthrough ===

/// Run one requisition through the whole procure-to-pay flow
pub fn demo(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let employee = ctx.actor("user-employee")?;
    let approver = ctx.actor("user-approver")?;
    let finance = ctx.actor("user-finance")?;
    let admin = ctx.actor("user-procurement")?;

    println!("Procure-to-pay walkthrough");
    println!("{:-<80}", "");

    println!("1. {} drafts a requisition for two rack servers", employee.name);
    let form = requisition_form(
        "IT",
        "IT-OPS-001",
        21,
        &["Rack servers:2:90000000:IT".to_string()],
        Some("Replacing the out-of-warranty pair in rack 4."),
    )?;
    let requisition = ctx.requisitions.create(&form, &employee)?;
    println!(
        "   ✅ {} created (total {})",
        requisition.req_no,
        requisition.total.format(&Currency::Idr),
    );

    println!("2. {} submits it for approval", employee.name);
    let requisition = ctx.requisitions.submit(&requisition.id, &employee)?;
    let chain = requisition
        .approval_steps
        .iter()
        .map(|step| step.role.as_str())
        .collect::<Vec<_>>()
        .join(" -> ");
    println!("   ✅ Chain evaluated: {}", chain);

    println!("3. {} approves the first step", approver.name);
    ctx.requisitions
        .process_approval(&requisition.id, &approver, ApprovalDecision::Approve, None)?;

    println!("4. {} signs off on the spend", finance.name);
    let requisition = ctx.requisitions.process_approval(
        &requisition.id,
        &finance,
        ApprovalDecision::Approve,
        Some("Within the IT operations budget."),
    )?;
    println!("   ✅ {} is {}", requisition.req_no, requisition.status);

    println!("5. {} opens an RFQ with three vendors", admin.name);
    let vendor_ids: Vec<String> = ctx
        .vendors
        .list()
        .iter()
        .filter(|vendor| vendor.is_active)
        .take(3)
        .map(|vendor| vendor.id.clone())
        .collect();
    let rfq = ctx.rfqs.create(
        &RfqForm {
            requisition_id: requisition.id.clone(),
            vendor_ids,
            due_date: Utc::now() + Duration::days(7),
        },
        &admin,
    )?;
    let rfq = ctx.rfqs.send(&rfq.id)?;
    println!("   ✅ {} sent to {} vendors", rfq.rfq_no, rfq.vendor_ids.len());

    println!("6. A vendor answers the captcha and submits a quote");
    let Some(vendor_id) = rfq.vendor_ids.first() else {
        anyhow::bail!("Demo dataset has no active vendors");
    };
    let vendor = ctx.vendors.get(vendor_id)?;
    let item_id = requisition
        .items
        .first()
        .map(|item| item.id.clone())
        .ok_or_else(|| anyhow::anyhow!("Requisition has no items"))?;
    let challenge = ctx.captcha.challenge();
    let quote = ctx.rfqs.submit_vendor_quote(
        &rfq.rfq_no,
        &VendorQuoteForm {
            vendor_name: vendor.name.clone(),
            vendor_email: vendor.email.clone(),
            vendor_company: Some(vendor.name.clone()),
            payment_terms: "30 days".to_string(),
            taxes: Amount::new(Decimal::new(18_700_000, 0))?,
            shipping: Amount::new(Decimal::new(1_500_000, 0))?,
            notes: None,
            items: vec![QuoteItemForm {
                requisition_item_id: item_id,
                unit_price: Amount::new(Decimal::new(85_000_000, 0))?,
                lead_time_days: 14,
                notes: None,
            }],
            captcha_id: challenge.id.clone(),
            captcha_answer: solve_captcha(&challenge.question),
        },
    )?;
    println!("   ✅ {} quoted {}", vendor.name, quote.total.format(&Currency::Idr));

    println!("7. {} closes the RFQ on the winner", admin.name);
    let rfq = ctx.rfqs.close(&rfq.id, &vendor.id)?;
    let order = ctx
        .pos
        .list()
        .into_iter()
        .find(|po| po.linked_requisition_ids.contains(&rfq.requisition_id))
        .ok_or_else(|| anyhow::anyhow!("Closing the RFQ produced no purchase order"))?;
    println!("   ✅ {} closed, {} drafted", rfq.rfq_no, order.po_no);

    println!("8. The order is issued to the vendor");
    let order = ctx.pos.update(
        &order.id,
        &PoChanges {
            status: Some(PoStatus::Issued),
            payment_proofs: None,
        },
    )?;
    println!("   ✅ {} is {} (total {})", order.po_no, order.status, order.total);

    println!();
    dashboard(ctx)
}

// === Helpers ===

/// Parse `DESCRIPTION:QTY:UNIT_PRICE:CATEGORY[:UOM]` into an item form
fn parse_item(spec: &str) -> Result<RequisitionItemForm, anyhow::Error> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() < 4 {
        anyhow::bail!(
            "Invalid item '{}', expected DESCRIPTION:QTY:UNIT_PRICE:CATEGORY[:UOM]",
            spec
        );
    }

    let quantity: Decimal = parts[1]
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid quantity '{}' in item '{}'", parts[1], spec))?;
    let unit_price: Decimal = parts[2]
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid unit price '{}' in item '{}'", parts[2], spec))?;

    Ok(RequisitionItemForm {
        id: None,
        sku: None,
        description: parts[0].to_string(),
        quantity,
        uom: parts.get(4).unwrap_or(&"unit").to_string(),
        unit_price: Amount::new(unit_price)?,
        currency: Currency::Idr,
        category: parse_category(parts[3])?,
        vendor_preference_id: None,
    })
}

/// Parse `REQUISITION_ITEM_ID:UNIT_PRICE:LEAD_DAYS` into a quote line
fn parse_quote_item(spec: &str) -> Result<QuoteItemForm, anyhow::Error> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 3 {
        anyhow::bail!(
            "Invalid quote item '{}', expected REQUISITION_ITEM_ID:UNIT_PRICE:LEAD_DAYS",
            spec
        );
    }

    let unit_price: Decimal = parts[1]
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid unit price '{}' in quote item '{}'", parts[1], spec))?;
    let lead_time_days: u32 = parts[2]
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid lead time '{}' in quote item '{}'", parts[2], spec))?;

    Ok(QuoteItemForm {
        requisition_item_id: parts[0].to_string(),
        unit_price: Amount::new(unit_price)?,
        lead_time_days,
        notes: None,
    })
}

fn requisition_form(
    department: &str,
    cost_center: &str,
    needed_in_days: i64,
    item_specs: &[String],
    notes: Option<&str>,
) -> Result<RequisitionForm, anyhow::Error> {
    let items = item_specs
        .iter()
        .map(|spec| parse_item(spec))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RequisitionForm {
        department: department.to_string(),
        cost_center: cost_center.to_string(),
        needed_by: Utc::now() + Duration::days(needed_in_days),
        notes: notes.map(str::to_string),
        items,
        attachments: vec![],
    })
}

fn rule_form(
    name: &str,
    amount_gte: Option<Decimal>,
    category: Option<&str>,
    cost_center: Option<&str>,
    steps_spec: &str,
) -> Result<RuleForm, anyhow::Error> {
    let amount_gte = match amount_gte {
        Some(value) => Some(Amount::new(value)?),
        None => None,
    };
    let category = match category {
        Some(value) => Some(parse_category(value)?),
        None => None,
    };

    let steps = steps_spec
        .split(',')
        .enumerate()
        .map(|(index, role)| {
            let role: ApprovalRole = role.trim().parse().map_err(|_| {
                anyhow::anyhow!(
                    "Unknown approval role '{}', expected one of: approver, finance, procurement_admin",
                    role.trim()
                )
            })?;
            Ok(ApprovalStep::new(index as u32 + 1, role))
        })
        .collect::<Result<Vec<_>, anyhow::Error>>()?;

    Ok(RuleForm {
        name: name.to_string(),
        conditions: RuleConditions {
            amount_gte,
            category,
            cost_center: cost_center.map(str::to_string),
        },
        steps,
    })
}

fn parse_category(value: &str) -> Result<VendorCategory, anyhow::Error> {
    value.parse().map_err(|_| {
        let expected = VendorCategory::ALL
            .iter()
            .map(|category| category.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        anyhow::anyhow!("Unknown category '{}', expected one of: {}", value, expected)
    })
}

fn parse_po_status(value: &str) -> Result<PoStatus, anyhow::Error> {
    value.parse().map_err(|_| {
        anyhow::anyhow!(
            "Unknown PO status '{}', expected one of: draft, issued, partially_received, closed, canceled",
            value
        )
    })
}

fn describe_conditions(conditions: &RuleConditions) -> String {
    let mut parts = Vec::new();
    if let Some(amount) = &conditions.amount_gte {
        parts.push(format!("total >= {}", amount));
    }
    if let Some(category) = &conditions.category {
        parts.push(format!("category = {}", category));
    }
    if let Some(cost_center) = &conditions.cost_center {
        parts.push(format!("cost center = {}", cost_center));
    }
    if parts.is_empty() {
        "always".to_string()
    } else {
        parts.join(" and ")
    }
}

fn proof_meta(url: &str) -> FileMeta {
    let name = url.rsplit('/').next().unwrap_or(url).to_string();
    FileMeta {
        id: new_id(),
        name,
        size: 0,
        mime: "application/octet-stream".to_string(),
        url: url.to_string(),
    }
}

/// The demo plays the vendor side too, so it answers its own challenge
fn solve_captcha(question: &str) -> u32 {
    question
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse::<u32>().ok())
        .sum()
}

fn resolve_requisition(ctx: &AppContext, handle: &str) -> Result<String, anyhow::Error> {
    let state = ctx.store.read();
    state
        .requisitions
        .iter()
        .find(|req| req.id == handle || req.req_no.eq_ignore_ascii_case(handle))
        .map(|req| req.id.clone())
        .ok_or_else(|| anyhow::anyhow!("No requisition matches '{}'", handle))
}

fn resolve_rfq(ctx: &AppContext, handle: &str) -> Result<String, anyhow::Error> {
    let state = ctx.store.read();
    state
        .rfq_by_identifier(handle)
        .map(|rfq| rfq.id.clone())
        .ok_or_else(|| anyhow::anyhow!("No RFQ matches '{}'", handle))
}

fn resolve_po(ctx: &AppContext, handle: &str) -> Result<String, anyhow::Error> {
    let state = ctx.store.read();
    state
        .purchase_orders
        .iter()
        .find(|po| po.id == handle || po.po_no.eq_ignore_ascii_case(handle))
        .map(|po| po.id.clone())
        .ok_or_else(|| anyhow::anyhow!("No purchase order matches '{}'", handle))
}

fn resolve_vendor(ctx: &AppContext, handle: &str) -> Result<String, anyhow::Error> {
    let state = ctx.store.read();
    state
        .vendors
        .iter()
        .find(|vendor| {
            vendor.id == handle
                || vendor.email.eq_ignore_ascii_case(handle)
                || vendor.name.eq_ignore_ascii_case(handle)
        })
        .map(|vendor| vendor.id.clone())
        .ok_or_else(|| anyhow::anyhow!("No vendor matches '{}'", handle))
}
