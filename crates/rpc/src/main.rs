//! Procura CLI - Main entry point
//!
//! Every invocation runs against a fresh copy of the demo dataset, so
//! the human document numbers (`PR-2024-0001`, `RFQ-2024-010`,
//! `PO-2024-020`) are the stable handles across runs.

use clap::{Parser, Subcommand};
use procura_rpc::{commands, AppContext};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(name = "procura")]
#[command(about = "Procura - Procurement Management System", long_about = None)]
struct Cli {
    /// Acting user id (see `procura user list`)
    #[arg(
        long = "as",
        value_name = "USER_ID",
        default_value = "user-employee",
        global = true
    )]
    actor: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage purchase requisitions
    #[command(subcommand)]
    Req(ReqCommands),

    /// List requisitions waiting on the acting user
    Inbox,

    /// Manage approval rules
    #[command(subcommand)]
    Rule(RuleCommands),

    /// List budgets with derived usage
    Budgets,

    /// Manage the vendor directory
    #[command(subcommand)]
    Vendor(VendorCommands),

    /// Manage user accounts
    #[command(subcommand)]
    User(UserCommands),

    /// Run bidding rounds against vendors
    #[command(subcommand)]
    Rfq(RfqCommands),

    /// Manage purchase orders
    #[command(subcommand)]
    Po(PoCommands),

    /// Print the dashboard rollup
    Dashboard,

    /// Export the procurement report as JSON
    Report,

    /// List every uploaded document
    Documents,

    /// Show the audit feed, newest first
    Audits {
        /// Maximum number of events to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Run one requisition through the whole procure-to-pay flow
    Demo,
}

#[derive(Subcommand)]
enum ReqCommands {
    /// List all requisitions
    List,

    /// Show one requisition as JSON
    Show {
        /// Requisition id or PR number
        requisition: String,
    },

    /// Create a draft requisition
    Create {
        /// Requesting department
        #[arg(long)]
        department: String,
        /// Cost center the spend is charged to
        #[arg(long)]
        cost_center: String,
        /// Days until the goods are needed
        #[arg(long, default_value = "14")]
        needed_in: i64,
        /// Line item as DESCRIPTION:QTY:UNIT_PRICE:CATEGORY[:UOM] (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Replace a draft requisition's content
    Update {
        /// Requisition id or PR number
        requisition: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        cost_center: String,
        #[arg(long, default_value = "14")]
        needed_in: i64,
        /// Line item as DESCRIPTION:QTY:UNIT_PRICE:CATEGORY[:UOM] (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Submit a draft for approval
    Submit {
        /// Requisition id or PR number
        requisition: String,
    },

    /// Approve the pending step
    Approve {
        /// Requisition id or PR number
        requisition: String,
        /// Comment recorded on the approval event
        #[arg(long)]
        comment: Option<String>,
    },

    /// Return the requisition to its requester
    Return {
        /// Requisition id or PR number
        requisition: String,
        /// Comment recorded on the return event
        #[arg(long)]
        comment: Option<String>,
    },
}

#[derive(Subcommand)]
enum RuleCommands {
    /// List the configured approval rules
    List,

    /// Create an approval rule
    Add {
        /// Rule name
        name: String,
        /// Match when the requisition total is at or above this amount
        #[arg(long)]
        amount_gte: Option<Decimal>,
        /// Match when any line item carries this category
        #[arg(long)]
        category: Option<String>,
        /// Match on exact cost center
        #[arg(long)]
        cost_center: Option<String>,
        /// Comma-separated chain, e.g. approver,finance,procurement_admin
        #[arg(long)]
        steps: String,
    },

    /// Replace an approval rule
    Update {
        /// Rule id
        id: String,
        /// Rule name
        name: String,
        #[arg(long)]
        amount_gte: Option<Decimal>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        cost_center: Option<String>,
        /// Comma-separated chain, e.g. approver,finance
        #[arg(long)]
        steps: String,
    },

    /// Delete an approval rule
    Rm {
        /// Rule id
        id: String,
    },
}

#[derive(Subcommand)]
enum VendorCommands {
    /// List vendors
    List,

    /// Show one vendor as JSON
    Show {
        /// Vendor id, name or email
        vendor: String,
    },

    /// Register a vendor
    Add {
        /// Vendor name
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// Category: IT, Office, Logistics, Services or Facilities
        #[arg(long)]
        category: String,
        /// Rating from 1 (poor) to 5 (excellent)
        #[arg(long, default_value = "3")]
        rating: u8,
        #[arg(long)]
        address: String,
        #[arg(long, default_value = "")]
        tax_id: String,
    },

    /// Update a vendor; omitted fields keep their current value
    Update {
        /// Vendor id, name or email
        vendor: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        rating: Option<u8>,
        /// Activate or deactivate (true/false)
        #[arg(long)]
        active: Option<bool>,
    },

    /// Remove a vendor from the directory
    Rm {
        /// Vendor id, name or email
        vendor: String,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// List users
    List,

    /// Create a user account
    Add {
        /// Display name
        name: String,
        #[arg(long)]
        email: String,
        /// Role: employee, approver, procurement_admin or finance
        #[arg(long)]
        role: String,
    },
}

#[derive(Subcommand)]
enum RfqCommands {
    /// List RFQs
    List,

    /// Show one RFQ as JSON
    Show {
        /// RFQ id or number
        rfq: String,
    },

    /// Open a bidding round for an approved requisition
    Create {
        /// Source requisition (id or PR number)
        requisition: String,
        /// Vendor to invite (repeatable; id, name or email)
        #[arg(long = "vendor", required = true)]
        vendors: Vec<String>,
        /// Days until quotes are due
        #[arg(long, default_value = "7")]
        due_in: i64,
    },

    /// Mark an RFQ as sent to its vendors
    Send {
        /// RFQ id or number
        rfq: String,
    },

    /// Push the RFQ due date out
    Update {
        /// RFQ id or number
        rfq: String,
        /// New due date, days from now
        #[arg(long)]
        due_in: i64,
    },

    /// Close the bidding round on a winner and draft the purchase order
    Close {
        /// RFQ id or number
        rfq: String,
        /// Winning vendor (id, name or email)
        #[arg(long)]
        winner: String,
    },

    /// Draft a purchase order from any invited vendor
    Po {
        /// RFQ id or number
        rfq: String,
        /// Vendor the order goes to (id, name or email)
        #[arg(long)]
        vendor: String,
    },

    /// Show the price-free vendor view of an RFQ
    View {
        /// RFQ id or number
        rfq: String,
    },

    /// Record a vendor quote against an open RFQ
    Quote {
        /// RFQ id or number
        rfq: String,
        #[arg(long)]
        vendor_name: String,
        #[arg(long)]
        vendor_email: String,
        /// Payment terms offered
        #[arg(long, default_value = "30 days")]
        terms: String,
        #[arg(long, default_value = "0")]
        taxes: Decimal,
        #[arg(long, default_value = "0")]
        shipping: Decimal,
        /// Quote line as REQUISITION_ITEM_ID:UNIT_PRICE:LEAD_DAYS (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
}

#[derive(Subcommand)]
enum PoCommands {
    /// List purchase orders
    List,

    /// Show one purchase order as JSON
    Show {
        /// PO id or number
        po: String,
    },

    /// Draft a purchase order directly from a requisition
    Create {
        /// Source requisition (id or PR number)
        requisition: String,
        /// Vendor the order goes to (id, name or email)
        #[arg(long)]
        vendor: String,
        /// Override the order total (defaults to the requisition total)
        #[arg(long)]
        total: Option<Decimal>,
        /// Payment terms
        #[arg(long)]
        terms: Option<String>,
    },

    /// Move an order through its lifecycle or attach a payment proof
    Update {
        /// PO id or number
        po: String,
        /// New status: draft, issued, partially_received, closed, canceled
        #[arg(long)]
        status: Option<String>,
        /// Attach a payment proof by URL
        #[arg(long)]
        proof: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Create application context over the demo dataset
    let ctx = AppContext::new();

    match cli.command {
        Commands::Req(command) => match command {
            ReqCommands::List => commands::req_list(&ctx)?,
            ReqCommands::Show { requisition } => commands::req_show(&ctx, &requisition)?,
            ReqCommands::Create {
                department,
                cost_center,
                needed_in,
                items,
                notes,
            } => commands::req_create(
                &ctx,
                &cli.actor,
                &department,
                &cost_center,
                needed_in,
                &items,
                notes.as_deref(),
            )?,
            ReqCommands::Update {
                requisition,
                department,
                cost_center,
                needed_in,
                items,
                notes,
            } => commands::req_update(
                &ctx,
                &cli.actor,
                &requisition,
                &department,
                &cost_center,
                needed_in,
                &items,
                notes.as_deref(),
            )?,
            ReqCommands::Submit { requisition } => {
                commands::req_submit(&ctx, &cli.actor, &requisition)?
            }
            ReqCommands::Approve {
                requisition,
                comment,
            } => commands::req_approve(&ctx, &cli.actor, &requisition, comment.as_deref())?,
            ReqCommands::Return {
                requisition,
                comment,
            } => commands::req_return(&ctx, &cli.actor, &requisition, comment.as_deref())?,
        },

        Commands::Inbox => commands::inbox(&ctx, &cli.actor)?,

        Commands::Rule(command) => match command {
            RuleCommands::List => commands::rule_list(&ctx)?,
            RuleCommands::Add {
                name,
                amount_gte,
                category,
                cost_center,
                steps,
            } => commands::rule_add(
                &ctx,
                &name,
                amount_gte,
                category.as_deref(),
                cost_center.as_deref(),
                &steps,
            )?,
            RuleCommands::Update {
                id,
                name,
                amount_gte,
                category,
                cost_center,
                steps,
            } => commands::rule_update(
                &ctx,
                &id,
                &name,
                amount_gte,
                category.as_deref(),
                cost_center.as_deref(),
                &steps,
            )?,
            RuleCommands::Rm { id } => commands::rule_rm(&ctx, &id)?,
        },

        Commands::Budgets => commands::budget_list(&ctx)?,

        Commands::Vendor(command) => match command {
            VendorCommands::List => commands::vendor_list(&ctx)?,
            VendorCommands::Show { vendor } => commands::vendor_show(&ctx, &vendor)?,
            VendorCommands::Add {
                name,
                email,
                phone,
                category,
                rating,
                address,
                tax_id,
            } => commands::vendor_add(
                &ctx, &name, &email, &phone, &category, rating, &address, &tax_id,
            )?,
            VendorCommands::Update {
                vendor,
                name,
                email,
                phone,
                category,
                rating,
                active,
            } => commands::vendor_update(
                &ctx,
                &vendor,
                name.as_deref(),
                email.as_deref(),
                phone.as_deref(),
                category.as_deref(),
                rating,
                active,
            )?,
            VendorCommands::Rm { vendor } => commands::vendor_rm(&ctx, &vendor)?,
        },

        Commands::User(command) => match command {
            UserCommands::List => commands::user_list(&ctx)?,
            UserCommands::Add { name, email, role } => {
                commands::user_add(&ctx, &name, &email, &role)?
            }
        },

        Commands::Rfq(command) => match command {
            RfqCommands::List => commands::rfq_list(&ctx)?,
            RfqCommands::Show { rfq } => commands::rfq_show(&ctx, &rfq)?,
            RfqCommands::Create {
                requisition,
                vendors,
                due_in,
            } => commands::rfq_create(&ctx, &cli.actor, &requisition, &vendors, due_in)?,
            RfqCommands::Send { rfq } => commands::rfq_send(&ctx, &rfq)?,
            RfqCommands::Update { rfq, due_in } => commands::rfq_update(&ctx, &rfq, due_in)?,
            RfqCommands::Close { rfq, winner } => commands::rfq_close(&ctx, &rfq, &winner)?,
            RfqCommands::Po { rfq, vendor } => commands::rfq_po(&ctx, &rfq, &vendor)?,
            RfqCommands::View { rfq } => commands::rfq_view(&ctx, &rfq)?,
            RfqCommands::Quote {
                rfq,
                vendor_name,
                vendor_email,
                terms,
                taxes,
                shipping,
                items,
            } => commands::rfq_quote(
                &ctx,
                &rfq,
                &vendor_name,
                &vendor_email,
                &terms,
                taxes,
                shipping,
                &items,
            )?,
        },

        Commands::Po(command) => match command {
            PoCommands::List => commands::po_list(&ctx)?,
            PoCommands::Show { po } => commands::po_show(&ctx, &po)?,
            PoCommands::Create {
                requisition,
                vendor,
                total,
                terms,
            } => commands::po_create(&ctx, &requisition, &vendor, total, terms.as_deref())?,
            PoCommands::Update { po, status, proof } => {
                commands::po_update(&ctx, &po, status.as_deref(), proof.as_deref())?
            }
        },

        Commands::Dashboard => commands::dashboard(&ctx)?,
        Commands::Report => commands::report(&ctx)?,
        Commands::Documents => commands::documents(&ctx)?,
        Commands::Audits { limit } => commands::audits(&ctx, limit)?,
        Commands::Demo => commands::demo(&ctx)?,
    }

    Ok(())
}
