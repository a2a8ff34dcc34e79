//! Procura Directory - who we buy from and who works here
//!
//! Vendors carry a category, a rating and an active flag; deactivated
//! vendors stay on record for old documents but are excluded from new
//! RFQ invitations. Users are the internal accounts approvals route to.

pub mod users;
pub mod vendors;

pub use users::{UserError, UserService};
pub use vendors::{VendorError, VendorService};
