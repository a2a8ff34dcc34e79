//! Roles - who may do what in the procurement workflow

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Role held by a user account
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumString,
    Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Raises requisitions
    Employee,
    /// First-line manager approval
    Approver,
    /// Runs sourcing: RFQs, POs, vendor management
    ProcurementAdmin,
    /// Budget sign-off on high-value spend
    Finance,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Approver => "approver",
            Role::ProcurementAdmin => "procurement_admin",
            Role::Finance => "finance",
        }
    }
}

/// The subset of roles that can sit in an approval step.
///
/// `employee` never approves, so approval rules are restricted to this
/// enum at the type level rather than validated at runtime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumString,
    Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalRole {
    Approver,
    Finance,
    ProcurementAdmin,
}

impl ApprovalRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalRole::Approver => "approver",
            ApprovalRole::Finance => "finance",
            ApprovalRole::ProcurementAdmin => "procurement_admin",
        }
    }
}

impl From<ApprovalRole> for Role {
    fn from(role: ApprovalRole) -> Self {
        match role {
            ApprovalRole::Approver => Role::Approver,
            ApprovalRole::Finance => Role::Finance,
            ApprovalRole::ProcurementAdmin => Role::ProcurementAdmin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(Role::ProcurementAdmin.to_string(), "procurement_admin");
        assert_eq!(Role::from_str("finance").unwrap(), Role::Finance);
        assert_eq!(
            serde_json::to_string(&Role::ProcurementAdmin).unwrap(),
            "\"procurement_admin\""
        );
    }

    #[test]
    fn test_approval_role_maps_into_role() {
        assert_eq!(Role::from(ApprovalRole::Approver), Role::Approver);
        assert_eq!(Role::from(ApprovalRole::ProcurementAdmin), Role::ProcurementAdmin);
    }

    #[test]
    fn test_as_str_matches_display() {
        for role in [Role::Employee, Role::Approver, Role::ProcurementAdmin, Role::Finance] {
            assert_eq!(role.as_str(), role.to_string());
        }
    }
}
