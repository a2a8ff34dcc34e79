//! Approval rules - who must approve which requisitions

use procura_core::Amount;
use serde::{Deserialize, Serialize};

use crate::roles::ApprovalRole;
use crate::vendor::VendorCategory;

/// One step in an approval chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApprovalStep {
    /// 1-based position in the chain
    pub order: u32,
    pub role: ApprovalRole,
}

impl ApprovalStep {
    pub fn new(order: u32, role: ApprovalRole) -> Self {
        Self { order, role }
    }
}

/// Conditions under which a rule applies.
///
/// Each populated field must hold for the rule to match; a rule with no
/// populated field never matches (creation validates at least one).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConditions {
    /// Matches when the requisition total is at or above this amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_gte: Option<Amount>,
    /// Matches when any line item carries this category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<VendorCategory>,
    /// Matches on exact cost center equality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
}

impl RuleConditions {
    /// Specificity weight: the count of populated condition fields
    pub fn weight(&self) -> u32 {
        let mut weight = 0;
        if self.amount_gte.is_some() {
            weight += 1;
        }
        if self.category.is_some() {
            weight += 1;
        }
        if self.cost_center.is_some() {
            weight += 1;
        }
        weight
    }

    pub fn is_empty(&self) -> bool {
        self.weight() == 0
    }
}

/// A configured approval rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRule {
    pub id: String,
    pub name: String,
    pub conditions: RuleConditions,
    pub steps: Vec<ApprovalStep>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_condition_weight() {
        let empty = RuleConditions::default();
        assert_eq!(empty.weight(), 0);
        assert!(empty.is_empty());

        let amount_only = RuleConditions {
            amount_gte: Some(Amount::new(dec!(100_000_000)).unwrap()),
            ..Default::default()
        };
        assert_eq!(amount_only.weight(), 1);

        let specific = RuleConditions {
            amount_gte: None,
            category: Some(VendorCategory::It),
            cost_center: Some("IT-OPS-001".to_string()),
        };
        assert_eq!(specific.weight(), 2);
    }

    #[test]
    fn test_conditions_serialize_sparse() {
        let amount_only = RuleConditions {
            amount_gte: Some(Amount::new(dec!(0)).unwrap()),
            ..Default::default()
        };
        let json = serde_json::to_string(&amount_only).unwrap();
        assert!(!json.contains("category"));
        assert!(!json.contains("cost_center"));
    }
}
