//! Vendors - external suppliers invited to quote

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::attachment::FileMeta;

/// Supply category a vendor serves.
///
/// Wire strings match the catalog labels: `IT` stays uppercase, the rest
/// are capitalized words.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumString,
    Display,
)]
pub enum VendorCategory {
    #[strum(serialize = "IT")]
    #[serde(rename = "IT")]
    It,
    Office,
    Logistics,
    Services,
    Facilities,
}

impl VendorCategory {
    pub const ALL: [VendorCategory; 5] = [
        VendorCategory::It,
        VendorCategory::Office,
        VendorCategory::Logistics,
        VendorCategory::Services,
        VendorCategory::Facilities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VendorCategory::It => "IT",
            VendorCategory::Office => "Office",
            VendorCategory::Logistics => "Logistics",
            VendorCategory::Services => "Services",
            VendorCategory::Facilities => "Facilities",
        }
    }
}

/// A registered vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: VendorCategory,
    /// 1 (poor) to 5 (excellent)
    pub rating: u8,
    pub address: String,
    pub tax_id: String,
    pub attachments: Vec<FileMeta>,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_wire_format() {
        assert_eq!(VendorCategory::It.to_string(), "IT");
        assert_eq!(VendorCategory::Office.to_string(), "Office");
        assert_eq!(serde_json::to_string(&VendorCategory::It).unwrap(), "\"IT\"");
        assert_eq!(
            serde_json::to_string(&VendorCategory::Facilities).unwrap(),
            "\"Facilities\""
        );
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(VendorCategory::from_str("IT").unwrap(), VendorCategory::It);
        assert_eq!(
            VendorCategory::from_str("Logistics").unwrap(),
            VendorCategory::Logistics
        );
        assert!(VendorCategory::from_str("Hardware").is_err());
    }
}
