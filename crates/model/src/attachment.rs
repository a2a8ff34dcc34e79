//! File attachment metadata

use serde::{Deserialize, Serialize};

/// Metadata for an uploaded file (the bytes themselves live elsewhere)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub url: String,
}
