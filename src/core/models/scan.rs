//! Scan history record
//!
//! A scan record is what a caller persists after a verification: the verdict
//! plus who scanned what, and when. The engine itself never writes these.

use serde::{Deserialize, Serialize};

use super::verdict::{PLACEHOLDER, Resolution, Verification};

/// Display status of a recorded scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStatus {
    /// Corroborated by authoritative sources
    Verified,
    /// Flagged by the lookup
    Suspect,
    /// The lookup could not be completed
    Unknown,
}

impl From<Resolution> for ScanStatus {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Corroborated => Self::Verified,
            Resolution::Flagged => Self::Suspect,
            Resolution::FailSafe(_) => Self::Unknown,
        }
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verified => write!(f, "Verified"),
            Self::Suspect => write!(f, "Suspect"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A persisted scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    /// Unique identifier
    pub id: String,

    /// Acting user, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Barcode or primary identifier that was scanned
    pub barcode: String,

    /// Identified drug name
    pub drug_name: Option<String>,

    /// Identified manufacturer
    pub manufacturer: Option<String>,

    /// Display status
    pub status: ScanStatus,

    /// When the scan was recorded (RFC 3339)
    pub timestamp: String,

    /// Mirrors the verdict's suspect flag
    pub is_flagged: bool,

    /// Verdict justification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ScanRecord {
    /// Build a record from a finished verification
    #[must_use]
    pub fn from_verification(
        verification: &Verification,
        barcode: impl Into<String>,
        user_id: Option<String>,
    ) -> Self {
        let verdict = &verification.verdict;
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            barcode: barcode.into(),
            drug_name: known(verdict.drug_name.as_deref()),
            manufacturer: known(verdict.manufacturer.as_deref()),
            status: verification.resolution.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            is_flagged: verdict.is_suspect,
            reason: Some(verdict.reason.clone()),
        }
    }
}

fn known(value: Option<&str>) -> Option<String> {
    value.filter(|v| *v != PLACEHOLDER).map(String::from)
}
