//! Identifier set and verification request
//!
//! An identifier set is whatever the user could read off the packaging.
//! A verification request is that set after normalization: every field is
//! either a trimmed, non-empty string or absent.

use serde::{Deserialize, Serialize};

/// Raw, caller-supplied identifiers for a drug package
///
/// Every field is optional and may contain stray whitespace or be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierSet {
    /// Name as printed on the packaging
    #[serde(default)]
    pub drug_name: Option<String>,

    /// National Drug Code, loosely formatted
    #[serde(default)]
    pub ndc: Option<String>,

    /// Global Trade Item Number from the barcode
    #[serde(default)]
    pub gtin: Option<String>,

    /// National regulatory registration number (e.g. a NAFDAC number)
    #[serde(default, alias = "nafdacNumber")]
    pub registration_number: Option<String>,
}

impl IdentifierSet {
    /// Identifier set carrying only a drug name
    #[must_use]
    pub fn named(drug_name: impl Into<String>) -> Self {
        Self {
            drug_name: Some(drug_name.into()),
            ..Self::default()
        }
    }
}

/// A normalized verification request
///
/// Constructed by [`crate::core::services::normalize`]; immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    drug_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ndc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gtin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    registration_number: Option<String>,
}

impl VerificationRequest {
    pub(crate) const fn from_parts(
        drug_name: Option<String>,
        ndc: Option<String>,
        gtin: Option<String>,
        registration_number: Option<String>,
    ) -> Self {
        Self {
            drug_name,
            ndc,
            gtin,
            registration_number,
        }
    }

    /// Drug name, if provided
    #[must_use]
    pub fn drug_name(&self) -> Option<&str> {
        self.drug_name.as_deref()
    }

    /// NDC, if provided
    #[must_use]
    pub fn ndc(&self) -> Option<&str> {
        self.ndc.as_deref()
    }

    /// GTIN, if provided
    #[must_use]
    pub fn gtin(&self) -> Option<&str> {
        self.gtin.as_deref()
    }

    /// Registration number, if provided
    #[must_use]
    pub fn registration_number(&self) -> Option<&str> {
        self.registration_number.as_deref()
    }

    /// True when no identifier at all was provided
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.drug_name.is_none()
            && self.ndc.is_none()
            && self.gtin.is_none()
            && self.registration_number.is_none()
    }
}
