//! Verification verdict
//!
//! The verdict is the single answer handed back to the caller. `is_suspect`
//! is true whenever the package could not be corroborated.

use serde::{Deserialize, Serialize};

/// Placeholder shown in place of enrichment data the engine could not obtain
pub const PLACEHOLDER: &str = "N/A";

/// Reason attached to every fail-safe verdict
pub const FAIL_SAFE_REASON: &str = "The automated verification could not be completed: the \
     knowledge service failed to process the request or returned an invalid response. Treat \
     this package as suspect, retry the check, or escalate for manual review. This attempt has \
     been logged.";

/// Final verdict for one verification request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationVerdict {
    /// True means "flag for human review"
    pub is_suspect: bool,

    /// Human-readable justification, never empty
    pub reason: String,

    /// Identified drug name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drug_name: Option<String>,

    /// Identified manufacturer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    /// Approval details (regulator, registration, dates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_info: Option<String>,
}

impl VerificationVerdict {
    /// The verdict returned whenever the lookup could not be completed
    ///
    /// Echoes the caller's drug name so there is something to display.
    #[must_use]
    pub fn fail_safe(drug_name: Option<&str>) -> Self {
        Self {
            is_suspect: true,
            reason: FAIL_SAFE_REASON.to_string(),
            drug_name: Some(drug_name.unwrap_or(PLACEHOLDER).to_string()),
            manufacturer: Some(PLACEHOLDER.to_string()),
            approval_info: Some(PLACEHOLDER.to_string()),
        }
    }

    /// JSON Schema handed to the knowledge service as the expected output shape
    #[must_use]
    pub fn json_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "isSuspect": {
                    "type": "boolean",
                    "description": "Whether the drug is suspected to be counterfeit, recalled, or otherwise problematic."
                },
                "reason": {
                    "type": "string",
                    "description": "A detailed explanation for the verdict, including the drug's identity if found."
                },
                "drugName": {
                    "type": "string",
                    "description": "The identified name of the drug."
                },
                "manufacturer": {
                    "type": "string",
                    "description": "The identified manufacturer of the drug."
                },
                "approvalInfo": {
                    "type": "string",
                    "description": "Approval information, including dates and regulatory bodies."
                }
            },
            "required": ["isSuspect", "reason"]
        })
    }
}

/// Why a verification ended in the fail-safe verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Failure {
    /// The service call itself failed
    Transport,
    /// The deadline expired before the service answered
    Timeout,
    /// The service answered with something that is not a valid verdict
    Schema,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Timeout => write!(f, "timeout"),
            Self::Schema => write!(f, "schema"),
        }
    }
}

/// Terminal state of a verification call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "failure")]
pub enum Resolution {
    /// The service corroborated the package
    Corroborated,
    /// The service flagged the package
    Flagged,
    /// The lookup failed and the fail-safe verdict was used
    FailSafe(Failure),
}

impl Resolution {
    /// True if the verdict came from the fail-safe path
    #[must_use]
    pub const fn is_fail_safe(self) -> bool {
        matches!(self, Self::FailSafe(_))
    }
}

/// A verdict together with how it was reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
    /// The verdict
    pub verdict: VerificationVerdict,
    /// How the orchestrator terminated
    pub resolution: Resolution,
}

impl Verification {
    /// Wrap a decoded service verdict
    #[must_use]
    pub const fn resolved(verdict: VerificationVerdict) -> Self {
        let resolution = if verdict.is_suspect {
            Resolution::Flagged
        } else {
            Resolution::Corroborated
        };
        Self {
            verdict,
            resolution,
        }
    }

    /// Build the fail-safe outcome for a failure class
    #[must_use]
    pub fn fail_safe(failure: Failure, drug_name: Option<&str>) -> Self {
        Self {
            verdict: VerificationVerdict::fail_safe(drug_name),
            resolution: Resolution::FailSafe(failure),
        }
    }
}
