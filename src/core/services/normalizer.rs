//! Query normalizer
//!
//! Turns a raw identifier set into a verification request. Absent, empty and
//! whitespace-only fields all become `None`.

use crate::core::models::{IdentifierSet, VerificationRequest};

/// Normalize a caller-supplied identifier set
///
/// Pure and infallible: any input, including an all-empty one, yields a
/// request.
#[must_use]
pub fn normalize(identifiers: IdentifierSet) -> VerificationRequest {
    VerificationRequest::from_parts(
        clean(identifiers.drug_name),
        clean(identifiers.ndc),
        clean(identifiers.gtin),
        clean(identifiers.registration_number),
    )
}

fn clean(field: Option<String>) -> Option<String> {
    let field = field?;
    let trimmed = field.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == field.len() {
        Some(field)
    } else {
        Some(trimmed.to_string())
    }
}
