//! Verdict decoder
//!
//! Validates the knowledge service's untyped output against the verdict
//! schema. Nothing the service returns is trusted until it passes here.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::models::VerificationVerdict;

/// Why a service response is not a valid verdict
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Nothing but whitespace (or an empty code fence)
    #[error("response is empty")]
    Empty,

    /// Not parseable as JSON
    #[error("response is not valid JSON: {0}")]
    Malformed(String),

    /// Valid JSON, but not an object
    #[error("response is not a JSON object")]
    NotAnObject,

    /// A required field is absent
    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),

    /// A field has the wrong JSON type
    #[error("field `{field}` should be a {expected}")]
    WrongType {
        /// Field name
        field: &'static str,
        /// Expected JSON type
        expected: &'static str,
    },

    /// `reason` is present but blank
    #[error("field `reason` is blank")]
    BlankReason,
}

/// Decode raw service output into a verdict
///
/// Accepts a bare JSON object, optionally wrapped in a Markdown code fence.
pub fn decode_verdict(raw: &str) -> Result<VerificationVerdict, DecodeError> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Err(DecodeError::Empty);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    let Value::Object(object) = value else {
        return Err(DecodeError::NotAnObject);
    };

    let is_suspect = match object.get("isSuspect") {
        None | Some(Value::Null) => return Err(DecodeError::MissingField("isSuspect")),
        Some(Value::Bool(flag)) => *flag,
        Some(_) => {
            return Err(DecodeError::WrongType {
                field: "isSuspect",
                expected: "boolean",
            });
        },
    };

    let reason = match object.get("reason") {
        None | Some(Value::Null) => return Err(DecodeError::MissingField("reason")),
        Some(Value::String(reason)) if reason.trim().is_empty() => {
            return Err(DecodeError::BlankReason);
        },
        Some(Value::String(reason)) => reason.clone(),
        Some(_) => {
            return Err(DecodeError::WrongType {
                field: "reason",
                expected: "string",
            });
        },
    };

    Ok(VerificationVerdict {
        is_suspect,
        reason,
        drug_name: optional_string(&object, "drugName")?,
        manufacturer: optional_string(&object, "manufacturer")?,
        approval_info: optional_string(&object, "approvalInfo")?,
    })
}

fn optional_string(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, DecodeError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DecodeError::WrongType {
            field,
            expected: "string",
        }),
    }
}

/// Strip a surrounding ```` ``` ```` or ```` ```json ```` fence, if any
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // The info string runs to the end of the opening line
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest.trim_start_matches("json"),
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
