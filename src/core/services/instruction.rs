//! Instruction rendering
//!
//! Builds the text and output schema sent to the knowledge service. Every
//! identifier is listed, with "not provided" standing in for absent ones.

use std::fmt::Write as _;

use crate::core::models::{VerificationRequest, VerificationVerdict};
use crate::core::ports::Instruction;

/// Regulator named in instructions when none is configured
pub const DEFAULT_REGULATOR: &str = "NAFDAC";

const NOT_PROVIDED: &str = "not provided";

/// Render a request into an instruction for the knowledge service
///
/// `regulator` is the national drug regulator whose registry should be
/// consulted first.
#[must_use]
pub fn render_instruction(request: &VerificationRequest, regulator: &str) -> Instruction {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str(
        "You are a pharmaceutical verification specialist. Your task is to analyze the \
         provided drug package identifiers and determine whether they correspond to a \
         legitimate, currently approved product.\n\n",
    );

    prompt.push_str("## Process\n");
    let _ = writeln!(
        prompt,
        "1. Review the identifiers below. Any of them may be missing or partially legible."
    );
    let _ = writeln!(
        prompt,
        "2. Consult authoritative sources before concluding: the national drug regulator \
         ({regulator}), an international regulator such as the FDA, and recognized \
         pharmaceutical reference databases such as DailyMed and Drugs.com."
    );
    let _ = writeln!(
        prompt,
        "3. Identify the drug, its manufacturer and its approval status."
    );
    let _ = writeln!(prompt, "4. Form a verdict:");
    let _ = writeln!(
        prompt,
        "   - If consistent, verifiable information is found across authoritative sources, \
         set isSuspect to false and fill in drugName, manufacturer and approvalInfo."
    );
    let _ = writeln!(
        prompt,
        "   - If no information can be found, or the information conflicts (for example a \
         registration number that belongs to a different product than the named drug), you \
         MUST set isSuspect to true and explain the discrepancy in reason."
    );
    let _ = writeln!(
        prompt,
        "5. Respond with a single JSON object with the fields isSuspect (boolean), reason \
         (string, required), and optionally drugName, manufacturer and approvalInfo \
         (strings). Do not add any text outside the JSON object.\n"
    );

    prompt.push_str("## Package identifiers\n");
    field(&mut prompt, "Drug Name", request.drug_name());
    field(&mut prompt, "NDC Number", request.ndc());
    field(&mut prompt, "GTIN Number (from barcode)", request.gtin());
    field(
        &mut prompt,
        &format!("{regulator} Registration Number"),
        request.registration_number(),
    );

    if request.is_empty() {
        prompt.push_str(
            "\nNo identifiers were provided. The package cannot be corroborated and must be \
             flagged as suspect.\n",
        );
    }

    log::debug!("Rendered verification instruction ({} bytes)", prompt.len());

    Instruction {
        prompt,
        schema: VerificationVerdict::json_schema(),
    }
}

fn field(prompt: &mut String, label: &str, value: Option<&str>) {
    let _ = writeln!(prompt, "- {label}: {}", value.unwrap_or(NOT_PROVIDED));
}
