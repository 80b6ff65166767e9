//! Verify command - check a drug package and record the scan

use std::fs;
use std::io::Read as _;
use std::path::Path;

use anyhow::Context as _;

use rxverify::adapters::file::JsonlScanHistory;
use rxverify::config::Config;
use rxverify::core::models::{IdentifierSet, ScanRecord, VerificationRequest};
use rxverify::core::ports::ScanHistory;
use rxverify::core::services::{Verifier, normalize};
use rxverify::knowledge;
use rxverify::output::{OutputMode, VerifyResult};

use crate::cli::VerifyArgs;

/// Verify a package; exits with status 1 when it is suspect
pub fn verify(args: VerifyArgs, config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    let mut identifiers = match &args.request {
        Some(path) => read_identifiers(path)?,
        None => IdentifierSet::default(),
    };
    merge(&mut identifiers, args.name, args.ndc, args.gtin, args.registration_number);

    let request = normalize(identifiers);
    if request.is_empty() {
        log::warn!("No identifiers provided; the package cannot be corroborated");
    }

    let service = knowledge::shared(&config.knowledge)?;
    let verifier = Verifier::new(service)
        .with_regulator(config.knowledge.regulator.clone())
        .with_deadline(config.knowledge.timeout());

    let runtime = tokio::runtime::Runtime::new()?;
    let verification = runtime.block_on(verifier.verify_detailed(&request));

    let scan_id = if args.no_record || !config.history.enabled {
        None
    } else {
        let barcode = args.barcode.unwrap_or_else(|| primary_identifier(&request));
        let user = args.user.or_else(|| config.user.id.clone());
        let scan = ScanRecord::from_verification(&verification, barcode, user);
        let history = JsonlScanHistory::new(config.history.path());
        match history.append(&scan) {
            Ok(()) => Some(scan.id),
            Err(e) => {
                // The verdict still stands even if it could not be recorded
                log::error!("Could not save scan to {}: {e:#}", history.path().display());
                None
            },
        }
    };

    let is_suspect = verification.verdict.is_suspect;
    let result = VerifyResult {
        verdict: verification.verdict,
        resolution: verification.resolution,
        scan_id,
    };
    result.render(mode);

    if is_suspect {
        std::process::exit(1);
    }
    Ok(())
}

fn read_identifiers(path: &Path) -> anyhow::Result<IdentifierSet> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read request from {}", path.display()))?
    };
    serde_json::from_str(&content).context("request is not a valid identifier set")
}

fn merge(
    identifiers: &mut IdentifierSet,
    name: Option<String>,
    ndc: Option<String>,
    gtin: Option<String>,
    registration_number: Option<String>,
) {
    if name.is_some() {
        identifiers.drug_name = name;
    }
    if ndc.is_some() {
        identifiers.ndc = ndc;
    }
    if gtin.is_some() {
        identifiers.gtin = gtin;
    }
    if registration_number.is_some() {
        identifiers.registration_number = registration_number;
    }
}

/// Identifier a scan is filed under when no barcode was given
fn primary_identifier(request: &VerificationRequest) -> String {
    request
        .gtin()
        .or_else(|| request.ndc())
        .or_else(|| request.registration_number())
        .or_else(|| request.drug_name())
        .unwrap_or("unknown")
        .to_string()
}
