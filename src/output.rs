//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{Resolution, ScanRecord, ScanStatus, VerificationVerdict};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of a verify operation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResult {
    /// The verdict
    pub verdict: VerificationVerdict,
    /// How the verdict was reached
    pub resolution: Resolution,
    /// Id of the recorded scan, if one was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_id: Option<String>,
}

/// Result of a history listing
#[derive(Debug, Serialize)]
pub struct HistoryResult {
    /// Scans, newest first
    pub scans: Vec<ScanRecord>,
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl VerifyResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    /// Headline shown in human mode
    #[must_use]
    pub const fn headline(&self) -> &'static str {
        match self.resolution {
            Resolution::Corroborated => "NOT SUSPECT",
            Resolution::Flagged => "SUSPECT",
            Resolution::FailSafe(_) => "SUSPECT (check incomplete)",
        }
    }

    fn render_human(&self) {
        let headline = if self.verdict.is_suspect {
            self.headline().red().bold()
        } else {
            self.headline().green().bold()
        };
        println!("{headline}\n");

        let v = &self.verdict;
        println!("  Drug:         {}", v.drug_name.as_deref().unwrap_or("-"));
        println!("  Manufacturer: {}", v.manufacturer.as_deref().unwrap_or("-"));
        println!("  Approval:     {}", v.approval_info.as_deref().unwrap_or("-"));
        println!("\n  {}", v.reason);

        if v.is_suspect {
            println!("\nFlag this package for review by a pharmacist before dispensing.");
        }
        if let Some(id) = &self.scan_id {
            println!("\nRecorded as scan {id}");
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl HistoryResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.scans.is_empty() {
            println!("No scans recorded.");
            return;
        }

        println!("Scans:\n");
        for scan in &self.scans {
            let status = match scan.status {
                ScanStatus::Verified => scan.status.to_string().green(),
                ScanStatus::Suspect => scan.status.to_string().red(),
                ScanStatus::Unknown => scan.status.to_string().yellow(),
            };
            println!("  [{status}] {} {}", scan.timestamp, scan.barcode);
            println!(
                "  {} / {}",
                scan.drug_name.as_deref().unwrap_or("unknown drug"),
                scan.manufacturer.as_deref().unwrap_or("unknown manufacturer")
            );
            if let Some(user) = &scan.user_id {
                println!("  by {user}");
            }
            println!();
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
