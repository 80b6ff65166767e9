//! Scan history port
//!
//! Defines the interface for persisting finished scans. The verification
//! engine never calls this; callers record verdicts after the fact.

use super::super::models::ScanRecord;

/// Append-only log of past scans
pub trait ScanHistory: Send + Sync {
    /// Append a scan record
    fn append(&self, scan: &ScanRecord) -> anyhow::Result<()>;

    /// List scans, newest first, optionally only those of one user
    fn list(&self, user_id: Option<&str>) -> anyhow::Result<Vec<ScanRecord>>;
}
