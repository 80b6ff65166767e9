//! JSON-lines scan log
//!
//! One scan record per line. Appends never rewrite earlier lines.

use std::cmp::Reverse;
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::core::models::ScanRecord;
use crate::core::ports::ScanHistory;

/// Scan history stored as newline-delimited JSON
#[derive(Debug, Clone)]
pub struct JsonlScanHistory {
    path: PathBuf,
}

impl JsonlScanHistory {
    /// Use the log file at `path` (created on first append)
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScanHistory for JsonlScanHistory {
    fn append(&self, scan: &ScanRecord) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(scan)?;
        line.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn list(&self, user_id: Option<&str>) -> anyhow::Result<Vec<ScanRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut scans: Vec<ScanRecord> = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match serde_json::from_str::<ScanRecord>(line) {
                Ok(scan) => Some(scan),
                Err(e) => {
                    log::warn!(
                        "Skipping unreadable scan record at {}:{}: {e}",
                        self.path.display(),
                        index + 1
                    );
                    None
                },
            })
            .filter(|scan| user_id.is_none_or(|id| scan.user_id.as_deref() == Some(id)))
            .collect();

        // Newest instant first; later lines win ties, unparseable timestamps last
        scans.reverse();
        scans.sort_by_cached_key(|scan| {
            Reverse(chrono::DateTime::parse_from_rfc3339(&scan.timestamp).ok())
        });
        Ok(scans)
    }
}
