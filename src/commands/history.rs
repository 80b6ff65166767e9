//! History command - list recorded scans

use rxverify::adapters::file::JsonlScanHistory;
use rxverify::config::Config;
use rxverify::core::ports::ScanHistory;
use rxverify::output::{HistoryResult, OutputMode};

/// List recorded scans, newest first
pub fn history(
    user: Option<&str>,
    limit: Option<usize>,
    config: &Config,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let store = JsonlScanHistory::new(config.history.path());

    let mut scans = store.list(user).unwrap_or_else(|e| {
        log::warn!("Failed to read scan history from {}: {e:#}", store.path().display());
        Vec::new()
    });
    if let Some(limit) = limit {
        scans.truncate(limit);
    }

    HistoryResult { scans }.render(mode);
    Ok(())
}
