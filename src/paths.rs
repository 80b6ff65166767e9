//! Centralized path definitions for rxverify
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.rxverify/
//! ├── config.toml               # Knowledge service, history, user settings
//! └── scans.jsonl               # Scan history (one JSON record per line)
//! ```

use std::path::PathBuf;

/// Global directory name
const GLOBAL_DIR: &str = ".rxverify";

/// Global config filename
const CONFIG_FILE: &str = "config.toml";

/// Scan history filename
const SCAN_HISTORY_FILE: &str = "scans.jsonl";

/// Get the global rxverify directory.
///
/// Returns `~/.rxverify/`.
#[must_use]
pub fn global_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.rxverify/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_dir().join(CONFIG_FILE)
}

/// Get the default scan history path.
///
/// Returns `~/.rxverify/scans.jsonl`.
#[must_use]
pub fn scan_history() -> PathBuf {
    global_dir().join(SCAN_HISTORY_FILE)
}
