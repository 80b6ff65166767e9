//! File-based scan history
//!
//! Implements `ScanHistory` as an append-only JSON-lines file.

mod scan_log;

pub use scan_log::JsonlScanHistory;
