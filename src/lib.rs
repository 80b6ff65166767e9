//! rxverify - Counterfeit and recall screening for drug packages
//!
//! This library turns whatever identifiers are legible on a drug package
//! (name, NDC, GTIN, registration number) into a suspect / not-suspect
//! verdict by consulting an external knowledge service, and falls back to
//! "suspect" whenever that lookup cannot be completed.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod knowledge;
pub mod output;
pub mod paths;
