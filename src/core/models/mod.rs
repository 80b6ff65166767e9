//! Domain models for rxverify
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`IdentifierSet`] - "This is what I can read on the box"
//! - [`VerificationRequest`] - The normalized form of an identifier set
//! - [`VerificationVerdict`] - "Suspect or not, and why"
//! - [`Verification`] - A verdict plus how it was reached
//! - [`ScanRecord`] - What a caller persists after a scan

mod request;
mod scan;
mod verdict;

pub use request::{IdentifierSet, VerificationRequest};
pub use scan::{ScanRecord, ScanStatus};
pub use verdict::{
    FAIL_SAFE_REASON, Failure, PLACEHOLDER, Resolution, Verification, VerificationVerdict,
};
