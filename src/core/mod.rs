//! Core domain logic for rxverify
//!
//! This module contains the verification logic with no concrete I/O.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (requests, verdicts, scan records)
//! - `services/` - Normalization, instruction rendering, decoding, orchestration
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
