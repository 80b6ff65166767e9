//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the verification logic
//! and external systems (the knowledge service, scan persistence).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core domain logic depends only on these traits, never on concrete
//! implementations, so tests can substitute scripted services.

mod knowledge;
mod scan_history;

pub use knowledge::{Instruction, KnowledgeError, KnowledgeService};
pub use scan_history::ScanHistory;
