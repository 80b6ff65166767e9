//! Business logic services
//!
//! The verification pipeline, in call order:
//!
//! - [`normalizer`] - Identifier set to verification request
//! - [`instruction`] - Request to knowledge-service instruction
//! - [`decoder`] - Raw service output to validated verdict
//! - [`verifier`] - Orchestration and the fail-safe policy

pub mod decoder;
pub mod instruction;
pub mod normalizer;
pub mod verifier;

pub use decoder::{DecodeError, decode_verdict};
pub use instruction::{DEFAULT_REGULATOR, render_instruction};
pub use normalizer::normalize;
pub use verifier::{DEFAULT_DEADLINE, Verifier};
