//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `gemini/` - Knowledge service backed by the Gemini `generateContent` API
//! - `file/` - JSON-lines scan history

pub mod file;
pub mod gemini;
