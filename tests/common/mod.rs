//! Common test utilities shared across test types
//!
//! - `fake_gemini.rs` - Local stand-in for the Gemini `generateContent` API
