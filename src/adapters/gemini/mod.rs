//! Gemini knowledge service adapter
//!
//! Implements `KnowledgeService` over the Gemini REST API, optionally
//! grounded with Google Search.

mod client;
mod wire;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, GeminiSettings};
