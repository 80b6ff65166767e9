//! Knowledge service port
//!
//! Defines the interface for the external knowledge/reasoning capability
//! that performs the actual authoritative lookups.

use async_trait::async_trait;
use thiserror::Error;

/// A rendered instruction for the knowledge service
///
/// `prompt` carries the request and decision criteria; `schema` is the JSON
/// Schema the response is expected to conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Instruction text
    pub prompt: String,
    /// Expected output shape
    pub schema: serde_json::Value,
}

/// Failure signalled by a knowledge service
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// No credentials are available for the service
    #[error("knowledge service is not configured: {0}")]
    NotConfigured(String),

    /// The request could not be sent or the connection failed
    #[error("knowledge service request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("knowledge service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// The service's response envelope could not be read
    #[error("knowledge service response could not be read: {0}")]
    InvalidResponse(String),

    /// The service did not answer in time
    #[error("knowledge service timed out")]
    Timeout,
}

/// External knowledge/reasoning capability
///
/// Implementations return the raw text produced for an instruction. Shape
/// validation is the caller's job.
#[async_trait]
pub trait KnowledgeService: Send + Sync {
    /// Run the instruction and return the raw output text
    async fn generate(&self, instruction: &Instruction) -> Result<String, KnowledgeError>;

    /// Name used in logs (e.g. the model id)
    fn name(&self) -> &str;
}
