//! Process-wide knowledge service handle
//!
//! The outbound client is built once and reused by every verification. The
//! first successful [`shared`] or [`install`] wins; later callers get the
//! same instance regardless of order.

use std::sync::{Arc, OnceLock};

use crate::adapters::gemini::GeminiClient;
use crate::config::KnowledgeConfig;
use crate::core::ports::{KnowledgeError, KnowledgeService};

static SERVICE: OnceLock<Arc<dyn KnowledgeService>> = OnceLock::new();

/// Returned by [`install`] when a service is already in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a knowledge service has already been initialized")]
pub struct AlreadyInitialized;

/// Install `service` as the process-wide knowledge service
pub fn install(service: Arc<dyn KnowledgeService>) -> Result<(), AlreadyInitialized> {
    SERVICE.set(service).map_err(|_| AlreadyInitialized)
}

/// The process-wide knowledge service, if initialized
#[must_use]
pub fn get() -> Option<Arc<dyn KnowledgeService>> {
    SERVICE.get().cloned()
}

/// The process-wide knowledge service, building a Gemini client on first use
///
/// If two threads race, both may build a client but only one is kept.
pub fn shared(config: &KnowledgeConfig) -> Result<Arc<dyn KnowledgeService>, KnowledgeError> {
    if let Some(service) = SERVICE.get() {
        return Ok(Arc::clone(service));
    }

    let client: Arc<dyn KnowledgeService> = Arc::new(GeminiClient::new(config.gemini_settings())?);
    log::debug!("Initialized knowledge service {}", client.name());
    Ok(Arc::clone(SERVICE.get_or_init(|| client)))
}
