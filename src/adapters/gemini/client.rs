//! Gemini HTTP client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::core::ports::{Instruction, KnowledgeError, KnowledgeService};

use super::wire::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, GoogleSearch,
    Part, Tool, to_gemini_schema,
};

/// Public Gemini API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const MAX_ERROR_BODY: usize = 512;

/// Settings for [`GeminiClient`]
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// API key; calls fail with `NotConfigured` when absent
    pub api_key: Option<String>,
    /// Model id, e.g. `gemini-2.0-flash`
    pub model: String,
    /// API root, without trailing `/models`
    pub base_url: String,
    /// Attach the Google Search grounding tool
    pub search_grounding: bool,
    /// HTTP timeout for one request
    pub timeout: Duration,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            search_grounding: true,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Knowledge service backed by Gemini `generateContent`
pub struct GeminiClient {
    settings: GeminiSettings,
    client: Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.settings.model)
            .field("base_url", &self.settings.base_url)
            .field("search_grounding", &self.settings.search_grounding)
            .field("api_key", &self.settings.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client; no request is made until [`KnowledgeService::generate`]
    pub fn new(settings: GeminiSettings) -> Result<Self, KnowledgeError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| KnowledgeError::Transport(e.to_string()))?;

        Ok(Self { settings, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn build_request(&self, instruction: &Instruction) -> GenerateContentRequest {
        // Grounding and a response schema cannot be combined; with grounding on,
        // the prompt alone carries the output shape.
        let (tools, generation_config) = if self.settings.search_grounding {
            (
                vec![Tool {
                    google_search: GoogleSearch {},
                }],
                GenerationConfig {
                    temperature: 0.0,
                    response_mime_type: None,
                    response_schema: None,
                },
            )
        } else {
            (
                Vec::new(),
                GenerationConfig {
                    temperature: 0.0,
                    response_mime_type: Some("application/json".to_string()),
                    response_schema: Some(to_gemini_schema(&instruction.schema)),
                },
            )
        };

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(instruction.prompt.clone()),
                }],
            }],
            tools,
            generation_config,
        }
    }
}

fn transport_error(e: &reqwest::Error) -> KnowledgeError {
    if e.is_timeout() {
        KnowledgeError::Timeout
    } else {
        KnowledgeError::Transport(e.to_string())
    }
}

#[async_trait]
impl KnowledgeService for GeminiClient {
    async fn generate(&self, instruction: &Instruction) -> Result<String, KnowledgeError> {
        let api_key = self.settings.api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(
            || KnowledgeError::NotConfigured("no Gemini API key available".to_string()),
        )?;

        let body = self.build_request(instruction);
        log::debug!(
            "POST {} (model {}, grounding {})",
            self.endpoint(),
            self.settings.model,
            self.settings.search_grounding
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(KnowledgeError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                KnowledgeError::Timeout
            } else {
                KnowledgeError::InvalidResponse(e.to_string())
            }
        })?;

        if let Some(reason) = parsed.block_reason() {
            return Err(KnowledgeError::InvalidResponse(format!("prompt blocked: {reason}")));
        }
        if let Some(reason) = parsed.finish_reason() {
            log::debug!("Gemini finish reason: {reason}");
        }

        Ok(parsed.text())
    }

    fn name(&self) -> &str {
        &self.settings.model
    }
}
