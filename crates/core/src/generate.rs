//! Generator trait — the abstraction over the fallback language model.
//!
//! When neither FAQ tier answers, the pipeline hands the bounded conversation
//! to a Generator and gets plain text back. The core never inspects provider
//! metadata; which backend runs is pure configuration.
//!
//! Implementations: OpenAI-compatible endpoints (Groq, OpenAI, OpenRouter,
//! Ollama) in the providers crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::turn::Turn;

/// Everything a generation backend needs for one completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The bounded conversation, persona turn first when one is configured
    pub turns: Vec<Turn>,

    /// Token budget for the completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature (0.0 = deterministic)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_tokens() -> u32 {
    200
}

fn default_temperature() -> f32 {
    0.7
}

impl GenerationRequest {
    /// Build a request with the default token budget and temperature.
    pub fn new(turns: Vec<Turn>) -> Self {
        Self {
            turns,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// The generation collaborator.
///
/// A single request-response call; no streaming, no retries. Failures are
/// surfaced to the caller as-is and the pipeline does not fall back further.
#[async_trait]
pub trait Generator: Send + Sync {
    /// A human-readable name for this backend (e.g., "groq", "openai").
    fn name(&self) -> &str;

    /// Run one completion and return the generated text.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<String, GenerationError>;
}
