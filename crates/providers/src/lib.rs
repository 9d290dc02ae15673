//! Generation backends for faqline.
//!
//! All backends implement the `faqline_core::Generator` trait. Which one the
//! service talks to is pure configuration; the resolution pipeline never
//! knows the difference.

use std::sync::Arc;

use faqline_config::AppConfig;
use faqline_core::Generator;

pub mod openai_compat;

pub use openai_compat::OpenAiCompatGenerator;

/// Build the configured generation backend.
///
/// Every supported backend speaks the OpenAI chat-completions dialect; the
/// provider name selects a base URL unless the config overrides it.
pub fn build_from_config(config: &AppConfig) -> Arc<dyn Generator> {
    let api_key = config.api_key.clone().unwrap_or_default();
    let base_url = config
        .api_url
        .clone()
        .unwrap_or_else(|| default_base_url(&config.provider));

    Arc::new(
        OpenAiCompatGenerator::new(&config.provider, base_url, api_key)
            .with_model(&config.model),
    )
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "groq" => "https://api.groq.com/openai/v1".into(),
        "openai" => "https://api.openai.com/v1".into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}
