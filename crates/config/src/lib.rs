//! Configuration loading, validation, and management for Faqline.
//!
//! Loads configuration from `~/.faqline/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.faqline/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the generation provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Generation provider for answers no FAQ covers
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model used for generated answers
    #[serde(default = "default_model")]
    pub model: String,

    /// Override for the provider API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Sampling temperature for generated answers
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Token budget applied when shaping generated answers
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Conversation history settings
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// FAQ catalog settings
    #[serde(default)]
    pub faq: FaqConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Audit trail configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_provider() -> String {
    "groq".into()
}
fn default_model() -> String {
    "llama-3.1-70b-versatile".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    200
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("conversation", &self.conversation)
            .field("faq", &self.faq)
            .field("gateway", &self.gateway)
            .field("audit", &self.audit)
            .finish()
    }
}

/// Conversation history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Maximum turns retained per request (most recent kept)
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,

    /// Optional system persona prepended to every conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,

    /// Keep the persona turn through truncation
    #[serde(default = "default_true")]
    pub pin_persona: bool,
}

fn default_max_turns() -> usize {
    512
}
fn default_true() -> bool {
    true
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            persona: None,
            pin_persona: true,
        }
    }
}

/// FAQ catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqConfig {
    /// Path to the `Question,Response` CSV file
    #[serde(default = "default_faq_path")]
    pub path: PathBuf,
}

fn default_faq_path() -> PathBuf {
    PathBuf::from("data/faqs.csv")
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            path: default_faq_path(),
        }
    }
}

/// Gateway (HTTP server) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    3000
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Audit trail settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Emit an audit record for every resolved request
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Spreadsheet-bridge webhook receiving audit rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,

    /// Bearer token sent with webhook deliveries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl std::fmt::Debug for AuditConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditConfig")
            .field("enabled", &self.enabled)
            .field("webhook_url", &self.webhook_url)
            .field("token", &redact(&self.token))
            .finish()
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            webhook_url: None,
            token: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.faqline/config.toml).
    ///
    /// Also checks environment variables for API keys:
    /// - `FAQLINE_API_KEY` (highest priority)
    /// - `GROQ_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = Self::config_dir();
        let config_path = config_dir.join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if config.api_key.is_none() {
            config.api_key = std::env::var("FAQLINE_API_KEY")
                .ok()
                .or_else(|| std::env::var("GROQ_API_KEY").ok());
        }

        // Allow env var to override the provider
        if let Ok(provider) = std::env::var("FAQLINE_PROVIDER") {
            config.provider = provider;
        }

        // Allow env var to override the model
        if let Ok(model) = std::env::var("FAQLINE_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Read and validate configuration from an explicit path.
    ///
    /// A missing file is not an error: the service runs fine on defaults
    /// plus environment variables.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: Self = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Directory holding `config.toml`, `~/.faqline` by convention.
    pub fn config_dir() -> PathBuf {
        home_dir().join(".faqline")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::Invalid(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::Invalid("max_tokens must be at least 1".into()));
        }

        if self.conversation.max_turns == 0 {
            return Err(ConfigError::Invalid(
                "conversation.max_turns must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: default_provider(),
            model: default_model(),
            api_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            conversation: ConversationConfig::default(),
            faq: FaqConfig::default(),
            gateway: GatewayConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

/// The user's home directory, falling back to the temp dir when unset.
fn home_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    let var = "USERPROFILE";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";

    std::env::var_os(var)
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("invalid TOML in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "groq");
        assert_eq!(config.model, "llama-3.1-70b-versatile");
        assert_eq!(config.conversation.max_turns, 512);
        assert!(config.conversation.pin_persona);
        assert_eq!(config.gateway.port, 3000);
        assert!(config.audit.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.provider, config.provider);
        assert_eq!(parsed.conversation.max_turns, config.conversation.max_turns);
        assert_eq!(parsed.gateway.port, config.gateway.port);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            temperature: 5.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_max_tokens_rejected() {
        let config = AppConfig {
            max_tokens: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_max_turns_rejected() {
        let mut config = AppConfig::default();
        config.conversation.max_turns = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.provider, "groq");
    }

    #[test]
    fn load_from_reads_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
provider = "openai"
model = "gpt-4o-mini"

[conversation]
max_turns = 64
persona = "You are a concise support assistant."

[audit]
webhook_url = "https://sheets.example.com/hook"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.conversation.max_turns, 64);
        assert_eq!(
            config.conversation.persona.as_deref(),
            Some("You are a concise support assistant.")
        );
        assert!(config.conversation.pin_persona);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(
            config.audit.webhook_url.as_deref(),
            Some("https://sheets.example.com/hook")
        );
    }

    #[test]
    fn parse_error_on_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "provider = [broken").unwrap();

        let result = AppConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("groq"));
        assert!(toml_str.contains("llama-3.1-70b-versatile"));
        assert!(toml_str.contains("512"));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = AppConfig {
            api_key: Some("gsk_secret_key".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("gsk_secret_key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
