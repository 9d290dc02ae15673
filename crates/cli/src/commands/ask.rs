//! `faqline ask` — One-shot question answering from the terminal.

use std::sync::Arc;

use faqline_catalog::CsvCatalog;
use faqline_config::AppConfig;
use faqline_core::audit::RequestCounter;
use faqline_core::catalog::FaqSource;
use faqline_core::resolution::AnswerSource;
use faqline_resolve::{ResolutionPipeline, ResolveRequest};

pub async fn run(message: String) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Warn about a missing API key early. Catalog matches still work
    // without one; the generative fallback does not.
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  WARNING: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    export GROQ_API_KEY='gsk_...'    (recommended)");
        eprintln!("    export FAQLINE_API_KEY='...'     (generic)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        eprintln!("  Get a Groq key at: https://console.groq.com/keys");
        eprintln!();
    }

    let generator = faqline_providers::build_from_config(&config);
    let audit = faqline_audit::build_from_config(&config);
    let counter = Arc::new(RequestCounter::new());
    let catalog = CsvCatalog::new(config.faq.path.clone());

    let mut pipeline = ResolutionPipeline::new(generator, audit, counter)
        .with_max_turns(config.conversation.max_turns)
        .with_pin_persona(config.conversation.pin_persona)
        .with_max_tokens(config.max_tokens)
        .with_temperature(config.temperature);
    if let Some(persona) = &config.conversation.persona {
        pipeline = pipeline.with_persona(persona);
    }

    let faqs = catalog.load().await?;

    eprint!("  Thinking...");
    let resolution = pipeline.resolve(ResolveRequest::new(message), &faqs).await?;
    eprint!("\r              \r");

    println!("{}", resolution.answer);
    if resolution.source != AnswerSource::Generated {
        eprintln!();
        eprintln!("  (answered from the FAQ catalog)");
    }

    Ok(())
}
