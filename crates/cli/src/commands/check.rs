//! `faqline check` — Diagnose configuration and catalog health.

use faqline_catalog::CsvCatalog;
use faqline_config::AppConfig;
use faqline_core::catalog::FaqSource;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Faqline Check — Service Diagnostics");
    println!("======================================\n");

    let mut issues = 0;

    println!("  ✅ Rust binary running");

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        match AppConfig::load() {
            Ok(config) => {
                println!("  ✅ Config file valid");

                // Check API key
                if config.has_api_key() {
                    println!("  ✅ API key configured");
                } else {
                    println!("  ⚠️  No API key configured — add api_key to config.toml");
                    issues += 1;
                }
            }
            Err(e) => {
                println!("  ❌ Config file invalid: {e}");
                issues += 1;
            }
        }
    } else {
        println!("  ❌ No config file — run `faqline init`");
        issues += 1;
    }

    // Check the FAQ catalog
    let config = AppConfig::load().unwrap_or_default();
    let catalog = CsvCatalog::new(config.faq.path.clone());
    match catalog.load().await {
        Ok(faqs) if faqs.is_empty() => {
            println!(
                "  ⚠️  FAQ catalog is empty: {}",
                config.faq.path.display()
            );
            issues += 1;
        }
        Ok(faqs) => {
            println!("  ✅ FAQ catalog loads ({} entries)", faqs.len());
        }
        Err(e) => {
            println!("  ❌ FAQ catalog unreadable: {e}");
            issues += 1;
        }
    }

    // Where audit rows end up
    let sink = faqline_audit::build_from_config(&config);
    println!("  Audit sink: {}", sink.name());

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
