//! `faqline init` — First-time setup.

use faqline_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("💬 Faqline — First-Time Setup");
    println!("=============================\n");

    // Create the config directory
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    // Create a starter FAQ catalog in the current directory
    let default_config = AppConfig::default();
    let faq_path = &default_config.faq.path;
    if !faq_path.exists() {
        if let Some(parent) = faq_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(
            faq_path,
            concat!(
                "Question,Response\n",
                "What is NAFDAC?,NAFDAC is the National Agency for Food and Drug ",
                "Administration and Control. It regulates food and drug products in Nigeria.\n",
                "How do I register a new drug product?,Submit a registration application ",
                "with product samples and supporting documents to the drug registration directorate.\n",
            ),
        )?;
        println!("✅ Created starter FAQ catalog: {}", faq_path.display());
    } else {
        println!("  FAQ catalog exists: {}", faq_path.display());
    }

    // Create the config file
    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run init.\n");
    } else {
        let default_toml = AppConfig::default_toml();
        std::fs::write(&config_path, &default_toml)?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Edit {} and add your API key", config_path.display());
        println!("   2. Add your FAQ rows to {}", faq_path.display());
        println!("   3. Run: faqline ask \"What is NAFDAC?\"\n");
    }

    println!("🎉 Setup complete! Run `faqline serve` to start the HTTP gateway.\n");

    Ok(())
}
