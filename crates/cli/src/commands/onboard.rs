//! `foliochat onboard` — Write a default configuration file.

use foliochat_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("💬 FolioChat — First-Time Setup");
    println!("===============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("  Config file already exists: {}", config_path.display());
        println!("  Leaving it untouched.");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("✅ Created {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Set your API key: export OPENAI_API_KEY=sk-...");
    println!("  2. Drop your resume at static/resume.txt");
    println!("  3. Fill in [contact] and [profile] in the config");
    println!("  4. Run: foliochat serve");

    Ok(())
}
