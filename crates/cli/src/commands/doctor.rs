//! `foliochat doctor` — Diagnose configuration health.

use foliochat_config::AppConfig;
use std::path::Path;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 FolioChat Doctor — Diagnostics");
    println!("=================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    let config = if config_path.exists() {
        match AppConfig::load() {
            Ok(config) => {
                println!("  ✅ Config file valid");
                Some(config)
            }
            Err(e) => {
                println!("  ❌ Config file invalid: {e}");
                issues += 1;
                None
            }
        }
    } else {
        println!("  ⚠️  No config file — run `foliochat onboard` (defaults + env vars apply)");
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        Some(config)
    };

    if let Some(config) = config {
        if config.has_api_key() {
            println!("  ✅ API key configured");
        } else {
            println!("  ⚠️  No API key — chat will answer with the unavailable message");
            issues += 1;
        }

        if Path::new(&config.identity.context_file).exists() {
            println!("  ✅ Persona context file present");
        } else {
            println!(
                "  ⚠️  Context file missing at {} — persona falls back to a one-liner",
                config.identity.context_file
            );
            issues += 1;
        }

        match std::fs::create_dir_all(&config.analytics.log_dir) {
            Ok(()) => println!("  ✅ Analytics log directory writable"),
            Err(e) => {
                println!("  ❌ Cannot create log directory: {e}");
                issues += 1;
            }
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
