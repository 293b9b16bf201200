//! `foliochat usage` — Print the recorded analytics summary.

use foliochat_analytics::UsageTracker;
use foliochat_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let tracker = UsageTracker::new(&config.analytics.log_dir);

    let summary = tracker.summary()?;

    println!("📊 Usage Summary");
    println!("─────────────────────────────────────");
    if summary.is_empty() {
        println!("  No usage recorded yet.");
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);

    let conversations = tracker.recent_conversations()?;
    println!();
    println!("  Recent conversations logged: {}", conversations.len());

    Ok(())
}
