use tracing::{info, warn};

use flood_admin_client::{ApiClient, ApiConfig, ApiHealth, DashboardSnapshot, load_dashboard};
use flood_admin_core::StatusTally;

const BAR_WIDTH: usize = 30;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flood_admin=debug,flood_admin_client=debug".into()),
        )
        .init();

    // Config
    let config = ApiConfig::from_env()?;
    info!("Using admin API at {}", config.base_url);
    let client = ApiClient::new(config)?;

    let health = client.health().await;
    info!("API status: {}", health);
    if health == ApiHealth::Offline {
        warn!("API root did not answer, dashboard will likely fail to load");
    }

    match load_dashboard(&client).await {
        Ok(snapshot) => print!("{}", render(&snapshot)),
        Err(e) => {
            warn!(kind = %e.kind(), "Dashboard load failed: {}", e);
            eprintln!("Could not load the dashboard. Run again to retry.");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn render(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::from("Dashboard\n");
    for (title, value) in snapshot.cards() {
        out.push_str(&format!("  {:<14} {:>6}\n", title, value));
    }
    out.push_str(&format!("  {:<14} {:>6}\n", "Pending review", snapshot.pending_reviews));
    out.push_str("\nFeedback by status\n");
    out.push_str(&render_chart(&snapshot.feedback_status));
    out
}

/// Horizontal bar chart, scaled so the largest bar is `BAR_WIDTH` wide.
fn render_chart(tally: &StatusTally) -> String {
    if tally.is_empty() {
        return "  (no feedback)\n".to_string();
    }
    let max = tally.iter().map(|(_, n)| n).max().unwrap_or(1).max(1);
    let width = tally.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    tally
        .iter()
        .map(|(label, count)| {
            let bar = "#".repeat((count * BAR_WIDTH).div_ceil(max));
            format!("  {:<width$} {:>5} {}\n", label, count, bar, width = width)
        })
        .collect()
}
