use anyhow::Context;
use chrono::Local;
use tracing::info;
use tracing_subscriber::EnvFilter;

use church_dashboard::{AppConfig, Backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; `log` records from the library are picked up too
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!("Using data directory {:?}", config.data_directory);

    let backend = Backend::open(config)?;
    let today = Local::now().date_naive();

    if let Some(user) = backend.auth.current_user() {
        info!("Signed in as {} ({})", user.name, user.email);
    }

    let dashboard = backend.dashboard.summary(today);
    let report = backend.dashboard.report_summary(today);

    println!(
        "{}",
        serde_json::to_string_pretty(&dashboard).context("Failed to render dashboard summary")?
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to render report summary")?
    );

    Ok(())
}
