// Expense Tracker - Web Server
// Loads configuration from the environment, sets up logging and serves the API.

use anyhow::{Context, Result};
use expense_tracker::api::{router, AppState};
use expense_tracker::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,expense_tracker=debug,tower_http=info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(config.server.log_json);

    info!("Expense Tracker v{} starting", expense_tracker::VERSION);
    info!(
        income = config.categories.income.len(),
        expense = config.categories.expense.len(),
        catalog = config.categories.catalog.len(),
        "category allow-lists loaded"
    );

    let app = router(AppState::new(config.categories.clone()));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("API: http://{}/api/transactions", addr);

    axum::serve(listener, app)
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
