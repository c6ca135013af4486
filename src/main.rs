//! Top-up Webhook Relay - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Build the Google Sheets and Twilio clients over one HTTP client
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

use tracing_subscriber::EnvFilter;

use topup_webhook_relay::{
    config::Config,
    create_router,
    services::{ledger::GoogleSheetsLedger, notifier::TwilioNotifier},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Both clients share one connection pool
    let http = reqwest::Client::new();
    let ledger = GoogleSheetsLedger::new(config.sheets(), http.clone())?;
    let notifier = TwilioNotifier::new(config.twilio(), http)?;
    tracing::info!(sheet_id = %config.google_sheet_id, "Upstream clients ready");

    let app = create_router(AppState::new(ledger, notifier));

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
