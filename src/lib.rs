//! Top-up Webhook Relay
//!
//! Receives completed-transaction callbacks from a mobile top-up provider,
//! appends each transaction to a Google Sheets log and confirms it to the
//! recipient over WhatsApp.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Ledger**: Google Sheets API v4, service-account OAuth
//! - **Notifications**: Twilio Messages API (WhatsApp channel)
//! - **Format**: JSON requests, plain-text responses
//!
//! # Request Flow
//!
//! 1. `POST /reloadly-webhook` with the transaction JSON
//! 2. Append the row to the first sheet of the configured spreadsheet
//! 3. Send the confirmation message to the recipient phone
//! 4. Respond 200, or 500 if either step failed

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the HTTP router.
///
/// The webhook route only binds POST, so any other method is answered with
/// 405 by the router before reaching a handler.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Public liveness probe
        .route("/health", get(handlers::health::health_check))
        // Provider callback
        .route(
            "/reloadly-webhook",
            post(handlers::webhooks::reloadly_webhook),
        )
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share the injected clients with all handlers via State extraction
        .with_state(state)
}
