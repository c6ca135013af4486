//! Error types and HTTP error response handling.
//!
//! This module defines the errors raised by the external clients and how a
//! failed webhook pipeline is converted into an HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failure talking to an external service (Google Sheets, Google OAuth or Twilio).
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Transport-level failure (DNS, TLS, connection reset, invalid response body).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status code.
    #[error("Upstream returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The service-account private key could not be used to sign an assertion.
    #[error("Invalid service account credential: {0}")]
    Credential(#[from] jsonwebtoken::errors::Error),

    /// A configured base URL could not be parsed or extended.
    #[error("Invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),

    /// The spreadsheet document contains no sheets to append to.
    #[error("Spreadsheet has no sheets")]
    NoSheets,

    /// The target sheet has no header row to match columns against.
    #[error("Sheet '{0}' has no header row")]
    MissingHeaderRow(String),
}

/// Application-wide error type.
///
/// Each variant names the pipeline stage that failed. Both map to the same
/// HTTP response; the stage only shows up in logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Appending the transaction row to the spreadsheet failed.
    #[error("Ledger write failed: {0}")]
    LedgerWrite(#[source] UpstreamError),

    /// Sending the WhatsApp confirmation failed. The ledger row already exists.
    #[error("Notification failed: {0}")]
    Notify(#[source] UpstreamError),
}

impl AppError {
    /// Short label of the failed stage, used as a structured log field.
    pub fn stage(&self) -> &'static str {
        match self {
            AppError::LedgerWrite(_) => "ledger_write",
            AppError::Notify(_) => "notify",
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// Every variant becomes `500 Internal Server Error` with a plain-text body.
/// Upstream details are never exposed to the caller.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// Turn a non-success response into [`UpstreamError::Api`], keeping the body for the logs.
pub async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(UpstreamError::Api { status, body })
}
