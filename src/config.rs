//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `GOOGLE_SHEET_ID` (required): ID of the spreadsheet holding the transaction log
/// - `GOOGLE_CLIENT_EMAIL` (required): service account email
/// - `GOOGLE_PRIVATE_KEY` (required): service account PEM key, `\n` escapes allowed
/// - `TWILIO_ACCOUNT_SID` (required): Twilio account SID
/// - `TWILIO_AUTH_TOKEN` (required): Twilio auth token
/// - `TWILIO_WHATSAPP_NUMBER` (required): sender address, e.g. `whatsapp:+14155238886`
/// - `PORT` (optional): HTTP server port, defaults to 3000
/// - `GOOGLE_TOKEN_URL`, `GOOGLE_SHEETS_API_URL`, `TWILIO_API_URL` (optional): upstream base URLs
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub google_sheet_id: String,
    pub google_client_email: String,
    pub google_private_key: String,

    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_whatsapp_number: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_google_token_url")]
    pub google_token_url: String,

    #[serde(default = "default_google_sheets_api_url")]
    pub google_sheets_api_url: String,

    #[serde(default = "default_twilio_api_url")]
    pub twilio_api_url: String,
}

/// Default port if PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_google_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_google_sheets_api_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_twilio_api_url() -> String {
    "https://api.twilio.com".to_string()
}

/// Settings consumed by the Google Sheets ledger client.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub sheet_id: String,
    pub client_email: String,
    /// PEM-encoded RSA key with real newlines.
    pub private_key: String,
    pub token_url: String,
    pub api_url: String,
}

/// Settings consumed by the Twilio notifier client.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub whatsapp_number: String,
    pub api_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., GOOGLE_SHEET_ID)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: google_sheet_id -> GOOGLE_SHEET_ID
        envy::from_env::<Config>()
    }

    /// Spreadsheet client settings.
    ///
    /// Environment files usually carry the private key on one line with
    /// literal `\n` sequences; those are turned back into newlines here.
    pub fn sheets(&self) -> SheetsConfig {
        SheetsConfig {
            sheet_id: self.google_sheet_id.clone(),
            client_email: self.google_client_email.clone(),
            private_key: self.google_private_key.replace("\\n", "\n"),
            token_url: self.google_token_url.clone(),
            api_url: self.google_sheets_api_url.clone(),
        }
    }

    /// Messaging client settings.
    pub fn twilio(&self) -> TwilioConfig {
        TwilioConfig {
            account_sid: self.twilio_account_sid.clone(),
            auth_token: self.twilio_auth_token.clone(),
            whatsapp_number: self.twilio_whatsapp_number.clone(),
            api_url: self.twilio_api_url.clone(),
        }
    }
}
