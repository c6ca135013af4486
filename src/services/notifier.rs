//! WhatsApp notifier backed by the Twilio Messages API.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::{
    config::TwilioConfig,
    error::{UpstreamError, check_status},
};

/// Channel prefix Twilio uses to route a message over WhatsApp.
pub const WHATSAPP_PREFIX: &str = "whatsapp:";

/// Sends a text message to a phone number.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `body` to `to` (a bare phone number, not channel-qualified).
    async fn send(&self, to: &str, body: &str) -> Result<(), UpstreamError>;
}

/// Twilio client sending WhatsApp messages from a fixed sender.
#[derive(Debug, Clone)]
pub struct TwilioNotifier {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from: String,
    messages_url: Url,
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: Option<String>,
    status: Option<String>,
}

impl TwilioNotifier {
    /// Build a client from configuration, sharing the given HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Url` if the Twilio API base URL is invalid.
    pub fn new(config: TwilioConfig, http: reqwest::Client) -> Result<Self, UpstreamError> {
        let mut messages_url = Url::parse(&config.api_url)?;
        messages_url
            .path_segments_mut()
            .map_err(|_| UpstreamError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend([
                "2010-04-01",
                "Accounts",
                config.account_sid.as_str(),
                "Messages.json",
            ]);

        Ok(Self {
            http,
            from: sender_address(&config.whatsapp_number),
            account_sid: config.account_sid,
            auth_token: config.auth_token,
            messages_url,
        })
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    async fn send(&self, to: &str, body: &str) -> Result<(), UpstreamError> {
        let to = recipient_address(to);

        let response = self
            .http
            .post(self.messages_url.clone())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to.as_str()), ("From", self.from.as_str()), ("Body", body)])
            .send()
            .await?;

        let message: MessageResource = check_status(response).await?.json().await?;
        tracing::info!(
            to = %to,
            sid = message.sid.as_deref().unwrap_or("unknown"),
            status = message.status.as_deref().unwrap_or("unknown"),
            "WhatsApp message accepted"
        );

        Ok(())
    }
}

/// Recipient as a WhatsApp address. The prefix is always added.
pub fn recipient_address(phone: &str) -> String {
    format!("{WHATSAPP_PREFIX}{phone}")
}

/// Sender as a WhatsApp address, leaving an already qualified value untouched.
fn sender_address(number: &str) -> String {
    if number.starts_with(WHATSAPP_PREFIX) {
        number.to_string()
    } else {
        recipient_address(number)
    }
}
