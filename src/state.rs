//! Shared handler state.

use std::sync::Arc;

use crate::services::{ledger::Ledger, notifier::Notifier};

/// External collaborators injected into the webhook handler.
///
/// Production wires the Google Sheets and Twilio clients; tests substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn Ledger>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(ledger: impl Ledger + 'static, notifier: impl Notifier + 'static) -> Self {
        Self {
            ledger: Arc::new(ledger),
            notifier: Arc::new(notifier),
        }
    }
}
