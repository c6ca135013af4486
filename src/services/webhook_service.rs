//! Webhook processing pipeline.
//!
//! A received transaction goes through two strictly ordered stages:
//!
//! 1. **Ledger write**: append the row to the transaction log
//! 2. **Notify**: send the WhatsApp confirmation to the recipient
//!
//! The notification is only attempted once the ledger write has succeeded.
//! Nothing is retried.
//!
//! Row and message construction are pure functions so their output can be
//! checked without any I/O.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
    error::AppError,
    models::{
        ledger_row::LedgerRow,
        transaction_event::{TransactionEvent, display_field},
    },
    services::{ledger::Ledger, notifier::Notifier},
};

/// Ledger row for `event`, dated `at` (ISO 8601, millisecond precision, UTC).
pub fn ledger_row(event: &TransactionEvent, at: DateTime<Utc>) -> LedgerRow {
    LedgerRow {
        transaction_id: event.transaction_id.clone(),
        status: event.status.clone(),
        amount: event.amount.clone(),
        operator: event.operator_name.clone(),
        phone: event.recipient_phone.clone(),
        date: at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Confirmation text sent to the recipient.
///
/// Missing fields are rendered as `undefined` rather than rejected.
pub fn notification_message(event: &TransactionEvent) -> String {
    format!(
        "Your {} top-up of {} was {}. Txn ID: {}",
        display_field(event.operator_name.as_ref()),
        display_field(event.amount.as_ref()),
        display_field(event.status.as_ref()),
        display_field(event.transaction_id.as_ref()),
    )
}

/// Phone number the confirmation is sent to.
pub fn recipient(event: &TransactionEvent) -> String {
    display_field(event.recipient_phone.as_ref())
}

/// Run both stages for one event.
///
/// # Errors
///
/// - `LedgerWrite`: the append failed; no notification was attempted
/// - `Notify`: the row was written but the message could not be sent
pub async fn process_event(
    ledger: &dyn Ledger,
    notifier: &dyn Notifier,
    event: &TransactionEvent,
) -> Result<(), AppError> {
    let row = ledger_row(event, Utc::now());
    ledger.append_row(&row).await.map_err(AppError::LedgerWrite)?;

    notifier
        .send(&recipient(event), &notification_message(event))
        .await
        .map_err(AppError::Notify)?;

    Ok(())
}
