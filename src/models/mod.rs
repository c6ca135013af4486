//! Data models for the webhook payload and the spreadsheet row derived from it.

/// Provider callback payload
pub mod transaction_event;
/// Transaction log row
pub mod ledger_row;
