//! Business logic services.
//!
//! Services hold the webhook pipeline and the clients for the two external
//! collaborators it drives.

pub mod google_auth;
pub mod ledger;
pub mod notifier;
pub mod webhook_service;
