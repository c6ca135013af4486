//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body)
//! 2. Runs the webhook pipeline against the injected clients
//! 3. Returns HTTP response (status code, body)

/// Service liveness endpoint
pub mod health;
/// Top-up provider callback endpoint
pub mod webhooks;
