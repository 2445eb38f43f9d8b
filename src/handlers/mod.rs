//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Performs business logic via the services layer
//! 3. Returns HTTP response (JSON, status code)

/// Liveness and database connectivity check
pub mod health;
/// Payment processing and lookup endpoints
pub mod payments;
/// Purchase-completion lifecycle event endpoint
pub mod purchases;
