//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle the gateway call, persistence, and lifecycle notifications.

pub mod lifecycle;
pub mod payment_service;
