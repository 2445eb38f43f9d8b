//! Data models representing database entities and inbound host-platform objects.

/// Checkout context captured at submission time (card, billing, shipping)
pub mod checkout;
/// Persisted payment record and its status lifecycle
pub mod payment;
/// Purchase object owned by the host platform
pub mod purchase;
