//! Payment data models and API response types.
//!
//! This module defines:
//! - `Payment`: Database entity representing a persisted payment
//! - `PaymentStatus`: the AUTHORIZED → COMPLETE lifecycle
//! - `PaymentResponse`: Response body returned to the host platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money;

/// Payment method label recorded on every payment this processor creates.
pub const PAYMENT_METHOD: &str = "Credit (Stripe Direct Payments)";

/// Lifecycle status of a payment.
///
/// A payment is created AUTHORIZED after a successful charge and flipped to
/// COMPLETE exactly once by the purchase-completion event. COMPLETE is
/// terminal; an AUTHORIZED payment never followed by a completion event stays
/// authorized (reconciling orphans is out of scope here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Authorized,
    Complete,
}

impl PaymentStatus {
    /// The TEXT representation stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Authorized => "AUTHORIZED",
            PaymentStatus::Complete => "COMPLETE",
        }
    }
}

/// Represents a payment record from the database.
///
/// # Database Table
///
/// Maps to the `payments` table. Each payment:
/// - Is created only after the gateway accepted the charge
/// - Stores amount in cents (never floats!)
/// - Retains the raw gateway response verbatim for audit
/// - Tracks status (AUTHORIZED, COMPLETE)
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Payment {
    /// Unique identifier for this payment
    pub id: Uuid,

    /// Payment method label, see [`PAYMENT_METHOD`]
    pub payment_method: String,

    /// Purchase this payment belongs to (host-platform reference)
    pub purchase_id: Uuid,

    /// Amount in cents
    pub amount_cents: i64,

    /// Currency code (ISO 4217)
    pub currency: String,

    /// Lifecycle status, stored as TEXT ("AUTHORIZED" or "COMPLETE")
    pub status: String,

    /// Full gateway response, stored unmodified
    pub gateway_response: serde_json::Value,

    /// Card number with all but the last four digits redacted
    pub masked_card_number: String,

    /// Ordered array of `{deal_id, items[]}` groups paid via this method
    pub deals: serde_json::Value,

    /// Optional shipping address snapshot copied from checkout state
    pub shipping_address: Option<serde_json::Value>,

    /// When the payment was created
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Whether this payment is still awaiting the completion event.
    pub fn is_authorized(&self) -> bool {
        self.status == PaymentStatus::Authorized.as_str()
    }
}

/// Redact a card number down to its last four digits.
///
/// # Examples
///
/// - `"4242424242424242"` → `"************4242"`
/// - Numbers of four digits or fewer are returned unchanged.
pub fn mask_card_number(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    if chars.len() <= 4 {
        return number.to_string();
    }
    let masked: String = "*".repeat(chars.len() - 4);
    let last_four: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", masked, last_four)
}

/// Response returned for payment operations.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "770e8400-e29b-41d4-a716-446655440002",
///   "payment_method": "Credit (Stripe Direct Payments)",
///   "purchase_id": "550e8400-e29b-41d4-a716-446655440000",
///   "amount": "25.00",
///   "currency": "usd",
///   "status": "AUTHORIZED",
///   "masked_card_number": "************4242",
///   "deals": [{"deal_id": "deal-a", "items": [...]}],
///   "created_at": "2025-12-21T16:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub payment_method: String,
    pub purchase_id: Uuid,
    /// Amount in major units as a decimal string
    pub amount: String,
    pub currency: String,
    pub status: String,
    pub masked_card_number: String,
    pub deals: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Convert database Payment to API PaymentResponse.
///
/// The raw gateway response blob stays internal; clients get the durable
/// fields only.
impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            payment_method: payment.payment_method,
            purchase_id: payment.purchase_id,
            amount: money::format_major_units(payment.amount_cents),
            currency: payment.currency,
            status: payment.status,
            masked_card_number: payment.masked_card_number,
            deals: payment.deals,
            shipping_address: payment.shipping_address,
            created_at: payment.created_at,
        }
    }
}
