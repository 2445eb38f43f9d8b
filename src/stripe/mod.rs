//! Stripe charge gateway: request shape, adapter trait, and implementations.
//!
//! The gateway is a single-call integration: one charge request per purchase
//! attempt, no retries and no idempotency keys. A declined or network-failed
//! charge is terminal for that attempt.

use serde::Serialize;

use crate::error::AppError;
use crate::models::checkout::CheckoutContext;
use crate::models::payment::PAYMENT_METHOD;
use crate::models::purchase::Purchase;

pub mod client;
pub mod mock;

/// Only currency this processor charges in.
pub const CURRENCY: &str = "usd";

/// Card fields as transmitted to the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct CardPayload {
    pub number: String,
    pub exp_month: String,
    /// Last two digits only (gateway convention)
    pub exp_year: String,
    pub cvc: String,
    /// Cardholder name: billing first and last name, space separated
    pub name: String,
}

/// A single charge request submitted to the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeRequest {
    /// Amount in integer minor units (cents)
    pub amount_cents: i64,
    pub currency: String,
    pub card: CardPayload,
    /// Purchase identifier, for traceability in the gateway dashboard
    pub description: String,
}

impl ChargeRequest {
    /// Build a charge request from a checkout submission and its purchase.
    ///
    /// The amount is the purchase's payable total for this payment method,
    /// converted defensively from the upstream decimal string.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if the amount is negative or any card field is empty.
    pub fn from_checkout(
        checkout: &CheckoutContext,
        purchase: &Purchase,
    ) -> Result<Self, AppError> {
        let amount_cents = purchase.total_cents_for(PAYMENT_METHOD);
        if amount_cents < 0 {
            return Err(AppError::InvalidRequest(
                "Charge amount cannot be negative".to_string(),
            ));
        }

        let card = &checkout.card;
        if card.number.trim().is_empty()
            || card.exp_month.trim().is_empty()
            || card.exp_year.trim().is_empty()
            || card.cvc.trim().is_empty()
        {
            return Err(AppError::InvalidRequest(
                "Card number, expiration and CVC are required".to_string(),
            ));
        }

        Ok(Self {
            amount_cents,
            currency: CURRENCY.to_string(),
            card: CardPayload {
                number: card.number.clone(),
                exp_month: card.exp_month.clone(),
                exp_year: last_two_digits(&card.exp_year),
                cvc: card.cvc.clone(),
                name: format!(
                    "{} {}",
                    checkout.billing.first_name, checkout.billing.last_name
                ),
            },
            description: purchase.id.to_string(),
        })
    }
}

/// Reduce an expiration year to its last two digits ("2027" → "27").
fn last_two_digits(year: &str) -> String {
    let chars: Vec<char> = year.chars().collect();
    if chars.len() <= 2 {
        return year.to_string();
    }
    chars[chars.len() - 2..].iter().collect()
}

/// The charge API, seen as an opaque remote call.
///
/// Implementations return the gateway's structured response verbatim on
/// success (it is persisted for audit) and a `ChargeFailed` error carrying a
/// user-facing message on any rejection, timeout, or transport failure.
#[async_trait::async_trait]
pub trait ChargeGateway: Send + Sync {
    fn name(&self) -> &'static str;

    async fn charge(&self, request: &ChargeRequest) -> Result<serde_json::Value, AppError>;
}
