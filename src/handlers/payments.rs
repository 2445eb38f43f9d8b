//! Payment HTTP handlers.
//!
//! This module implements payment-related API endpoints:
//! - POST /api/v1/payments - Process a checkout submission into a charge
//! - GET /api/v1/payments/:id - Get payment details

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    AppState,
    error::AppError,
    models::{checkout::CheckoutContext, payment::PaymentResponse, purchase::Purchase},
    services::payment_service,
};

/// Body of the "process payment" inbound call.
///
/// # JSON Example
///
/// ```json
/// {
///   "checkout": {
///     "card": { "number": "4242424242424242", "exp_month": "12", "exp_year": "2027", "cvc": "123" },
///     "billing": { "first_name": "Jane", "last_name": "Doe" },
///     "shipping": null
///   },
///   "purchase": {
///     "id": "550e8400-e29b-41d4-a716-446655440000",
///     "totals": { "Credit (Stripe Direct Payments)": "25.00" },
///     "items": [
///       { "deal_id": "deal-a", "name": "Spa Day", "payment_method": "Credit (Stripe Direct Payments)" }
///     ]
///   }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct ProcessPaymentRequest {
    pub checkout: CheckoutContext,
    pub purchase: Purchase,
}

/// Process a payment for a purchase.
///
/// Charges the card, persists an AUTHORIZED payment, and emits the
/// `payment.authorized` notification. A declined or failed charge returns a
/// 402 with the gateway's message; no retry is attempted.
pub async fn process_payment(
    State(state): State<AppState>,
    Json(request): Json<ProcessPaymentRequest>,
) -> Result<Json<PaymentResponse>, AppError> {
    let payment = payment_service::process_payment(
        state.store.as_ref(),
        state.gateway.as_ref(),
        state.notifier.as_ref(),
        &request.checkout,
        &request.purchase,
    )
    .await?;

    Ok(Json(payment.into()))
}

/// Get payment by ID.
pub async fn get_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, AppError> {
    let payment = payment_service::get_payment_by_id(state.store.as_ref(), payment_id)
        .await?
        .ok_or(AppError::PaymentNotFound)?;

    Ok(Json(payment.into()))
}
