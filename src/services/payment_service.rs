//! Payment service - the charge / authorize / capture flow.
//!
//! This service handles:
//! - The partial-tender short-circuit (nothing payable, return existing payment)
//! - The single gateway charge call
//! - Persisting AUTHORIZED payments with the raw gateway response
//! - The AUTHORIZED → COMPLETE capture transition
//!
//! # Known Gaps
//!
//! There is no idempotency key and no deduplication: invoking processing twice
//! for the same purchase creates two charges. The gap is deliberate — the host
//! platform invokes processing once per checkout submission — and documented
//! by a regression test rather than silently papered over here.

use uuid::Uuid;

use crate::error::AppError;
use crate::models::checkout::CheckoutContext;
use crate::models::payment::{PAYMENT_METHOD, Payment, PaymentStatus, mask_card_number};
use crate::models::purchase::Purchase;
use crate::repo::payments_repo::{NewPayment, PaymentStore};
use crate::services::lifecycle::LifecycleNotifier;
use crate::stripe::{ChargeGateway, ChargeRequest};

/// Process a payment for a checkout submission.
///
/// # Process
///
/// 1. If the payable total for this payment method is below one cent, another
///    processor already satisfied the purchase: skip the gateway and return
///    the first existing payment for the purchase
/// 2. Build the charge request and submit it (terminal on failure)
/// 3. Group purchased line items by deal, snapshot the shipping address
/// 4. Persist the payment with status AUTHORIZED
/// 5. Emit the `payment.authorized` notification
///
/// # Errors
///
/// - `InvalidRequest`: malformed card data or negative amount
/// - `ChargeFailed`: the gateway declined, timed out, or was unreachable
/// - `PaymentNotFound`: short-circuit taken but no payment exists
/// - `Database`: the payment record could not be persisted
pub async fn process_payment(
    store: &dyn PaymentStore,
    gateway: &dyn ChargeGateway,
    notifier: &dyn LifecycleNotifier,
    checkout: &CheckoutContext,
    purchase: &Purchase,
) -> Result<Payment, AppError> {
    // Below one cent there is nothing to charge: another payment handler
    // intercepted and took care of everything. Return its payment instead.
    if purchase.total_cents_for(PAYMENT_METHOD) < 1 {
        return store
            .first_for_purchase(purchase.id)
            .await?
            .ok_or(AppError::PaymentNotFound);
    }

    let request = ChargeRequest::from_checkout(checkout, purchase)?;

    tracing::info!(
        "Submitting charge of {} cents for purchase {} via {}",
        request.amount_cents,
        purchase.id,
        gateway.name()
    );
    let gateway_response = gateway.charge(&request).await?;

    // Purchased products grouped per deal for this payment method
    let deals = serde_json::to_value(purchase.deal_groups(PAYMENT_METHOD))
        .map_err(|e| AppError::InvalidRequest(format!("Failed to serialize deals: {}", e)))?;

    let shipping_address = match &checkout.shipping {
        Some(address) => Some(serde_json::to_value(address).map_err(|e| {
            AppError::InvalidRequest(format!("Failed to serialize shipping address: {}", e))
        })?),
        None => None,
    };

    let payment = store
        .insert_authorized(NewPayment {
            payment_method: PAYMENT_METHOD.to_string(),
            purchase_id: purchase.id,
            amount_cents: request.amount_cents,
            currency: request.currency.clone(),
            gateway_response,
            // Save the masked number for possible credits later
            masked_card_number: mask_card_number(&checkout.card.number),
            deals,
            shipping_address,
        })
        .await
        .map_err(|e| {
            // The money has already moved at the gateway; a failed insert
            // leaves the charge with no local record
            tracing::error!(
                "Charge succeeded but payment insert failed for purchase {}: {}",
                purchase.id,
                e
            );
            e
        })?;

    notifier.payment_authorized(&payment).await;

    Ok(payment)
}

/// Complete a purchase: capture every authorized payment tied to it.
///
/// For each AUTHORIZED payment, emits `payment.captured` (with the list of
/// captured deal identifiers) and `payment.complete`, then flips the status to
/// COMPLETE. COMPLETE payments are skipped, so the transition happens exactly
/// once per payment.
///
/// Returns the ids of the payments that transitioned.
pub async fn complete_purchase(
    store: &dyn PaymentStore,
    notifier: &dyn LifecycleNotifier,
    purchase: &Purchase,
) -> Result<Vec<Uuid>, AppError> {
    let captured_deal_ids = purchase.captured_deal_ids();

    let payments = store.all_for_purchase(purchase.id).await?;

    let mut completed = Vec::new();
    for mut payment in payments {
        if !payment.is_authorized() {
            continue;
        }

        finalize_payment(&mut payment, &captured_deal_ids, notifier).await;

        store.set_status(payment.id, &payment.status).await?;

        completed.push(payment.id);
    }

    Ok(completed)
}

/// Run one payment through the capture transition.
///
/// Both notifications fire before the status mutation, so subscribers that
/// react to capture (e.g. voucher activation) still observe the payment as
/// AUTHORIZED.
pub async fn finalize_payment(
    payment: &mut Payment,
    captured_deal_ids: &[String],
    notifier: &dyn LifecycleNotifier,
) {
    notifier.payment_captured(payment, captured_deal_ids).await;
    notifier.payment_complete(payment).await;
    payment.status = PaymentStatus::Complete.as_str().to_string();
}

/// Get payment by ID.
pub async fn get_payment_by_id(
    store: &dyn PaymentStore,
    payment_id: Uuid,
) -> Result<Option<Payment>, AppError> {
    store.find_by_id(payment_id).await
}
