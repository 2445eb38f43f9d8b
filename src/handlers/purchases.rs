//! Purchase lifecycle HTTP handlers.
//!
//! - POST /api/v1/purchases/complete - the "purchase completed" inbound event

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::AppError, models::purchase::Purchase, services::payment_service};

/// Body of the "purchase completed" lifecycle event.
#[derive(Debug, Deserialize)]
pub struct PurchaseCompletedEvent {
    pub purchase: Purchase,
}

/// Response listing the payments that transitioned to COMPLETE.
#[derive(Debug, Serialize)]
pub struct CompletePurchaseResponse {
    pub purchase_id: Uuid,
    pub completed_payment_ids: Vec<Uuid>,
}

/// Complete a purchase.
///
/// Fired by the host platform after authorization. Every AUTHORIZED payment
/// for the purchase receives `payment.captured` and `payment.complete`
/// notifications and is then marked COMPLETE. Payments already COMPLETE are
/// untouched, so redelivered events are harmless.
pub async fn complete_purchase(
    State(state): State<AppState>,
    Json(event): Json<PurchaseCompletedEvent>,
) -> Result<Json<CompletePurchaseResponse>, AppError> {
    let completed_payment_ids = payment_service::complete_purchase(
        state.store.as_ref(),
        state.notifier.as_ref(),
        &event.purchase,
    )
    .await?;

    Ok(Json(CompletePurchaseResponse {
        purchase_id: event.purchase.id,
        completed_payment_ids,
    }))
}
