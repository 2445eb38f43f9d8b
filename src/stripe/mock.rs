//! Mock gateway for development and tests.
//!
//! Selected with `STRIPE_MODE=mock`; behavior is driven by
//! `STRIPE_MOCK_BEHAVIOR` so failure paths can be exercised without a live
//! credential.

use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::stripe::{ChargeGateway, ChargeRequest};

pub struct MockGateway {
    pub behavior: String,
}

#[async_trait::async_trait]
impl ChargeGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn charge(&self, request: &ChargeRequest) -> Result<serde_json::Value, AppError> {
        match self.behavior.as_str() {
            "decline" => Err(AppError::ChargeFailed(
                "Your card was declined.".to_string(),
            )),
            _ => Ok(json!({
                // Fresh id per call: repeated submissions really do create
                // separate charges, exactly like the live gateway
                "id": format!("ch_{}", Uuid::new_v4().simple()),
                "object": "charge",
                "amount": request.amount_cents,
                "currency": request.currency,
                "description": request.description,
                "paid": true,
                "card": { "name": request.card.name }
            })),
        }
    }
}
