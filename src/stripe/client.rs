//! Live Stripe client speaking the form-encoded charges API.

use std::time::Duration;

use crate::error::AppError;
use crate::stripe::{ChargeGateway, ChargeRequest};

/// Thin reqwest-based client for `POST /v1/charges`.
///
/// The secret key is read once at startup and held here for the process
/// lifetime. Every call carries an explicit timeout; a timed-out charge is
/// surfaced as the same terminal failure as a decline.
pub struct StripeClient {
    base_url: String,
    secret_key: String,
    client: reqwest::Client,
}

impl StripeClient {
    /// Build a client with the given API base, credential, and call timeout.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str, secret_key: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InvalidRequest(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl ChargeGateway for StripeClient {
    fn name(&self) -> &'static str {
        "stripe"
    }

    async fn charge(&self, request: &ChargeRequest) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/v1/charges", self.base_url);

        // Stripe's charges endpoint is form-encoded; card fields use the
        // card[...] bracket notation
        let form = [
            ("amount", request.amount_cents.to_string()),
            ("currency", request.currency.clone()),
            ("card[number]", request.card.number.clone()),
            ("card[exp_month]", request.card.exp_month.clone()),
            ("card[exp_year]", request.card.exp_year.clone()),
            ("card[cvc]", request.card.cvc.clone()),
            ("card[name]", request.card.name.clone()),
            ("description", request.description.clone()),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                // Retained verbatim; the caller persists it for audit
                resp.json::<serde_json::Value>().await.map_err(|e| {
                    AppError::ChargeFailed(format!("Unreadable gateway response: {}", e))
                })
            }
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                let message = decline_message(&body)
                    .unwrap_or_else(|| format!("Gateway rejected the charge (HTTP {})", status));
                tracing::warn!("Stripe rejected charge: HTTP {} - {}", status, message);
                Err(AppError::ChargeFailed(message))
            }
            Err(e) if e.is_timeout() => {
                tracing::error!("Stripe charge timed out: {}", e);
                Err(AppError::ChargeFailed(
                    "The payment gateway timed out".to_string(),
                ))
            }
            Err(e) => {
                tracing::error!("Stripe charge transport failure: {}", e);
                Err(AppError::ChargeFailed(e.to_string()))
            }
        }
    }
}

/// Pull the human-readable message out of a Stripe error body.
///
/// Error bodies look like `{"error": {"message": "...", "type": "..."}}`.
fn decline_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(ToString::to_string)
}
