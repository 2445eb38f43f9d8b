//! Lifecycle notifications sent back to the host platform.
//!
//! The host platform reacts to three events: a payment was authorized, a
//! payment was captured (with the list of captured deals), and a payment is
//! complete. Delivery is fire-and-forget: failures are logged, never
//! propagated, and payment processing does not depend on them.
//!
//! Notifications are explicit trait calls on an injected notifier; there is
//! no global event registry. Callers rely on the ordering guarantee that each
//! method has returned before the caller mutates payment state.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::payment::Payment;

type HmacSha256 = Hmac<Sha256>;

/// Subscriber interface for payment lifecycle events.
#[async_trait::async_trait]
pub trait LifecycleNotifier: Send + Sync {
    /// A payment record was persisted after a successful charge.
    async fn payment_authorized(&self, payment: &Payment);

    /// A purchase completed; `captured_deal_ids` lists every deal in it.
    ///
    /// Fired while the payment still reads as AUTHORIZED, so subscribers
    /// (e.g. voucher activation) observe consistent pre-completion state.
    async fn payment_captured(&self, payment: &Payment, captured_deal_ids: &[String]);

    /// Fired after capture, still before the status mutation.
    async fn payment_complete(&self, payment: &Payment);
}

/// Event envelope delivered to the host platform.
#[derive(Debug, Serialize)]
struct LifecycleEvent<'a> {
    event_type: &'a str,
    event_id: Uuid,
    created_at: DateTime<Utc>,
    data: EventData<'a>,
}

#[derive(Debug, Serialize)]
struct EventData<'a> {
    payment: &'a Payment,
    #[serde(skip_serializing_if = "Option::is_none")]
    captured_deal_ids: Option<&'a [String]>,
}

/// Notifier that POSTs signed JSON events to the host platform's callback URL.
///
/// # Headers Sent
///
/// - `Content-Type: application/json`
/// - `X-Webhook-Signature: sha256=<hex>`
/// - `X-Webhook-Event-Id: <uuid>`
///
/// # Timeout
///
/// 5 seconds per delivery (prevents hanging on a slow host platform)
pub struct WebhookNotifier {
    url: String,
    secret: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Build a notifier for the given callback URL and signing secret.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if the URL is malformed or uses a scheme other than
    /// HTTPS (HTTP is allowed for localhost only).
    pub fn new(url: &str, secret: &str) -> Result<Self, AppError> {
        validate_callback_url(url)?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| AppError::InvalidRequest(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            url: url.to_string(),
            secret: secret.to_string(),
            client,
        })
    }

    /// Deliver one event. Failures are logged and swallowed.
    async fn send(
        &self,
        event_type: &str,
        payment: &Payment,
        captured_deal_ids: Option<&[String]>,
    ) {
        let event_id = Uuid::new_v4();
        let event = LifecycleEvent {
            event_type,
            event_id,
            created_at: Utc::now(),
            data: EventData {
                payment,
                captured_deal_ids,
            },
        };

        let payload_json = match serde_json::to_string(&event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize {} event: {}", event_type, e);
                return;
            }
        };

        let signature = generate_signature(&self.secret, &payload_json);

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("X-Webhook-Signature", &signature)
            .header("X-Webhook-Event-Id", event_id.to_string())
            .body(payload_json)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!("Delivered {} for payment {}", event_type, payment.id);
            }
            Ok(resp) => {
                tracing::error!(
                    "Host platform returned HTTP {} for {} (payment {})",
                    resp.status(),
                    event_type,
                    payment.id
                );
            }
            Err(e) => {
                tracing::error!(
                    "Failed to deliver {} for payment {}: {}",
                    event_type,
                    payment.id,
                    e
                );
            }
        }
    }
}

#[async_trait::async_trait]
impl LifecycleNotifier for WebhookNotifier {
    async fn payment_authorized(&self, payment: &Payment) {
        self.send("payment.authorized", payment, None).await;
    }

    async fn payment_captured(&self, payment: &Payment, captured_deal_ids: &[String]) {
        self.send("payment.captured", payment, Some(captured_deal_ids))
            .await;
    }

    async fn payment_complete(&self, payment: &Payment) {
        self.send("payment.complete", payment, None).await;
    }
}

/// Notifier used when no callback URL is configured; events go to the log.
pub struct LogNotifier;

#[async_trait::async_trait]
impl LifecycleNotifier for LogNotifier {
    async fn payment_authorized(&self, payment: &Payment) {
        tracing::info!("payment.authorized: payment {}", payment.id);
    }

    async fn payment_captured(&self, payment: &Payment, captured_deal_ids: &[String]) {
        tracing::info!(
            "payment.captured: payment {} (deals: {:?})",
            payment.id,
            captured_deal_ids
        );
    }

    async fn payment_complete(&self, payment: &Payment) {
        tracing::info!("payment.complete: payment {}", payment.id);
    }
}

/// Generate HMAC-SHA256 signature for an event payload.
///
/// # Format
///
/// `sha256=<hex_encoded_hmac>`
///
/// The host platform verifies by computing HMAC-SHA256(secret, body) and
/// comparing in constant time.
fn generate_signature(secret: &str, payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC key length is valid");
    mac.update(payload.as_bytes());
    let result = mac.finalize();
    format!("sha256={}", hex::encode(result.into_bytes()))
}

/// Validate the callback URL at startup.
///
/// # Rules
///
/// - Must be a valid URL of at most 2048 characters
/// - Must be HTTPS (HTTP allowed for localhost in development)
fn validate_callback_url(url: &str) -> Result<(), AppError> {
    if url.len() > 2048 {
        return Err(AppError::InvalidRequest(
            "Callback URL exceeds 2048 characters".to_string(),
        ));
    }

    let parsed = url::Url::parse(url)
        .map_err(|_| AppError::InvalidRequest("Invalid callback URL".to_string()))?;

    match parsed.scheme() {
        "https" => Ok(()),
        "http" => {
            if parsed.host_str() == Some("localhost")
                || parsed.host_str() == Some("127.0.0.1")
                || parsed.host_str() == Some("0.0.0.0")
            {
                Ok(())
            } else {
                Err(AppError::InvalidRequest(
                    "HTTP is only allowed for localhost. Use HTTPS for production.".to_string(),
                ))
            }
        }
        _ => Err(AppError::InvalidRequest(
            "Callback URL must use HTTP or HTTPS".to_string(),
        )),
    }
}
