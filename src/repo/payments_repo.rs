//! Payment record storage.
//!
//! The service layer talks to storage through the [`PaymentStore`] trait so
//! the charge and capture flows can be driven against an in-memory double in
//! tests; [`PgPaymentStore`] is the PostgreSQL implementation used at runtime.

use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::payment::{Payment, PaymentStatus};

/// Fields of a payment record at creation time.
///
/// Status is not part of the input: every new payment starts AUTHORIZED.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub payment_method: String,
    pub purchase_id: Uuid,
    pub amount_cents: i64,
    pub currency: String,
    pub gateway_response: serde_json::Value,
    pub masked_card_number: String,
    pub deals: serde_json::Value,
    pub shipping_address: Option<serde_json::Value>,
}

/// Storage operations the payment lifecycle needs.
#[async_trait::async_trait]
pub trait PaymentStore: Send + Sync {
    /// Persist a new payment with status AUTHORIZED and return the stored row.
    async fn insert_authorized(&self, new_payment: NewPayment) -> Result<Payment, AppError>;

    /// First payment recorded for a purchase, by creation order.
    async fn first_for_purchase(&self, purchase_id: Uuid) -> Result<Option<Payment>, AppError>;

    /// Every payment recorded for a purchase, in creation order.
    async fn all_for_purchase(&self, purchase_id: Uuid) -> Result<Vec<Payment>, AppError>;

    /// Overwrite a payment's status.
    async fn set_status(&self, payment_id: Uuid, status: &str) -> Result<(), AppError>;

    /// Fetch a payment by its id.
    async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>, AppError>;
}

/// PostgreSQL-backed payment store.
#[derive(Clone)]
pub struct PgPaymentStore {
    pub pool: DbPool,
}

#[async_trait::async_trait]
impl PaymentStore for PgPaymentStore {
    async fn insert_authorized(&self, new_payment: NewPayment) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (
                payment_method,
                purchase_id,
                amount_cents,
                currency,
                status,
                gateway_response,
                masked_card_number,
                deals,
                shipping_address
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&new_payment.payment_method)
        .bind(new_payment.purchase_id)
        .bind(new_payment.amount_cents)
        .bind(&new_payment.currency)
        .bind(PaymentStatus::Authorized.as_str())
        .bind(&new_payment.gateway_response)
        .bind(&new_payment.masked_card_number)
        .bind(&new_payment.deals)
        .bind(&new_payment.shipping_address)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    async fn first_for_purchase(&self, purchase_id: Uuid) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE purchase_id = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(purchase_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    async fn all_for_purchase(&self, purchase_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE purchase_id = $1 ORDER BY created_at",
        )
        .bind(purchase_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    async fn set_status(&self, payment_id: Uuid, status: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE payments SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(payment_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(payment_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payment)
    }
}
