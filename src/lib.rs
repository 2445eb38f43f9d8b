//! Stripe bridge for a group-buying commerce platform.
//!
//! This service translates an in-platform purchase/checkout pair into a Stripe
//! charge, persists the resulting payment with an AUTHORIZED → COMPLETE status
//! lifecycle, and propagates lifecycle events back to the host platform.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Gateway**: Stripe charges API via reqwest (mockable behind a trait)
//! - **Events**: HMAC-signed webhooks to the host platform (fire-and-forget)

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod money;
pub mod repo;
pub mod services;
pub mod stripe;

use std::sync::Arc;

use crate::repo::payments_repo::PaymentStore;
use crate::services::lifecycle::LifecycleNotifier;
use crate::stripe::ChargeGateway;

/// Shared application state handed to every handler.
///
/// The store, gateway, and notifier are injected here once at startup;
/// nothing in the request path reaches for globals or re-reads configuration.
#[derive(Clone)]
pub struct AppState {
    pub pool: db::DbPool,
    pub store: Arc<dyn PaymentStore>,
    pub gateway: Arc<dyn ChargeGateway>,
    pub notifier: Arc<dyn LifecycleNotifier>,
}
