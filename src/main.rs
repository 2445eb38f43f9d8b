//! Stripe Bridge - Main Application Entry Point
//!
//! This is a REST API server bridging a group-buying commerce platform to the
//! Stripe payment gateway. It exposes endpoints for processing a checkout
//! submission into a charge and for completing purchases (the capture
//! transition), and it notifies the host platform of lifecycle events.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Gateway**: Stripe charges API (or a mock, selected by configuration)
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool and run migrations
//! 3. Construct the charge gateway and lifecycle notifier once
//! 4. Build HTTP router and start server on configured port

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use groupbuy_stripe_bridge::{
    AppState, config, db, handlers,
    repo::payments_repo::{PaymentStore, PgPaymentStore},
    services::lifecycle::{LifecycleNotifier, LogNotifier, WebhookNotifier},
    stripe::{ChargeGateway, client::StripeClient, mock::MockGateway},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration (the gateway credential is read once, here, and held
    // in memory for the process lifetime)
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    // Select the charge gateway
    let gateway: Arc<dyn ChargeGateway> = match config.stripe_mode.as_str() {
        "mock" => {
            tracing::warn!(
                "Using mock gateway (behavior: {})",
                config.stripe_mock_behavior
            );
            Arc::new(MockGateway {
                behavior: config.stripe_mock_behavior.clone(),
            })
        }
        _ => Arc::new(
            StripeClient::new(
                &config.stripe_api_base,
                &config.stripe_secret_key,
                Duration::from_secs(config.charge_timeout_secs),
            )
            .map_err(|e| anyhow::anyhow!("Failed to build Stripe client: {}", e))?,
        ),
    };

    // Lifecycle notifications go to the host platform callback when one is
    // configured, otherwise to the log
    let notifier: Arc<dyn LifecycleNotifier> = match (
        &config.lifecycle_webhook_url,
        &config.lifecycle_webhook_secret,
    ) {
        (Some(url), Some(secret)) => {
            tracing::info!("Lifecycle events will be delivered to {}", url);
            Arc::new(
                WebhookNotifier::new(url, secret)
                    .map_err(|e| anyhow::anyhow!("Invalid lifecycle webhook config: {}", e))?,
            )
        }
        _ => {
            tracing::info!("No lifecycle callback configured; events are logged only");
            Arc::new(LogNotifier)
        }
    };

    let store: Arc<dyn PaymentStore> = Arc::new(PgPaymentStore { pool: pool.clone() });

    let state = AppState {
        pool,
        store,
        gateway,
        notifier,
    };

    // Build the router
    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        // Inbound "process payment" call
        .route(
            "/api/v1/payments",
            post(handlers::payments::process_payment),
        )
        .route(
            "/api/v1/payments/{id}",
            get(handlers::payments::get_payment),
        )
        // Inbound "purchase completed" lifecycle event
        .route(
            "/api/v1/purchases/complete",
            post(handlers::purchases::complete_purchase),
        )
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share state with all handlers via State extraction
        .with_state(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    axum::serve(listener, app).await?;

    Ok(())
}
