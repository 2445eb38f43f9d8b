//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.
//!
//! Configuration is read exactly once at startup and passed by reference to the
//! components that need it; there is no hot reload.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `STRIPE_SECRET_KEY` (required): the gateway API credential
/// - `STRIPE_API_BASE` (optional): gateway base URL, defaults to the live API
/// - `STRIPE_MODE` (optional): "live" or "mock", defaults to "live"
/// - `STRIPE_MOCK_BEHAVIOR` (optional): "succeed" or "decline" when mocked
/// - `CHARGE_TIMEOUT_SECS` (optional): gateway call timeout, defaults to 30
/// - `LIFECYCLE_WEBHOOK_URL` (optional): host-platform callback for lifecycle events
/// - `LIFECYCLE_WEBHOOK_SECRET` (optional): HMAC key for signing those events
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    pub stripe_secret_key: String,

    #[serde(default = "default_stripe_api_base")]
    pub stripe_api_base: String,

    #[serde(default = "default_stripe_mode")]
    pub stripe_mode: String,

    #[serde(default = "default_mock_behavior")]
    pub stripe_mock_behavior: String,

    #[serde(default = "default_charge_timeout_secs")]
    pub charge_timeout_secs: u64,

    pub lifecycle_webhook_url: Option<String>,

    pub lifecycle_webhook_secret: Option<String>,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_stripe_api_base() -> String {
    "https://api.stripe.com".to_string()
}

fn default_stripe_mode() -> String {
    "live".to_string()
}

fn default_mock_behavior() -> String {
    "succeed".to_string()
}

/// A declined or timed-out charge is terminal either way; 30 seconds bounds
/// how long a checkout submission can hang on the gateway.
fn default_charge_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Parse environment variables into Config struct
        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }
}
