//! Portal configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PORTAL_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//! - `PORTAL_ADMIN_USER` - Admin report username
//! - `PORTAL_ADMIN_PASS` - Admin report password
//!
//! ## Optional
//! - `PORTAL_HOST` - Bind address (default: 127.0.0.1)
//! - `PORTAL_PORT` - Listen port (default: 3000)
//! - `PORTAL_MAX_TICKETS_PER_ORDER` - Per-order quantity cap (default: 10)
//!
//! Admin credentials are injected here rather than compiled in; there is no
//! default value for either.

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Default per-order quantity cap.
const DEFAULT_MAX_TICKETS_PER_ORDER: u32 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Portal application configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Admin report credentials
    pub admin: AdminConfig,
    /// Checkout pipeline policy knobs
    pub checkout: CheckoutPolicy,
}

/// Injected admin report credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminConfig {
    /// Expected `x-admin-user` header value
    pub username: String,
    /// Expected `x-admin-pass` header value
    pub password: SecretString,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Tunable policy for the checkout pipeline.
#[derive(Debug, Clone)]
pub struct CheckoutPolicy {
    /// Maximum total requested quantity per order.
    pub max_tickets_per_order: u32,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            max_tickets_per_order: DEFAULT_MAX_TICKETS_PER_ORDER,
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("PORTAL_DATABASE_URL")?;
        let host = get_env_or_default("PORTAL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORTAL_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("PORTAL_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORTAL_PORT".to_owned(), e.to_string()))?;

        let admin = AdminConfig {
            username: get_required_env("PORTAL_ADMIN_USER")?,
            password: SecretString::from(get_required_env("PORTAL_ADMIN_PASS")?),
        };

        let max_tickets_per_order = get_env_or_default(
            "PORTAL_MAX_TICKETS_PER_ORDER",
            &DEFAULT_MAX_TICKETS_PER_ORDER.to_string(),
        )
        .parse::<u32>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("PORTAL_MAX_TICKETS_PER_ORDER".to_owned(), e.to_string())
        })?;

        Ok(Self {
            database_url,
            host,
            port,
            admin,
            checkout: CheckoutPolicy {
                max_tickets_per_order,
            },
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_owned()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
