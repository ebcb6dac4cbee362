//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::PortalConfig;

/// Cheaply cloneable handle to the portal's shared resources.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<StateInner>,
}

struct StateInner {
    config: PortalConfig,
    pool: PgPool,
}

impl AppState {
    /// Bundle the loaded config and the connection pool.
    #[must_use]
    pub fn new(config: PortalConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(StateInner { config, pool }),
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// The Postgres connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }
}
