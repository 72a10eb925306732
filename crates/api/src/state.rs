//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::db::Store;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the two store pools. The pools are separate resources:
/// requests against the customer store never borrow connections from the
/// order pool, and vice versa.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    customer_pool: PgPool,
    order_pool: PgPool,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AppConfig, customer_pool: PgPool, order_pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                customer_pool,
                order_pool,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the connection pool for one of the two stores.
    #[must_use]
    pub fn pool(&self, store: Store) -> &PgPool {
        match store {
            Store::Customer => &self.inner.customer_pool,
            Store::Order => &self.inner.order_pool,
        }
    }
}
