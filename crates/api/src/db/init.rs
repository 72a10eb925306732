//! Startup schema bootstrap for the two stores.
//!
//! Each store is initialized independently with create-if-absent semantics:
//! an existing schema is left untouched, a missing one is created, and
//! nothing is ever dropped or migrated. Initialization failure is caught
//! broadly and reported instead of aborting the process - the service then
//! starts degraded, and every operation against the failed store keeps
//! failing until connectivity returns. The other store is unaffected.

use sqlx::PgPool;
use thiserror::Error;

use dualstore_core::{Customer, Order};

use super::entity::StoreEntity;
use crate::state::AppState;

/// Why a store failed to initialize.
///
/// The distinction only drives reporting; neither class aborts startup.
#[derive(Debug, Error)]
pub enum InitError {
    /// The store could not be reached at all.
    #[error("store unreachable: {0}")]
    Unreachable(sqlx::Error),

    /// The store answered but schema creation failed.
    #[error("schema initialization failed: {0}")]
    Schema(sqlx::Error),
}

impl InitError {
    fn classify(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Unreachable(error),
            other => Self::Schema(other),
        }
    }
}

/// Ensure the table for one entity exists in its store.
///
/// # Errors
///
/// Returns [`InitError::Unreachable`] when the store cannot be reached and
/// [`InitError::Schema`] for any other failure.
pub async fn ensure_schema<E: StoreEntity>(pool: &PgPool) -> Result<(), InitError> {
    sqlx::query(E::CREATE_TABLE)
        .execute(pool)
        .await
        .map_err(InitError::classify)?;
    tracing::info!(store = E::STORE.name(), table = E::TABLE, "schema ready");
    Ok(())
}

/// Initialize both stores, tolerating failure of either.
///
/// Failures are logged with an operator hint and the process continues in a
/// degraded state. One store failing never blocks the other's
/// initialization.
pub async fn initialize_stores(state: &AppState) {
    init_store::<Customer>(state).await;
    init_store::<Order>(state).await;
}

async fn init_store<E: StoreEntity>(state: &AppState) {
    match ensure_schema::<E>(state.pool(E::STORE)).await {
        Ok(()) => {}
        Err(error @ InitError::Unreachable(_)) => {
            tracing::error!(
                store = E::STORE.name(),
                error = %error,
                "store unreachable during initialization; service starts degraded \
                 and operations against this store will fail until connectivity \
                 is restored. Hint: check the connection string and database \
                 availability"
            );
        }
        Err(error) => {
            tracing::error!(
                store = E::STORE.name(),
                error = %error,
                "schema initialization failed; service starts degraded and \
                 operations against this store will fail until the cause is \
                 resolved"
            );
        }
    }
}
