//! Database operations for the two entity stores.
//!
//! # Databases
//!
//! Each entity family lives in its own `PostgreSQL` database:
//!
//! - customer store (`CUSTOMER_DATABASE_URL`) - `customers` table
//! - order store (`ORDER_DATABASE_URL`) - `orders` table
//!
//! The stores are deliberately siloed: no cross-store transactions, joins, or
//! foreign keys. A failure in one store must never block operations on the
//! other, which is why each gets its own pool and its own initialization
//! pass (see [`init`]).
//!
//! # Schema
//!
//! Tables are created on startup with create-if-absent semantics; there is no
//! migration tooling. Each table carries a `row_version` column used as the
//! concurrency token for conditioned updates. It is internal to the store
//! layer and never appears on the wire.

pub mod customers;
pub mod entity;
pub mod init;
pub mod orders;
pub mod repository;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use entity::StoreEntity;
pub use repository::Repository;

/// The two backing stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    Customer,
    Order,
}

impl Store {
    /// Human-readable store name, used in log output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Customer => "customer store",
            Self::Order => "order store",
        }
    }
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// The row still exists but was modified by a concurrent writer.
    #[error("concurrency conflict: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The pool connects lazily: construction succeeds even when the store is
/// unreachable, so a down database degrades the service instead of aborting
/// startup. The first operation against the store surfaces the connection
/// error.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string cannot be parsed.
pub fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy(database_url.expose_secret())
}
