//! The contract between an entity type and its backing store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, Postgres};

use crate::db::Store;

/// A `SELECT`-shaped query returning rows of `T`.
pub type PgQueryAs<'q, T> = sqlx::query::QueryAs<'q, Postgres, T, PgArguments>;

/// A statement-shaped query returning no rows.
pub type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// Binds an entity type to one of the two stores.
///
/// The repository and request handler are generic over this trait; the two
/// entity pipelines share all of their control flow and differ only in what
/// an implementation provides here: SQL text, bind order, validation rules,
/// and which store owns the table.
///
/// SQL contract an implementation must uphold:
/// - `CREATE_TABLE` uses `CREATE TABLE IF NOT EXISTS` (initialization is
///   create-if-absent, never destructive).
/// - `INSERT` returns the persisted row (`RETURNING`), excluding
///   `row_version`.
/// - `UPDATE` sets the mutable columns (bound by [`bind_update`]) and bumps
///   `row_version`, keyed by `id` and the expected `row_version` as the last
///   two placeholders. The server-assigned timestamp column is immutable
///   after insert and must not appear in the `SET` list.
/// - `SELECT_VERSION` returns the current `row_version` for an id.
///
/// [`bind_update`]: StoreEntity::bind_update
pub trait StoreEntity:
    Serialize + DeserializeOwned + for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static
{
    /// The entity's ID newtype.
    type Id: Copy + Eq + std::fmt::Display + From<i32> + Into<i32> + Send + Sync + 'static;

    /// Which of the two stores owns this entity.
    const STORE: Store;
    /// Table name within the owning store.
    const TABLE: &'static str;
    /// Base path of the entity's API collection, e.g. `/api/Orders`.
    const API_PATH: &'static str;

    const CREATE_TABLE: &'static str;
    const SELECT_ALL: &'static str;
    const SELECT_BY_ID: &'static str;
    const SELECT_VERSION: &'static str;
    const EXISTS: &'static str;
    const INSERT: &'static str;
    const UPDATE: &'static str;
    const DELETE: &'static str;

    /// The identity carried in the payload (zero if the client omitted it).
    fn id(&self) -> Self::Id;

    /// Overwrite the server-assigned timestamp with `now`.
    ///
    /// Called by the handler on every create; any client-supplied value is
    /// discarded. This is not optional and not configurable per request.
    fn stamp(&mut self, now: DateTime<Utc>);

    /// Field-level validation applied to creation payloads only.
    ///
    /// Returns the human-readable rejection reason for the client. Replace
    /// requests are not re-validated here; they rely on the store's
    /// constraints, matching the create/replace asymmetry of the API.
    fn validate_create(&self) -> Result<(), &'static str>;

    /// Bind the insertable columns, in `INSERT` placeholder order.
    fn bind_insert<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self>;

    /// Bind the mutable columns, in `UPDATE` placeholder order.
    ///
    /// The repository appends the `id` and expected `row_version` binds.
    fn bind_update<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;
}
