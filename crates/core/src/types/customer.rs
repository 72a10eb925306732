//! Customer entity type.
//!
//! These types represent the wire and row shape of a customer record. The
//! customer store is the single owner of every persisted instance; the `api`
//! service never caches them across requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CustomerId;

/// A customer record.
///
/// Field semantics:
/// - `id` is assigned by the customer store on insert and immutable after.
/// - `name` and `email` are required and bounded to 200 characters by the
///   store schema.
/// - `created_date` is assigned by the server at insert time; any
///   client-supplied value is discarded. `None` marks a record that has not
///   been persisted yet.
///
/// Every field carries a serde default so a creation payload may omit the
/// server-assigned fields entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique customer ID, generated by the customer store.
    #[serde(default)]
    pub id: CustomerId,
    /// Customer display name.
    #[serde(default)]
    pub name: String,
    /// Customer email address.
    #[serde(default)]
    pub email: String,
    /// When the record was created (UTC, server-assigned).
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
}
