//! Request handlers for the two entity pipelines.
//!
//! One generic handler sits between the transport adapter and the
//! repository. It owns field-level validation and the server-assigned
//! fields, and translates repository outcomes into [`ApiError`]. It returns
//! plain values - no framework types - so the transport binding stays a thin
//! external layer.

use chrono::Utc;
use sqlx::PgPool;

use crate::db::{Repository, StoreEntity};
use crate::error::ApiError;
use crate::state::AppState;

/// Outcome of a successful create: the persisted entity (including its
/// store-generated identity) plus the location of its Get endpoint.
#[derive(Debug)]
pub struct Created<E> {
    pub entity: E,
    pub location: String,
}

/// Request handler for one entity type.
pub struct EntityHandler<'a, E: StoreEntity> {
    repo: Repository<'a, E>,
}

impl<'a, E: StoreEntity> EntityHandler<'a, E> {
    /// Create a handler over the given store pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            repo: Repository::new(pool),
        }
    }

    /// Create a handler over the entity's store within the shared state.
    #[must_use]
    pub fn for_state(state: &'a AppState) -> Self {
        Self::new(state.pool(E::STORE))
    }

    /// List the full collection.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Database` if the store operation fails.
    pub async fn list(&self) -> Result<Vec<E>, ApiError> {
        Ok(self.repo.list().await?)
    }

    /// Fetch a single entity.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no entity has this identity.
    pub async fn get(&self, id: E::Id) -> Result<E, ApiError> {
        self.repo.get(id).await?.ok_or(ApiError::NotFound)
    }

    /// Validate and persist a new entity.
    ///
    /// Any client-supplied timestamp is overwritten with the current UTC
    /// time before the insert; the store assigns the identity.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` with the rejection reason, or
    /// `ApiError::Database` if the insert fails.
    pub async fn create(&self, mut entity: E) -> Result<Created<E>, ApiError> {
        entity
            .validate_create()
            .map_err(|reason| ApiError::Validation(reason.to_string()))?;
        entity.stamp(Utc::now());

        let entity = self.repo.insert(&entity).await?;
        let location = format!("{}/{}", E::API_PATH, entity.id());
        Ok(Created { entity, location })
    }

    /// Replace the entity with the given identity.
    ///
    /// A payload whose identity disagrees with the path is rejected before
    /// the store is touched.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::IdMismatch`, `ApiError::NotFound` (the row is
    /// gone, including a concurrent delete), or `ApiError::Conflict` (the
    /// row still exists but changed underneath the write).
    pub async fn replace(&self, id: E::Id, entity: E) -> Result<(), ApiError> {
        if entity.id() != id {
            return Err(ApiError::IdMismatch);
        }
        Ok(self.repo.update(id, &entity).await?)
    }

    /// Delete the entity with the given identity.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no entity has this identity.
    pub async fn remove(&self, id: E::Id) -> Result<(), ApiError> {
        Ok(self.repo.delete(id).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dualstore_core::{Customer, CustomerId, Order, OrderId};
    use rust_decimal::Decimal;
    use secrecy::SecretString;
    use sqlx::PgPool;

    use super::*;

    /// A pool that would only fail on first use; the paths under test must
    /// return before any connection is attempted.
    fn untouched_pool() -> PgPool {
        crate::db::create_pool(&SecretString::from(
            "postgres://postgres@127.0.0.1:1/untouched",
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_replace_rejects_id_mismatch_before_the_store() {
        let pool = untouched_pool();
        let handler = EntityHandler::<Order>::new(&pool);

        let order = Order {
            id: OrderId::new(8),
            customer_id: CustomerId::new(5),
            product_name: "Widget".to_string(),
            amount: Decimal::new(1000, 2),
            order_date: None,
        };

        let result = handler.replace(OrderId::new(7), order).await;
        assert!(matches!(result, Err(ApiError::IdMismatch)));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_order_before_the_store() {
        let pool = untouched_pool();
        let handler = EntityHandler::<Order>::new(&pool);

        let order = Order {
            id: OrderId::default(),
            customer_id: CustomerId::new(0),
            product_name: "Widget".to_string(),
            amount: Decimal::new(1000, 2),
            order_date: None,
        };

        match handler.create(order).await {
            Err(ApiError::Validation(message)) => {
                assert_eq!(message, "Valid CustomerId is required.");
            }
            other => panic!("expected validation rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_customer_replace_id_mismatch() {
        let pool = untouched_pool();
        let handler = EntityHandler::<Customer>::new(&pool);

        let customer = Customer {
            id: CustomerId::new(4),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            created_date: None,
        };

        let result = handler.replace(CustomerId::new(3), customer).await;
        assert!(matches!(result, Err(ApiError::IdMismatch)));
    }
}
