//! Generic repository over one entity store.
//!
//! One instance per entity type; all row-level consistency is delegated to
//! the backing store. The repository introduces no application-level locking
//! and never retries on its own.

use std::marker::PhantomData;

use sqlx::PgPool;

use super::entity::StoreEntity;
use super::RepositoryError;

/// Data-access boundary for one entity type.
pub struct Repository<'a, E> {
    pool: &'a PgPool,
    _entity: PhantomData<E>,
}

impl<'a, E: StoreEntity> Repository<'a, E> {
    /// Create a new repository over the given store pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// Return all rows, in whatever order the store provides.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(sqlx::query_as::<_, E>(E::SELECT_ALL)
            .fetch_all(self.pool)
            .await?)
    }

    /// Get a row by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: E::Id) -> Result<Option<E>, RepositoryError> {
        let key: i32 = id.into();
        Ok(sqlx::query_as::<_, E>(E::SELECT_BY_ID)
            .bind(key)
            .fetch_optional(self.pool)
            .await?)
    }

    /// Persist a new row and return it with its store-generated identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including
    /// store constraint violations such as over-length fields).
    pub async fn insert(&self, entity: &E) -> Result<E, RepositoryError> {
        Ok(entity
            .bind_insert(sqlx::query_as::<_, E>(E::INSERT))
            .fetch_one(self.pool)
            .await?)
    }

    /// Replace the row with the given ID, guarded by the concurrency token.
    ///
    /// The sequence is: read the row's current `row_version` (absent row is
    /// not found before any write is attempted), then issue a conditioned
    /// `UPDATE` keyed on both id and that version. Zero rows affected means a
    /// concurrent writer got there first; the existence re-check decides
    /// which way to report it:
    /// - row gone entirely -> `NotFound` (a delete raced in);
    /// - row still present -> `Conflict` (the row changed underneath us).
    ///
    /// A conflict is surfaced rather than resolved; retrying or merging here
    /// would risk silently discarding the concurrent writer's change.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound`, `RepositoryError::Conflict`, or
    /// `RepositoryError::Database` as described above.
    pub async fn update(&self, id: E::Id, entity: &E) -> Result<(), RepositoryError> {
        let key: i32 = id.into();
        let version: Option<i32> = sqlx::query_scalar(E::SELECT_VERSION)
            .bind(key)
            .fetch_optional(self.pool)
            .await?;
        let Some(version) = version else {
            return Err(RepositoryError::NotFound);
        };

        let result = entity
            .bind_update(sqlx::query(E::UPDATE))
            .bind(key)
            .bind(version)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            if self.exists(id).await? {
                return Err(RepositoryError::Conflict(format!(
                    "{} row {id} was modified concurrently",
                    E::TABLE
                )));
            }
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete the row with the given ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such row exists, or
    /// `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: E::Id) -> Result<(), RepositoryError> {
        let key: i32 = id.into();
        let result = sqlx::query(E::DELETE)
            .bind(key)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Check whether a row with the given ID exists.
    ///
    /// Used to disambiguate a failed conditioned update: a missing row is a
    /// concurrent delete, a present one is a conflicting write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: E::Id) -> Result<bool, RepositoryError> {
        let key: i32 = id.into();
        Ok(sqlx::query_scalar::<_, bool>(E::EXISTS)
            .bind(key)
            .fetch_one(self.pool)
            .await?)
    }
}
