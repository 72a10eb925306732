//! HTTP route adapters.
//!
//! Thin binding between axum and the request handlers - deserialization in,
//! status codes out, nothing else. Both entity families expose the same
//! surface:
//!
//! ```text
//! GET    /api/{Entity}s        - list all            (200 + array)
//! GET    /api/{Entity}s/{id}   - fetch one           (200 + entity | 404)
//! POST   /api/{Entity}s        - create              (201 + entity + Location | 400)
//! PUT    /api/{Entity}s/{id}   - replace             (204 | 400 | 404 | 500)
//! DELETE /api/{Entity}s/{id}   - remove              (204 | 404)
//!
//! GET    /health               - liveness
//! GET    /health/ready         - readiness (checks both stores)
//! ```

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use dualstore_core::{Customer, Order};

use crate::db::{Store, StoreEntity};
use crate::error::Result;
use crate::handlers::EntityHandler;
use crate::state::AppState;

/// Build the full application router.
pub fn router() -> Router<AppState> {
    let router = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness));
    let router = entity_routes::<Customer>(router);
    entity_routes::<Order>(router)
}

/// Register the CRUD surface for one entity family under its API path.
fn entity_routes<E: StoreEntity>(router: Router<AppState>) -> Router<AppState> {
    router
        .route(E::API_PATH, get(list::<E>).post(create::<E>))
        .route(
            &format!("{}/{{id}}", E::API_PATH),
            get(fetch::<E>).put(replace::<E>).delete(remove::<E>),
        )
}

async fn list<E: StoreEntity>(State(state): State<AppState>) -> Result<Json<Vec<E>>> {
    Ok(Json(EntityHandler::<E>::for_state(&state).list().await?))
}

async fn fetch<E: StoreEntity>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<E>> {
    let entity = EntityHandler::<E>::for_state(&state)
        .get(E::Id::from(id))
        .await?;
    Ok(Json(entity))
}

async fn create<E: StoreEntity>(
    State(state): State<AppState>,
    Json(entity): Json<E>,
) -> Result<impl IntoResponse> {
    let created = EntityHandler::<E>::for_state(&state).create(entity).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, created.location)],
        Json(created.entity),
    ))
}

async fn replace<E: StoreEntity>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(entity): Json<E>,
) -> Result<StatusCode> {
    EntityHandler::<E>::for_state(&state)
        .replace(E::Id::from(id), entity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove<E: StoreEntity>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    EntityHandler::<E>::for_state(&state)
        .remove(E::Id::from(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies connectivity to both stores before returning OK.
/// Returns 503 Service Unavailable if either store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    for store in [Store::Customer, Store::Order] {
        if sqlx::query("SELECT 1")
            .fetch_one(state.pool(store))
            .await
            .is_err()
        {
            return StatusCode::SERVICE_UNAVAILABLE;
        }
    }
    StatusCode::OK
}
