//! Dualstore API - CRUD service over two siloed `PostgreSQL` stores.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - One `PostgreSQL` database per entity family (customers, orders),
//!   configured independently and never sharing a connection
//! - Create-if-absent schema bootstrap at startup; an unreachable store
//!   degrades the service instead of aborting it

#![cfg_attr(not(test), forbid(unsafe_code))]

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dualstore_api::config::AppConfig;
use dualstore_api::state::AppState;
use dualstore_api::{db, routes};

#[tokio::main]
async fn main() {
    // Load configuration from environment; a missing connection string is a
    // fatal configuration error.
    let config = AppConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dualstore_api=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Pools connect lazily: a down store must not abort startup.
    let customer_pool =
        db::create_pool(&config.customer_database_url).expect("Invalid CUSTOMER_DATABASE_URL");
    let order_pool =
        db::create_pool(&config.order_database_url).expect("Invalid ORDER_DATABASE_URL");
    tracing::info!("Store pools created");

    let state = AppState::new(config.clone(), customer_pool, order_pool);

    // Ensure both schemas exist; failures are logged and the service starts
    // degraded rather than crashing.
    db::init::initialize_stores(&state).await;

    // Build router
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
