//! User Service Library
//!
//! HTTP service for creating, fetching and updating user accounts. Records
//! live in Postgres; reads go through a Redis cache that is populated on a
//! miss and invalidated on every successful update.

pub mod cache;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod infra;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cache::RedisUserCache;
use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::routes::create_router;
use crate::service::UserManager;
use crate::state::AppState;

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    db.close().await?;
    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run the HTTP server with the given configuration until a shutdown signal.
pub async fn run_server(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize backends
    let db = Database::connect(&config.database).await?;
    let cache = Arc::new(RedisUserCache::connect(&config.cache).await?);

    // Create repository and service
    let store = Arc::new(UserStore::new(db.get_connection(), config.database.timeout()));
    let user_service = Arc::new(UserManager::new(
        store.clone(),
        cache.clone(),
        config.password_policy.clone(),
    ));

    let state = AppState::new(user_service, store, cache);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = config.server.addr().parse()?;
    info!("User service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, closing database pool");
    db.close().await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
