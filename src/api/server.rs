//! HTTP server assembly

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::{timeout::TimeoutLayer, BoxError, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::api::{handlers, server_config::*, state::AppState};
use crate::auth::{create_auth_routes, MemoryUserStorage, SqliteUserStorage};
use crate::config::AppConfig;
use crate::goals::{create_goal_routes, MemoryGoalStorage, SqliteGoalStorage};
use crate::storage;

/// Build the full application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(CORS_MAX_AGE);

    Router::new()
        .route("/api/health", get(handlers::health_check))
        .merge(create_auth_routes(state.clone()))
        .merge(create_goal_routes(state.clone()))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Turn timeout errors into responses
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    if err.is::<tower::timeout::error::Elapsed>() {
                        (StatusCode::REQUEST_TIMEOUT, "request timed out")
                    } else {
                        (StatusCode::INTERNAL_SERVER_ERROR, "unhandled middleware error")
                    }
                }))
                .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(TraceLayer::new_for_http()),
        )
        .layer(cors)
}

/// Configured server, ready to bind
pub struct ApiServer {
    pub host: String,
    pub port: u16,
    state: AppState,
    pool: Option<SqlitePool>,
}

impl ApiServer {
    /// Open the stores named by `config.database_url` and wire the services.
    ///
    /// Fails before anything binds if the signing secret or the database is
    /// unusable.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let (state, pool) = if config.uses_memory_storage() {
            info!("Using in-memory stores; data is lost on exit");
            let state = AppState::new(
                Arc::new(MemoryUserStorage::new()),
                Arc::new(MemoryGoalStorage::new()),
                config,
            )?;
            (state, None)
        } else {
            let pool = storage::connect(&config.database_url).await?;
            let state = AppState::new(
                Arc::new(SqliteUserStorage::new(pool.clone())),
                Arc::new(SqliteGoalStorage::new(pool.clone())),
                config,
            )?;
            (state, Some(pool))
        };

        Ok(Self {
            host: config.host.clone(),
            port: config.port,
            state,
            pool,
        })
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Serve until Ctrl-C.
    pub async fn start(self) -> anyhow::Result<()> {
        let app = self.router();
        let addr = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&addr).await?;
        info!("Server listening on {}", addr);

        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        if let Some(pool) = &self.pool {
            storage::close(pool).await;
        }
        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
