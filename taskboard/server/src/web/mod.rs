use axum::{Json, Router, http::{Method, header}, routing::get};
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::project::api::create_project_router;
use crate::tag::api::create_tag_router;
use crate::task::api::create_task_router;

pub mod api;
pub mod openapi;

/// Seconds a browser may cache a preflight response.
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86400);

/// State shared by the resource routers: the pooled database handle.
#[derive(Debug)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let server_address = config.server_address();
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let app = create_router(Arc::new(AppState::new(db)));
    axum::serve(listener, app).await?;
    Ok(())
}

/// CORS policy for every route. Any origin may call the API, and OPTIONS
/// requests are answered here without reaching a handler.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(PREFLIGHT_MAX_AGE)
}

/// Builds the full application router: the three resource routes plus
/// health and API documentation endpoints.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(create_project_router(state.clone()))
        .merge(create_tag_router(state.clone()))
        .merge(create_task_router(state))
        .route("/health", get(health_check_handler))
        .route("/api-docs/openapi.json", get(openapi_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

#[tracing::instrument]
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    use utoipa::OpenApi;
    Json(openapi::ApiDoc::openapi())
}
