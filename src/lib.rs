//! Rabbit Storefront Library
//!
//! Server side: the REST API over rabbit listings and user accounts.
//! Client side: the typed API client, auth session and view logic used by
//! the `petshop` binary.

pub mod client;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;
pub mod store;

pub use config::Config;
pub use error::{AppError, AuthError, Result};
pub use store::{MemoryStore, PgStore, Store};

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use constants::UPLOADS_PATH;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given store and configuration
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self { store, config }
    }
}

/// Build the full router: API routes, upload serving, body limit, CORS and tracing
pub fn build_router(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config.upload_dir);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(routes::health_check))
        .route("/api/upload", post(routes::upload_file))
        .route(
            "/api/rabbits",
            get(routes::list_rabbits).post(routes::create_rabbit),
        )
        .route(
            "/api/rabbits/:id",
            get(routes::get_rabbit)
                .put(routes::update_rabbit)
                .delete(routes::delete_rabbit),
        )
        .route("/api/users", get(routes::list_users))
        .route(
            "/api/users/:id",
            get(routes::get_user)
                .put(routes::update_user)
                .delete(routes::delete_user),
        )
        .route(
            "/api/users/:id/profile-image",
            post(routes::update_profile_image),
        )
        .route("/api/register", post(routes::register_user))
        .route("/api/login", post(routes::login_user))
        .nest_service(UPLOADS_PATH, uploads)
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured browser origins
fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}
