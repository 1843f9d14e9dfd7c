#![forbid(unsafe_code)]

//! HTTP API for a family tree: member and relationship CRUD, photo uploads, email/password
//! sessions, and the generational layout of the current tree.
//!
//! Reads are public; every mutation requires a signed-in session.

pub mod auth;
pub mod config;
pub mod error;
mod http;
mod middleware;
pub mod store;
pub mod uploads;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post, put};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tower_http::cors::CorsLayer;

pub use auth::AuthService;
pub use config::ServerConfig;
pub use error::ApiError;
pub use store::{MemoryStore, StoreError, TreeStore};
pub use uploads::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TreeStore>,
    pub auth: Arc<AuthService>,
    pub uploads: Arc<UploadStore>,
    pub config: Arc<ServerConfig>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(store: Arc<dyn TreeStore>, config: ServerConfig) -> Self {
        Self {
            store,
            auth: Arc::new(AuthService::new(config.session_ttl)),
            uploads: Arc::new(UploadStore::new(config.upload_dir.clone())),
            config: Arc::new(config),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }

    /// An empty in-memory tree.
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::new(Arc::new(MemoryStore::new()), config)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::healthz))
        .route(
            "/api/members",
            get(http::members::list).post(http::members::create),
        )
        .route(
            "/api/members/:id",
            put(http::members::update).delete(http::members::delete),
        )
        .route("/api/relationships", post(http::relationships::create))
        .route(
            "/api/relationships/:id",
            axum::routing::delete(http::relationships::delete),
        )
        .route("/api/layout", get(http::layout::layout))
        .route("/api/upload", post(http::uploads::upload))
        .route("/uploads/:name", get(http::uploads::serve))
        .route("/api/auth/sign-up/email", post(http::auth::sign_up))
        .route("/api/auth/sign-in/email", post(http::auth::sign_in))
        .route("/api/auth/sign-out", post(http::auth::sign_out))
        .route("/api/auth/get-session", get(http::auth::get_session))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(cors_layer(&state.config.cors_origin))
        .with_state(state)
}

/// Credentialed CORS for one browser origin, so the session cookie travels with cross-origin
/// requests.
fn cors_layer(origin: &str) -> CorsLayer {
    let origin = HeaderValue::from_str(origin).unwrap_or_else(|_| {
        tracing::warn!(origin, "invalid CORS origin, using {}", config::DEFAULT_CORS_ORIGIN);
        HeaderValue::from_static(config::DEFAULT_CORS_ORIGIN)
    });
    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}
