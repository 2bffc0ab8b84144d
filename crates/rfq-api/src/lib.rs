//! RFQ API - HTTP surface for the upload → extract → suggest workflow
//!
//! Provides REST endpoints for:
//! - File upload and solicitation registration
//! - Field extraction and manual edits
//! - Price-band suggestions and the audit trail

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use extract::ApiJson;
pub use state::AppState;

/// Build the application router.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/upload", post(handlers::upload))
        .route(
            "/api/solicitations",
            get(handlers::list_solicitations).post(handlers::create_solicitation),
        )
        .route(
            "/api/solicitations/:id",
            get(handlers::get_solicitation).put(handlers::update_solicitation),
        )
        .route("/api/solicitations/:id/extract", post(handlers::extract))
        .route("/api/solicitations/:id/suggest", post(handlers::suggest))
        .route(
            "/api/solicitations/:id/suggestions",
            get(handlers::suggestions),
        )
        .route("/api/solicitations/:id/audit", get(handlers::audit))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
