use std::sync::Arc;

use axum::{http::StatusCode, middleware::from_fn, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::db::MovieStore;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

pub mod recommendations;

/// Shared router state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MovieStore>,
    pub reference_size: i64,
    pub candidate_size: i64,
}

impl AppState {
    pub fn new(store: Arc<dyn MovieStore>, config: &Config) -> Self {
        Self {
            store,
            reference_size: config.reference_size,
            candidate_size: config.candidate_size,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/recommendations", get(recommendations::recommend))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
