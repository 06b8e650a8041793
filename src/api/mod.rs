//! REST API.
//!
//! ## Endpoints
//!
//! - `GET /health` - liveness and classifier summary
//! - `POST /predict_frame` - classify a frame and coach the requested pose
//! - `POST /track_diet` - diet analysis
//! - `POST /track_sleep` - sleep analysis
//! - `POST /api/health_status` - BMI and weight status
//! - `POST /api/nutrition_recommendation` - caloric and macro plan

pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use dto::*;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/predict_frame", post(handlers::predict_frame))
        .route("/track_diet", post(handlers::track_diet))
        .route("/track_sleep", post(handlers::track_sleep))
        .route("/api/health_status", post(handlers::health_status))
        .route(
            "/api/nutrition_recommendation",
            post(handlers::nutrition_recommendation),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
