pub mod employer;
pub mod health;
pub mod vacancy;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/fetch", get(vacancy::fetch))
        .route("/analyze", get(vacancy::analyze))
        .route("/salary-validation", get(vacancy::salary_validation))
        .route("/employer-marks", get(vacancy::employer_marks))
        .route("/employer-ratings", get(employer::employer_ratings))
        .route("/cache/info", get(employer::cache_info))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
