use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Prediction endpoints
        .route("/api/predict/wastage", post(handlers::predict_wastage))
        .route("/api/predict/claims", post(handlers::predict_claims))
        // Model info endpoints
        .route("/api/model/wastage", get(handlers::wastage_model_info))
        .route("/api/examples/wastage", get(handlers::wastage_examples))
        // Health endpoints
        .route("/health", get(handlers::health))
        .route("/healthz", get(handlers::liveness))
        // Add state and CORS
        .with_state(state)
        .layer(cors)
}
