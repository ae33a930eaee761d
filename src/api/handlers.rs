use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::json;
use tracing::warn;

use crate::api::state::AppState;
use crate::api::types::*;
use crate::encoder::{ClaimsInput, WastageInput};
use crate::error::FoodcastError;
use crate::predictor::{ClaimsPredictor, WastagePredictor};

type Rejection = (StatusCode, Json<ErrorResponse>);

/// POST /api/predict/wastage
pub async fn predict_wastage(
    State(state): State<AppState>,
    Json(req): Json<WastageRequest>,
) -> std::result::Result<Json<WastageResponse>, Rejection> {
    let input = WastageInput {
        days_until_expiry: req.days_until_expiry,
        is_perishable: req.is_perishable,
    };

    let prediction = WastagePredictor::new(&state.artifacts.wastage)
        .predict(&input)
        .map_err(|e| reject(e, json!(req)))?;

    Ok(Json(WastageResponse {
        display: prediction.display_units(),
        predicted_units: prediction.predicted_units,
        risk_level: prediction.risk,
        headline: prediction.risk.headline(),
        recommended_actions: prediction.risk.recommended_actions(),
        features: prediction.features,
        scaled_features: prediction.scaled_features,
    }))
}

/// POST /api/predict/claims
pub async fn predict_claims(
    State(state): State<AppState>,
    Json(req): Json<ClaimsRequest>,
) -> std::result::Result<Json<ClaimsResponse>, Rejection> {
    let input = ClaimsInput {
        quantity_listed: req.quantity_listed,
        city: req.city.clone(),
        provider_type: req.provider_type.clone(),
    };

    let prediction = ClaimsPredictor::new(&state.artifacts.claims)
        .predict(&input)
        .map_err(|e| reject(e, json!(req)))?;

    Ok(Json(ClaimsResponse {
        display: prediction.display_quantity(),
        predicted_quantity: prediction.predicted_quantity,
        features: prediction.features,
    }))
}

/// GET /api/model/wastage
pub async fn wastage_model_info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let metadata = &state.artifacts.wastage.metadata;
    Json(ModelInfoResponse {
        algorithm: metadata.model_type.clone(),
        training_date: metadata.training_date.clone(),
        features: metadata.features.clone(),
        training_score: metadata.training_score,
    })
}

/// GET /api/examples/wastage
pub async fn wastage_examples() -> Json<Vec<ExampleRow>> {
    Json(example_rows())
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        uptime_seconds: state.uptime_seconds().max(0) as u64,
        wastage_model_features: state.artifacts.wastage.model.input_dim,
        claims_model_features: state.artifacts.claims.0.input_dim,
    })
}

/// GET /healthz - liveness probe: is the process alive?
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

fn reject(err: FoodcastError, input: serde_json::Value) -> Rejection {
    let status = match &err {
        FoodcastError::Validation(_)
        | FoodcastError::UnknownCategory { .. }
        | FoodcastError::SchemaMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(%err, %input, "prediction request rejected");
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            input,
        }),
    )
}
