//! End-to-end tests: artifact files on disk through the HTTP surface.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use foodcast::api::{create_router, AppState};
use foodcast::artifact::{ArtifactStore, ClaimsModel, ModelMetadata, WastageBundle};
use foodcast::error::FoodcastError;
use foodcast::ml::{DenseRegressor, StandardScaler};
use foodcast::{RiskLevel, WastageInput, WastagePredictor};

fn stub_bundle(predicted: f64) -> WastageBundle {
    WastageBundle {
        model: DenseRegressor::constant(2, predicted),
        scaler: StandardScaler::identity(2),
        metadata: ModelMetadata {
            features: vec!["Days_Until_Expiry".to_string(), "Is_Perishable".to_string()],
            model_type: "DenseRegressor".to_string(),
            training_date: "2025-11-02".to_string(),
            training_score: Some(0.87),
        },
    }
}

fn stub_store(wastage_predicted: f64, claims_model: DenseRegressor) -> Arc<ArtifactStore> {
    Arc::new(ArtifactStore {
        wastage: stub_bundle(wastage_predicted),
        claims: ClaimsModel(claims_model),
    })
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn wastage_endpoint_high_risk_scenario() {
    let state = AppState::new(stub_store(12.5, DenseRegressor::linear(vec![1.0; 5], 0.0)));
    let app = create_router(state);

    let (status, body) = post_json(
        app,
        "/api/predict/wastage",
        json!({"days_until_expiry": 2, "is_perishable": true}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display"], "12.50 units");
    assert_eq!(body["risk_level"], "high");
    assert_eq!(body["features"], json!([2.0, 1.0]));
    assert_eq!(
        body["headline"],
        "High wastage risk! Prioritize immediate redistribution."
    );
    assert_eq!(body["recommended_actions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn wastage_endpoint_low_risk_scenario() {
    let state = AppState::new(stub_store(3.2, DenseRegressor::linear(vec![1.0; 5], 0.0)));
    let app = create_router(state);

    let (status, body) = post_json(
        app,
        "/api/predict/wastage",
        json!({"days_until_expiry": 5, "is_perishable": false}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display"], "3.20 units");
    assert_eq!(body["risk_level"], "low");
    assert_eq!(body["features"], json!([5.0, 0.0]));
}

#[tokio::test]
async fn wastage_endpoint_rejects_out_of_range_days_and_echoes_input() {
    let state = AppState::new(stub_store(1.0, DenseRegressor::linear(vec![1.0; 5], 0.0)));
    let app = create_router(state);

    let (status, body) = post_json(
        app,
        "/api/predict/wastage",
        json!({"days_until_expiry": 31, "is_perishable": true}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["input"]["days_until_expiry"], 31);
    assert!(body["error"].as_str().unwrap().contains("out of range"));
}

#[tokio::test]
async fn claims_endpoint_rounds_display_to_two_decimals() {
    // One-hot [5,0,1,0,1] summed with bias 0.456 → 7.456
    let state = AppState::new(stub_store(1.0, DenseRegressor::linear(vec![1.0; 5], 0.456)));
    let app = create_router(state);

    let (status, body) = post_json(
        app,
        "/api/predict/claims",
        json!({"quantity_listed": 5, "city": "Delhi", "provider_type": "Restaurant"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["features"], json!([5.0, 0.0, 1.0, 0.0, 1.0]));
    assert_eq!(body["display"], "7.46");
    assert!((body["predicted_quantity"].as_f64().unwrap() - 7.456).abs() < 1e-9);
}

#[tokio::test]
async fn claims_endpoint_rejects_unknown_city() {
    let state = AppState::new(stub_store(1.0, DenseRegressor::linear(vec![1.0; 5], 0.0)));
    let app = create_router(state);

    let (status, body) = post_json(
        app,
        "/api/predict/claims",
        json!({"quantity_listed": 5, "city": "Pune", "provider_type": "Individual"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["input"]["city"], "Pune");
    assert!(body["error"].as_str().unwrap().contains("Unknown category"));
}

#[tokio::test]
async fn model_info_reflects_bundle_metadata() {
    let state = AppState::new(stub_store(1.0, DenseRegressor::linear(vec![1.0; 5], 0.0)));
    let app = create_router(state);

    let (status, body) = get_json(app, "/api/model/wastage").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["algorithm"], "DenseRegressor");
    assert_eq!(
        body["features"],
        json!(["Days_Until_Expiry", "Is_Perishable"])
    );
    assert_eq!(body["training_score"], 0.87);
}

#[tokio::test]
async fn examples_table_matches_reference_rows() {
    let state = AppState::new(stub_store(1.0, DenseRegressor::linear(vec![1.0; 5], 0.0)));
    let app = create_router(state);

    let (status, body) = get_json(app, "/api/examples/wastage").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["predicted_wastage"], "12.5 units");
    assert_eq!(rows[0]["risk"], "High");
}

#[tokio::test]
async fn health_reports_artifact_dimensions() {
    let state = AppState::new(stub_store(1.0, DenseRegressor::linear(vec![1.0; 5], 0.0)));
    let app = create_router(state);

    let (status, body) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["wastage_model_features"], 2);
    assert_eq!(body["claims_model_features"], 5);
}

#[test]
fn bundle_file_roundtrip_through_prediction() {
    let bundle = stub_bundle(12.5);
    let path = "/tmp/foodcast_e2e_bundle.json";
    std::fs::write(path, serde_json::to_string_pretty(&bundle).unwrap()).unwrap();

    let loaded = WastageBundle::load(path).expect("Failed to load bundle");
    let prediction = WastagePredictor::new(&loaded)
        .predict(&WastageInput {
            days_until_expiry: 2,
            is_perishable: true,
        })
        .unwrap();

    assert_eq!(prediction.features, vec![2.0, 1.0]);
    assert_eq!(prediction.risk, RiskLevel::High);
    assert_eq!(prediction.display_units(), "12.50 units");

    std::fs::remove_file(path).ok();
}

#[test]
fn missing_artifact_halts_before_any_prediction() {
    let err = WastageBundle::load("/tmp/foodcast_e2e_missing.json").unwrap_err();
    assert!(matches!(err, FoodcastError::ArtifactNotFound { .. }));
    assert!(err.is_fatal());
}
