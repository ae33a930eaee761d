use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::predictor::RiskLevel;

/// POST /api/predict/wastage request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WastageRequest {
    pub days_until_expiry: u32,
    pub is_perishable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WastageResponse {
    /// Unrounded prediction, for further use by callers
    pub predicted_units: f64,
    /// Two-decimal display form, e.g. "12.50 units"
    pub display: String,
    pub risk_level: RiskLevel,
    pub headline: &'static str,
    pub recommended_actions: &'static [&'static str],
    /// Encoded input vector, in the bundle's training column order
    pub features: Vec<f64>,
    /// Vector after scaling, as passed to the model
    pub scaled_features: Vec<f64>,
}

/// POST /api/predict/claims request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimsRequest {
    pub quantity_listed: u32,
    pub city: String,
    pub provider_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClaimsResponse {
    pub predicted_quantity: f64,
    /// Two-decimal display form
    pub display: String,
    pub features: Vec<f64>,
}

/// GET /api/model/wastage response
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfoResponse {
    pub algorithm: String,
    pub training_date: String,
    pub features: Vec<String>,
    pub training_score: Option<f64>,
}

/// One row of the static example-predictions table
#[derive(Debug, Clone, Serialize)]
pub struct ExampleRow {
    pub days: u32,
    pub perishable: &'static str,
    pub predicted_wastage: &'static str,
    pub risk: &'static str,
}

pub fn example_rows() -> Vec<ExampleRow> {
    vec![
        ExampleRow {
            days: 2,
            perishable: "Yes",
            predicted_wastage: "12.5 units",
            risk: "High",
        },
        ExampleRow {
            days: 5,
            perishable: "No",
            predicted_wastage: "3.2 units",
            risk: "Low",
        },
        ExampleRow {
            days: 1,
            perishable: "Yes",
            predicted_wastage: "18.7 units",
            risk: "High",
        },
    ]
}

/// Per-request failure payload: the error plus the offending input echoed
/// back for debugging
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub input: serde_json::Value,
}

/// GET /health response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub wastage_model_features: usize,
    pub claims_model_features: usize,
}
