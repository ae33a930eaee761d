//! Artifact loading and structural validation.
//!
//! Artifacts are produced by an out-of-scope training pipeline and read once
//! at startup. Validation happens entirely up front: a bundle that decodes
//! but fails the structural check is rejected before any request is served.
//!
//! Failure taxonomy:
//! - `ArtifactNotFound`: the path does not resolve.
//! - `ArtifactCorrupt`: the file is not valid JSON at all.
//! - `ArtifactMalformed`: valid JSON that is missing required keys, fails
//!   typed deserialization, or carries an unfitted model/scaler.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::error::{FoodcastError, Result};
use crate::ml::{DenseRegressor, StandardScaler};

/// Training-time metadata carried inside a wastage bundle. Read-only; used
/// for display and for ordering the input vector to match `features`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Feature column names, in training order.
    pub features: Vec<String>,
    pub model_type: String,
    pub training_date: String,
    #[serde(default)]
    pub training_score: Option<f64>,
}

/// The wastage artifact: model + scaler + metadata in one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WastageBundle {
    pub model: DenseRegressor,
    pub scaler: StandardScaler,
    pub metadata: ModelMetadata,
}

const BUNDLE_KEYS: [&str; 3] = ["model", "scaler", "metadata"];

impl WastageBundle {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let value = read_json(path)?;

        let obj = value.as_object().ok_or_else(|| {
            FoodcastError::ArtifactMalformed("bundle is not a JSON object".to_string())
        })?;
        let missing: Vec<&str> = BUNDLE_KEYS
            .iter()
            .copied()
            .filter(|k| !obj.contains_key(*k))
            .collect();
        if !missing.is_empty() {
            return Err(FoodcastError::ArtifactMalformed(format!(
                "missing keys in bundle: {}",
                missing.join(", ")
            )));
        }

        let bundle: Self = serde_json::from_value(value)
            .map_err(|e| FoodcastError::ArtifactMalformed(e.to_string()))?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Structural-conformance check against the interface contract: the
    /// model must be able to predict and the scaler must be able to
    /// transform, on matching dimensions.
    pub fn validate(&self) -> Result<()> {
        self.model
            .validate()
            .map_err(FoodcastError::ArtifactMalformed)?;
        if !self.model.is_fitted() {
            return Err(FoodcastError::ArtifactMalformed(
                "model carries no fitted layers".to_string(),
            ));
        }
        if self.model.output_dim() != 1 {
            return Err(FoodcastError::ArtifactMalformed(format!(
                "model output has {} elements, expected a scalar",
                self.model.output_dim()
            )));
        }

        self.scaler
            .validate()
            .map_err(FoodcastError::ArtifactMalformed)?;
        if !self.scaler.is_fitted() {
            return Err(FoodcastError::ArtifactMalformed(
                "scaler is not fitted and cannot transform".to_string(),
            ));
        }
        if self.scaler.dim() != Some(self.model.input_dim) {
            return Err(FoodcastError::ArtifactMalformed(format!(
                "scaler covers {:?} columns but model expects {}",
                self.scaler.dim(),
                self.model.input_dim
            )));
        }

        if self.metadata.features.len() != self.model.input_dim {
            return Err(FoodcastError::ArtifactMalformed(format!(
                "metadata lists {} features but model expects {}",
                self.metadata.features.len(),
                self.model.input_dim
            )));
        }
        Ok(())
    }
}

/// The claims artifact: a bare serialized predictor, no wrapping structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimsModel(pub DenseRegressor);

impl ClaimsModel {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let value = read_json(path.as_ref())?;
        let model: DenseRegressor = serde_json::from_value(value)
            .map_err(|e| FoodcastError::ArtifactMalformed(e.to_string()))?;
        model
            .validate()
            .map_err(FoodcastError::ArtifactMalformed)?;
        if !model.is_fitted() {
            return Err(FoodcastError::ArtifactMalformed(
                "model carries no fitted layers".to_string(),
            ));
        }
        if model.output_dim() != 1 {
            return Err(FoodcastError::ArtifactMalformed(format!(
                "model output has {} elements, expected a scalar",
                model.output_dim()
            )));
        }
        Ok(Self(model))
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(FoodcastError::ArtifactNotFound {
                path: path.display().to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&raw)
        .map_err(|e| FoodcastError::ArtifactCorrupt(format!("{}: {e}", path.display())))
}

/// Both artifacts, loaded once at startup and shared read-only for the
/// process lifetime. There is no invalidation or refresh without a restart.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    pub wastage: WastageBundle,
    pub claims: ClaimsModel,
}

impl ArtifactStore {
    pub fn load(config: &AppConfig) -> Result<Arc<Self>> {
        let wastage = WastageBundle::load(&config.artifacts.wastage_path)?;
        info!(
            path = %config.artifacts.wastage_path,
            model_type = %wastage.metadata.model_type,
            features = wastage.model.input_dim,
            "loaded wastage bundle"
        );

        let claims = ClaimsModel::load(&config.artifacts.claims_path)?;
        info!(
            path = %config.artifacts.claims_path,
            features = claims.0.input_dim,
            "loaded claims model"
        );

        Ok(Arc::new(Self { wastage, claims }))
    }
}
