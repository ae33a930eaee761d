//! Standard-score feature scaling.
//!
//! The scaler is fitted by the out-of-scope training pipeline and shipped
//! inside the wastage bundle; here it only transforms.

use serde::{Deserialize, Serialize};

use crate::error::{FoodcastError, Result};

/// Pre-fitted z-score scaler: `z = (x - mean) / std`, column-wise.
///
/// `mean`/`std` are `None` when the scaler was serialized before fitting;
/// such a scaler cannot transform and fails structural validation at load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    #[serde(default)]
    pub std: Option<Vec<f64>>,
}

impl StandardScaler {
    pub fn fitted(mean: Vec<f64>, std: Vec<f64>) -> Self {
        Self {
            mean: Some(mean),
            std: Some(std),
        }
    }

    /// A fitted pass-through scaler (mean 0, std 1).
    ///
    /// WARNING: This is NOT a trained scaler. Use only for testing.
    pub fn identity(dim: usize) -> Self {
        Self::fitted(vec![0.0; dim], vec![1.0; dim])
    }

    /// Whether the scaler carries fitted state and can transform.
    pub fn is_fitted(&self) -> bool {
        self.mean.is_some() && self.std.is_some()
    }

    /// Number of feature columns the scaler was fitted on.
    pub fn dim(&self) -> Option<usize> {
        self.mean.as_ref().map(|m| m.len())
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        let (mean, std) = match (&self.mean, &self.std) {
            (Some(mean), Some(std)) => (mean, std),
            (None, None) => return Ok(()),
            _ => return Err("mean and std must be provided together".to_string()),
        };
        if mean.len() != std.len() {
            return Err(format!(
                "mean length {} != std length {}",
                mean.len(),
                std.len()
            ));
        }
        if mean.is_empty() {
            return Err("fitted scaler must cover at least one column".to_string());
        }
        if std.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err("std must be finite and > 0".to_string());
        }
        if mean.iter().any(|v| !v.is_finite()) {
            return Err("mean must be finite".to_string());
        }
        Ok(())
    }

    /// Transform a single feature vector.
    pub fn transform(&self, input: &[f64]) -> Result<Vec<f64>> {
        let (mean, std) = match (&self.mean, &self.std) {
            (Some(mean), Some(std)) => (mean, std),
            _ => {
                return Err(FoodcastError::NotFitted(
                    "scaler has no fitted mean/std".to_string(),
                ))
            }
        };
        if input.len() != mean.len() {
            return Err(FoodcastError::SchemaMismatch {
                expected: format!("{} features", mean.len()),
                got: format!("{} features", input.len()),
            });
        }

        Ok(input
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let denom = std[i].max(1e-12);
                (x - mean[i]) / denom
            })
            .collect())
    }
}
