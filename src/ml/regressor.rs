//! Dense regression inference (CPU-only).
//!
//! Pre-fitted regressors are stored as JSON: a stack of dense layers that
//! degenerates to ordinary linear regression when a single linear layer is
//! present.
//!
//! Design goals:
//! - Stable, deterministic, dependency-light.
//! - Explicit shape validation (fail fast, caller can surface a typed error).

use serde::{Deserialize, Serialize};

use crate::error::{FoodcastError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Linear,
    Relu,
}

impl Default for Activation {
    fn default() -> Self {
        Self::Linear
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    /// Weights shape: [out_dim][in_dim]
    pub weights: Vec<Vec<f64>>,
    /// Bias shape: [out_dim]
    pub bias: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    fn in_dim(&self) -> usize {
        self.weights.first().map(|r| r.len()).unwrap_or(0)
    }

    fn out_dim(&self) -> usize {
        self.weights.len()
    }
}

/// A pre-fitted regressor producing a single scalar per feature vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseRegressor {
    /// Expected input dimension.
    pub input_dim: usize,

    pub layers: Vec<DenseLayer>,
}

impl DenseRegressor {
    /// Structural validation of the serialized shape. A regressor that fails
    /// here must never be handed to a predictor.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.input_dim == 0 {
            return Err("input_dim must be > 0".to_string());
        }

        let mut expected_in = self.input_dim;
        for (idx, layer) in self.layers.iter().enumerate() {
            if layer.out_dim() == 0 {
                return Err(format!("layer[{idx}] out_dim must be > 0"));
            }
            if layer.bias.len() != layer.out_dim() {
                return Err(format!(
                    "layer[{idx}] bias len {} != out_dim {}",
                    layer.bias.len(),
                    layer.out_dim()
                ));
            }
            for (r, row) in layer.weights.iter().enumerate() {
                if row.len() != expected_in {
                    return Err(format!(
                        "layer[{idx}] weights row {r} len {} != expected in_dim {expected_in}",
                        row.len()
                    ));
                }
                if row.iter().any(|v| !v.is_finite()) {
                    return Err(format!("layer[{idx}] weights contain non-finite values"));
                }
            }
            if layer.bias.iter().any(|v| !v.is_finite()) {
                return Err(format!("layer[{idx}] bias contain non-finite values"));
            }
            expected_in = layer.out_dim();
        }
        Ok(())
    }

    /// Whether the regressor carries fitted internal state.
    pub fn is_fitted(&self) -> bool {
        !self.layers.is_empty() && self.layers.iter().all(|l| !l.weights.is_empty())
    }

    pub fn output_dim(&self) -> usize {
        self.layers.last().map(|l| l.out_dim()).unwrap_or(0)
    }

    /// Run inference on a single feature vector.
    ///
    /// An unfitted regressor is surfaced distinctly so callers can recommend
    /// retraining rather than treating it as a generic failure.
    pub fn predict(&self, input: &[f64]) -> Result<f64> {
        if !self.is_fitted() {
            return Err(FoodcastError::NotFitted(
                "regressor has no fitted layers".to_string(),
            ));
        }
        if input.len() != self.input_dim {
            return Err(FoodcastError::SchemaMismatch {
                expected: format!("{} features", self.input_dim),
                got: format!("{} features", input.len()),
            });
        }

        let mut x: Vec<f64> = input.to_vec();

        for layer in &self.layers {
            let out_dim = layer.out_dim();
            let in_dim = layer.in_dim();

            let mut y = vec![0.0_f64; out_dim];
            for o in 0..out_dim {
                let mut sum = layer.bias[o];
                // weights[o] is the o-th row (len = in_dim)
                let row = &layer.weights[o];
                debug_assert_eq!(row.len(), in_dim);
                for i in 0..in_dim {
                    sum += row[i] * x[i];
                }
                y[o] = apply_activation(sum, layer.activation);
            }
            x = y;
        }

        if x.len() != 1 {
            return Err(FoodcastError::Prediction(format!(
                "regressor output has {} elements, expected a scalar",
                x.len()
            )));
        }
        Ok(x[0])
    }

    /// Create a regressor that always returns `value`.
    ///
    /// WARNING: This is NOT a trained model. Use only for testing.
    pub fn constant(input_dim: usize, value: f64) -> Self {
        Self {
            input_dim,
            layers: vec![DenseLayer {
                weights: vec![vec![0.0; input_dim]],
                bias: vec![value],
                activation: Activation::Linear,
            }],
        }
    }

    /// Create a plain linear regression: `y = coefficients . x + intercept`.
    ///
    /// WARNING: This is NOT a trained model. Use only for testing.
    pub fn linear(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            input_dim: coefficients.len(),
            layers: vec![DenseLayer {
                weights: vec![coefficients],
                bias: vec![intercept],
                activation: Activation::Linear,
            }],
        }
    }
}

fn apply_activation(x: f64, act: Activation) -> f64 {
    match act {
        Activation::Linear => x,
        Activation::Relu => x.max(0.0),
    }
}
