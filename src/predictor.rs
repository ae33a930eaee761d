//! Inference and interpretation over loaded artifacts.
//!
//! A prediction is a pure function of `(artifact, input)`:
//! validate → encode → (scale) → predict → classify. Nothing is retained
//! across requests.

use serde::{Deserialize, Serialize};

use crate::artifact::{ClaimsModel, WastageBundle};
use crate::encoder::{ClaimsInput, WastageInput};
use crate::error::Result;

/// Qualitative wastage-risk bucket derived from the predicted units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Moderate,
    Low,
}

impl RiskLevel {
    /// Fixed, non-configurable thresholds: `> 10` high, `(5, 10]` moderate,
    /// `<= 5` low.
    pub fn from_prediction(units: f64) -> Self {
        if units > 10.0 {
            Self::High
        } else if units > 5.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Self::High => "High wastage risk! Prioritize immediate redistribution.",
            Self::Moderate => "Moderate wastage risk. Monitor closely.",
            Self::Low => "Low wastage risk. Safe for standard storage.",
        }
    }

    pub fn recommended_actions(&self) -> &'static [&'static str] {
        match self {
            Self::High => &[
                "Contact food banks immediately",
                "Offer discounts for quick sale",
                "Process into preserved goods",
            ],
            Self::Moderate => &[
                "Plan for redistribution in 1-2 days",
                "Store in optimal conditions",
            ],
            Self::Low => &[
                "Regular monitoring is sufficient",
                "Maintain current storage conditions",
            ],
        }
    }
}

/// Wastage prediction result.
#[derive(Debug, Clone, Serialize)]
pub struct WastagePrediction {
    /// Predicted wastage units, unrounded.
    pub predicted_units: f64,
    pub risk: RiskLevel,
    /// Encoded feature vector, in the bundle's training column order.
    pub features: Vec<f64>,
    /// Feature vector after scaling, as passed to the model.
    pub scaled_features: Vec<f64>,
}

impl WastagePrediction {
    /// Two-decimal display form; the stored value stays unrounded.
    pub fn display_units(&self) -> String {
        format!("{:.2} units", self.predicted_units)
    }
}

/// Wastage pipeline: encode, scale, predict, classify.
pub struct WastagePredictor<'a> {
    bundle: &'a WastageBundle,
}

impl<'a> WastagePredictor<'a> {
    pub fn new(bundle: &'a WastageBundle) -> Self {
        Self { bundle }
    }

    pub fn predict(&self, input: &WastageInput) -> Result<WastagePrediction> {
        input.validate()?;

        let features = input.encode(&self.bundle.metadata.features)?;
        let scaled_features = self.bundle.scaler.transform(&features)?;
        let predicted_units = self.bundle.model.predict(&scaled_features)?;

        Ok(WastagePrediction {
            predicted_units,
            risk: RiskLevel::from_prediction(predicted_units),
            features,
            scaled_features,
        })
    }
}

/// Claimed-quantity prediction result.
#[derive(Debug, Clone, Serialize)]
pub struct ClaimsPrediction {
    /// Predicted quantity claimed, unrounded.
    pub predicted_quantity: f64,
    /// Encoded one-hot feature vector.
    pub features: Vec<f64>,
}

impl ClaimsPrediction {
    pub fn display_quantity(&self) -> String {
        format!("{:.2}", self.predicted_quantity)
    }
}

/// Claims pipeline: encode then predict. No scaler, no classification.
pub struct ClaimsPredictor<'a> {
    model: &'a ClaimsModel,
}

impl<'a> ClaimsPredictor<'a> {
    pub fn new(model: &'a ClaimsModel) -> Self {
        Self { model }
    }

    pub fn predict(&self, input: &ClaimsInput) -> Result<ClaimsPrediction> {
        input.validate()?;

        let features = input.encode()?;
        let predicted_quantity = self.model.0.predict(&features)?;

        Ok(ClaimsPrediction {
            predicted_quantity,
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ModelMetadata;
    use crate::encoder::{DAYS_UNTIL_EXPIRY, IS_PERISHABLE};
    use crate::error::FoodcastError;
    use crate::ml::{DenseRegressor, StandardScaler};

    fn bundle_with_model(model: DenseRegressor) -> WastageBundle {
        let dim = model.input_dim;
        WastageBundle {
            model,
            scaler: StandardScaler::identity(dim),
            metadata: ModelMetadata {
                features: vec![DAYS_UNTIL_EXPIRY.to_string(), IS_PERISHABLE.to_string()],
                model_type: "DenseRegressor".to_string(),
                training_date: "2025-11-02".to_string(),
                training_score: Some(0.87),
            },
        }
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(RiskLevel::from_prediction(10.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_prediction(10.000001), RiskLevel::High);
        assert_eq!(RiskLevel::from_prediction(5.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_prediction(5.000001), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_prediction(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_prediction(18.7), RiskLevel::High);
    }

    #[test]
    fn high_risk_prediction_end_to_end() {
        let bundle = bundle_with_model(DenseRegressor::constant(2, 12.5));
        let predictor = WastagePredictor::new(&bundle);

        let prediction = predictor
            .predict(&WastageInput {
                days_until_expiry: 2,
                is_perishable: true,
            })
            .unwrap();

        assert_eq!(prediction.features, vec![2.0, 1.0]);
        assert!((prediction.predicted_units - 12.5).abs() < 1e-12);
        assert_eq!(prediction.risk, RiskLevel::High);
        assert_eq!(prediction.display_units(), "12.50 units");
    }

    #[test]
    fn low_risk_prediction_end_to_end() {
        let bundle = bundle_with_model(DenseRegressor::constant(2, 3.2));
        let predictor = WastagePredictor::new(&bundle);

        let prediction = predictor
            .predict(&WastageInput {
                days_until_expiry: 5,
                is_perishable: false,
            })
            .unwrap();

        assert_eq!(prediction.features, vec![5.0, 0.0]);
        assert_eq!(prediction.risk, RiskLevel::Low);
        assert_eq!(prediction.display_units(), "3.20 units");
    }

    #[test]
    fn scaling_is_applied_before_the_model() {
        // z = (x - 1) / 2 per column; model sums the scaled vector.
        let bundle = WastageBundle {
            model: DenseRegressor::linear(vec![1.0, 1.0], 0.0),
            scaler: StandardScaler::fitted(vec![1.0, 1.0], vec![2.0, 2.0]),
            metadata: ModelMetadata {
                features: vec![DAYS_UNTIL_EXPIRY.to_string(), IS_PERISHABLE.to_string()],
                model_type: "DenseRegressor".to_string(),
                training_date: "2025-11-02".to_string(),
                training_score: None,
            },
        };
        let predictor = WastagePredictor::new(&bundle);

        let prediction = predictor
            .predict(&WastageInput {
                days_until_expiry: 5,
                is_perishable: true,
            })
            .unwrap();

        assert_eq!(prediction.features, vec![5.0, 1.0]);
        assert_eq!(prediction.scaled_features, vec![2.0, 0.0]);
        assert!((prediction.predicted_units - 2.0).abs() < 1e-12);
    }

    #[test]
    fn reordered_metadata_reorders_the_vector() {
        let mut bundle = bundle_with_model(DenseRegressor::linear(vec![10.0, 1.0], 0.0));
        bundle.metadata.features =
            vec![IS_PERISHABLE.to_string(), DAYS_UNTIL_EXPIRY.to_string()];
        let predictor = WastagePredictor::new(&bundle);

        let prediction = predictor
            .predict(&WastageInput {
                days_until_expiry: 4,
                is_perishable: true,
            })
            .unwrap();

        // [is_perishable, days] = [1, 4] → 10*1 + 1*4
        assert_eq!(prediction.features, vec![1.0, 4.0]);
        assert!((prediction.predicted_units - 14.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_input_never_reaches_the_model() {
        let bundle = bundle_with_model(DenseRegressor::constant(2, 1.0));
        let predictor = WastagePredictor::new(&bundle);

        let result = predictor.predict(&WastageInput {
            days_until_expiry: 99,
            is_perishable: false,
        });
        assert!(matches!(result, Err(FoodcastError::Validation(_))));
    }

    #[test]
    fn claims_prediction_sums_one_hot_vector() {
        let model = ClaimsModel(DenseRegressor::linear(vec![1.0; 5], 0.0));
        let predictor = ClaimsPredictor::new(&model);

        let prediction = predictor
            .predict(&ClaimsInput {
                quantity_listed: 5,
                city: "Delhi".to_string(),
                provider_type: "Restaurant".to_string(),
            })
            .unwrap();

        assert_eq!(prediction.features, vec![5.0, 0.0, 1.0, 0.0, 1.0]);
        assert!((prediction.predicted_quantity - 7.0).abs() < 1e-12);
        assert_eq!(prediction.display_quantity(), "7.00");
    }

    #[test]
    fn unknown_city_fails_before_inference() {
        let model = ClaimsModel(DenseRegressor::linear(vec![1.0; 5], 0.0));
        let predictor = ClaimsPredictor::new(&model);

        let result = predictor.predict(&ClaimsInput {
            quantity_listed: 5,
            city: "Pune".to_string(),
            provider_type: "Individual".to_string(),
        });
        assert!(matches!(
            result,
            Err(FoodcastError::UnknownCategory { .. })
        ));
    }
}
