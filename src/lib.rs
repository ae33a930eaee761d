pub mod api;
pub mod artifact;
pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod ml;
pub mod predictor;

pub use artifact::{ArtifactStore, ClaimsModel, ModelMetadata, WastageBundle};
pub use config::AppConfig;
pub use encoder::{ClaimsInput, WastageInput};
pub use error::{FoodcastError, Result};
pub use ml::{DenseRegressor, StandardScaler};
pub use predictor::{
    ClaimsPrediction, ClaimsPredictor, RiskLevel, WastagePrediction, WastagePredictor,
};
