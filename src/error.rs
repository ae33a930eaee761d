use thiserror::Error;

/// Main error type for the prediction service
#[derive(Error, Debug)]
pub enum FoodcastError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Artifact loading errors
    #[error("Artifact not found: {path}")]
    ArtifactNotFound { path: String },

    #[error("Artifact malformed: {0}")]
    ArtifactMalformed(String),

    #[error("Artifact corrupt: {0}")]
    ArtifactCorrupt(String),

    // Feature encoding errors
    #[error("Unknown category for {field}: {value:?} (allowed: {allowed})")]
    UnknownCategory {
        field: String,
        value: String,
        allowed: String,
    },

    #[error("Feature schema mismatch: expected {expected}, got {got}")]
    SchemaMismatch { expected: String, got: String },

    // Inference errors
    #[error("Model not fitted: {0}")]
    NotFitted(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for FoodcastError
pub type Result<T> = std::result::Result<T, FoodcastError>;

impl FoodcastError {
    /// Loader and configuration failures end the session; everything else
    /// is scoped to the single request that produced it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::ArtifactNotFound { .. }
                | Self::ArtifactMalformed(_)
                | Self::ArtifactCorrupt(_)
        )
    }
}
