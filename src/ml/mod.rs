//! Lightweight ML inference (deploy-safe, CPU-only).
//!
//! This module is intentionally dependency-light so pre-fitted artifacts can
//! be served without a Python runtime or GPU toolchain.

pub mod regressor;
pub mod scaler;

pub use regressor::{Activation, DenseLayer, DenseRegressor};
pub use scaler::StandardScaler;
