//! Foodcast CLI - prediction service management and one-shot predictions
//!
//! Commands:
//! - `foodcast serve` - Serve the HTTP prediction API
//! - `foodcast wastage` - One-shot wastage prediction
//! - `foodcast claims` - One-shot claimed-quantity prediction
//! - `foodcast info` - Show loaded artifact metadata

use clap::{Parser, Subcommand};

use crate::artifact::ArtifactStore;
use crate::encoder::ClaimsInput;
use crate::predictor::{ClaimsPrediction, WastagePrediction};

/// Foodcast prediction service CLI
#[derive(Parser, Debug)]
#[command(name = "foodcast")]
#[command(author, version, about = "Prediction service for food wastage and claimed quantities")]
pub struct Cli {
    /// Configuration directory (holds default.toml etc.)
    #[arg(long, default_value = "config", env = "FOODCAST_CONFIG_DIR")]
    pub config_dir: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP prediction API
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// One-shot wastage prediction (bundle artifact)
    Wastage {
        /// Days until the food expires (0-30)
        #[arg(long, default_value = "3")]
        days: u32,
        /// Whether the food is perishable
        #[arg(long)]
        perishable: bool,
    },

    /// One-shot claimed-quantity prediction (bare predictor artifact)
    Claims {
        /// Quantity of food listed
        #[arg(long)]
        quantity: u32,
        /// City of the listing
        #[arg(long, default_value = "Bangalore")]
        city: String,
        /// Provider type of the listing
        #[arg(long, default_value = "Individual")]
        provider: String,
    },

    /// Show loaded artifact metadata
    Info,
}

pub fn print_wastage(prediction: &WastagePrediction) {
    println!("Predicted Wastage: {}", prediction.display_units());
    println!(
        "Risk: {} - {}",
        prediction.risk.as_str(),
        prediction.risk.headline()
    );
    println!("Recommended actions:");
    for action in prediction.risk.recommended_actions() {
        println!("  - {action}");
    }
    println!();
    println!("Input vector:  {:?}", prediction.features);
    println!("Scaled vector: {:?}", prediction.scaled_features);
}

pub fn print_claims(prediction: &ClaimsPrediction) {
    println!("Predicted Quantity Claimed: {}", prediction.display_quantity());
    println!("Input vector: {:?}", prediction.features);
}

pub fn print_info(store: &ArtifactStore) {
    let metadata = &store.wastage.metadata;
    println!("Wastage model:");
    println!("  Algorithm:      {}", metadata.model_type);
    println!("  Training date:  {}", metadata.training_date);
    println!("  Features:       {}", metadata.features.join(", "));
    match metadata.training_score {
        Some(score) => println!("  Training score: {score:.4}"),
        None => println!("  Training score: N/A"),
    }
    println!();
    println!("Claims model:");
    println!("  Input columns:  {}", ClaimsInput::feature_columns().join(", "));
    println!("  Input features: {}", store.claims.0.input_dim);
}
