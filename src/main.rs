use clap::Parser;
use foodcast::api::{create_router, AppState};
use foodcast::artifact::ArtifactStore;
use foodcast::cli::{self, Cli, Commands};
use foodcast::config::{AppConfig, LoggingConfig};
use foodcast::encoder::{ClaimsInput, WastageInput};
use foodcast::error::{FoodcastError, Result};
use foodcast::predictor::{ClaimsPredictor, WastagePredictor};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            run_serve(&cli.config_dir, port).await?;
        }
        Commands::Wastage { days, perishable } => {
            init_logging_simple();
            let artifacts = load_artifacts(&cli.config_dir)?;
            let prediction = WastagePredictor::new(&artifacts.wastage).predict(&WastageInput {
                days_until_expiry: days,
                is_perishable: perishable,
            })?;
            cli::print_wastage(&prediction);
        }
        Commands::Claims {
            quantity,
            city,
            provider,
        } => {
            init_logging_simple();
            let artifacts = load_artifacts(&cli.config_dir)?;
            let prediction = ClaimsPredictor::new(&artifacts.claims).predict(&ClaimsInput {
                quantity_listed: quantity,
                city,
                provider_type: provider,
            })?;
            cli::print_claims(&prediction);
        }
        Commands::Info => {
            init_logging_simple();
            let artifacts = load_artifacts(&cli.config_dir)?;
            cli::print_info(&artifacts);
        }
    }

    Ok(())
}

async fn run_serve(config_dir: &str, port_override: Option<u16>) -> Result<()> {
    let config = AppConfig::load_from(config_dir)?;
    init_logging(&config.logging);

    if let Err(errors) = config.validate() {
        for e in &errors {
            error!("config: {e}");
        }
        return Err(FoodcastError::Validation(errors.join("; ")));
    }

    // Artifact load failures are terminal: never serve without a model.
    let artifacts = match ArtifactStore::load(&config) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            error!("failed to load prediction artifacts: {e}");
            return Err(e);
        }
    };

    let state = AppState::new(Arc::clone(&artifacts));
    let app = create_router(state);

    let port = port_override.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", config.server.host, port)
        .parse()
        .map_err(|e| FoodcastError::Internal(format!("invalid bind address: {e}")))?;

    info!("Starting prediction API on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FoodcastError::Internal(format!("API server error: {e}")))?;

    Ok(())
}

fn load_artifacts(config_dir: &str) -> Result<Arc<ArtifactStore>> {
    let config = AppConfig::load_from(config_dir)?;
    ArtifactStore::load(&config)
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},foodcast=debug", logging.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn init_logging_simple() {
    // Minimal logging for CLI commands
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
