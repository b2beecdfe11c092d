//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration (file or defaults)
//! - Install logging, then the metrics exporter
//!
//! # Design Decisions
//! - Fail fast: any startup error is returned before services register
//! - Logging is installed first so later steps can report

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::config::{load_config, ConfigError, ServerConfig};
use crate::observability::{logging, metrics};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to install log subscriber: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("invalid metrics address `{0}`")]
    MetricsAddress(String),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Load configuration and install observability.
///
/// Must be called from within a Tokio runtime when metrics are enabled.
pub fn prepare(config_path: Option<&Path>) -> Result<ServerConfig, StartupError> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    logging::init(&config.observability)?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    tracing::info!(
        addresses = ?config.listener.effective_addresses(),
        logger = config.engine.logger,
        recovery = config.engine.recovery,
        "Configuration loaded"
    );

    Ok(config)
}
