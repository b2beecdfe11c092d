//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Listen and metrics addresses must parse as socket addresses
//! - Log filter must parse as a tracing directive
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ServerConfig;
use crate::net::listener::normalize_address;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener address `{0}` is not a valid socket address")]
    ListenAddress(String),

    #[error("metrics address `{0}` is not a valid socket address")]
    MetricsAddress(String),

    #[error("log level `{0}` is not a valid filter directive")]
    LogLevel(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Validate `config`, collecting every error.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for address in &config.listener.addresses {
        if normalize_address(address).parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::ListenAddress(address.clone()));
        }
    }

    if config.engine.request_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if EnvFilter::try_new(&observability.log_level).is_err() {
        errors.push(ValidationError::LogLevel(observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
