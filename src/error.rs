//! Crate-level error types.

use thiserror::Error;

use crate::config::loader::ConfigError;

/// Errors surfaced to callers of [`Server`](crate::Server).
///
/// Binding failures are not part of this enum: a handler that fails
/// validation only drops its own route (see [`BindingError`](crate::service::BindingError)).
#[derive(Debug, Error)]
pub enum FlashError {
    /// The service description cannot describe a named struct.
    #[error("invalid service type `{service}`: {reason}")]
    InvalidServiceType { service: String, reason: String },

    /// A listen address could not be parsed or bound.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine stopped with an I/O error while serving.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for server operations.
pub type FlashResult<T> = Result<T, FlashError>;
