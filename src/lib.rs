//! Declarative route registration for Axum.
//!
//! A [`Service`] declares endpoint fields (verb marker + annotations) and a
//! method table. [`Server::add_service`] derives each route path from the
//! merged root and endpoint metadata, binds the field to its method, and
//! registers the route with the engine.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod service;

pub use config::ServerConfig;
pub use error::{FlashError, FlashResult};
pub use http::{Context, Middleware, Server};
pub use lifecycle::Shutdown;
pub use routing::{Delete, EndpointMetadata, Get, Options, Patch, Post, Put, Tags, Verb};
pub use service::{Field, MethodTable, RouteInfo, Service, ServiceSchema};
