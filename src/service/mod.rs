//! Service description and binding subsystem.
//!
//! # Data Flow
//! ```text
//! Server::add_service(Arc<S>)
//!     → schema.rs (S::schema(), validated as a named struct)
//!     → method.rs (S::methods() fills the method table)
//!     → registrar.rs (per endpoint field, in declaration order)
//!         → routing::metadata (merge endpoint over root, apply defaults)
//!         → binder.rs (find method, validate signature)
//!         → route registered under the service's middleware group
//! ```
//!
//! # Design Decisions
//! - The method table is explicit; no runtime reflection
//! - Field `ping` binds to method `Ping` unless the field names its method
//! - Handlers that fail validation drop their route only

pub mod binder;
pub mod method;
pub mod registrar;
pub mod schema;

pub use binder::{BindingError, BoundHandler};
pub use method::{IntoMethod, Method, MethodTable, Param};
pub use registrar::RouteInfo;
pub use schema::{Field, ServiceSchema};

use crate::http::middleware::Middleware;

/// A set of HTTP endpoints backed by methods on `Self`.
///
/// ```
/// use std::sync::Arc;
/// use axum::{http::StatusCode, response::Response};
/// use flash::{Context, MethodTable, Server, Service, ServiceSchema};
///
/// struct Health;
///
/// impl Health {
///     async fn ping(self: Arc<Self>, ctx: Context) -> Response {
///         ctx.string(StatusCode::OK, "pong")
///     }
/// }
///
/// impl Service for Health {
///     fn schema() -> ServiceSchema {
///         ServiceSchema::new()
///             .root(r#"version:"1""#)
///             .get("ping", r#"url:"/ping""#)
///     }
///
///     fn methods(methods: &mut MethodTable<Self>) {
///         methods.register("Ping", Health::ping);
///     }
/// }
///
/// let mut server = Server::new();
/// server.add_service(Arc::new(Health)).unwrap();
/// assert_eq!(server.routes()[0].path, "/v1/health/ping");
/// ```
pub trait Service: Send + Sync + Sized + 'static {
    /// Root annotations and declared fields, in declaration order.
    fn schema() -> ServiceSchema;

    /// Methods endpoint fields may bind to.
    fn methods(methods: &mut MethodTable<Self>);

    /// Middleware applied to every route of this service.
    fn middlewares(&self) -> Vec<Middleware> {
        Vec::new()
    }
}
