//! HTTP engine boundary.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum engine, engine middleware)
//!     → service route group (middleware.rs, service-scoped)
//!     → bound handler (context.rs wraps the request)
//!     → service method writes status + payload
//!     → Send to client
//! ```
//!
//! Unmatched requests get the engine's standard 404.

pub mod context;
pub mod middleware;
pub mod server;

pub use context::Context;
pub use middleware::Middleware;
pub use server::Server;
