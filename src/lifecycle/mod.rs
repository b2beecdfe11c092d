//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Install logging → Install metrics exporter
//!     → (caller) add services → Server::start
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Services register before any listener serves traffic
//! - One shutdown signal stops every listener

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
