//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registration and dispatch produce:
//!     → logging.rs (structured log events: routes bound, bindings skipped)
//!     → metrics.rs (route counters, request counters and latency)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; binaries install the subscriber
//! - Metrics are cheap no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
