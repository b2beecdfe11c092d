//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! configured addresses (":8080", "127.0.0.1:9000")
//!     → listener.rs (normalise, bind all)
//!     → Hand off to the engine (axum::serve per listener)
//! ```
//!
//! # Design Decisions
//! - All listeners are bound before any serves, so a bad address fails fast
//! - Connection handling is the engine's concern

pub mod listener;
