//! Route derivation subsystem.
//!
//! # Data Flow
//! ```text
//! Service root annotations ──┐
//!                            ├→ metadata.rs (coalesce aliases, merge)
//! Endpoint field annotations ┘
//!     → defaults (root = service name, url = field name)
//!     → path.rs (prefix / v<version> / root / url, slashes collapsed,
//!       `:id` / `*rest` captures translated for the engine)
//!     → fully qualified route path
//! ```
//!
//! # Design Decisions
//! - Endpoint annotations take precedence over root annotations
//! - Paths are always rooted at `/` and never contain `//`
//! - Verb comes from the field's declared marker type, not from annotations

pub mod metadata;
pub mod path;
pub mod tags;
pub mod verb;

pub use metadata::{resolve, EndpointMetadata, ROOT_IDENT};
pub use path::{clean_url, engine_path, PathError};
pub use tags::Tags;
pub use verb::{Delete, Get, Options, Patch, Post, Put, Verb};
