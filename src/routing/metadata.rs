//! Endpoint metadata resolution.
//!
//! # Responsibilities
//! - Read prefix/root/url/version from the annotations of a root or field
//! - Merge metadata with left-to-right precedence
//! - Render the final route path
//!
//! # Design Decisions
//! - Attributes merge independently: the first non-empty value wins
//! - Absent data yields empty strings; defaults are applied by the registrar

use crate::routing::path::clean_url;
use crate::routing::tags::Tags;
use crate::service::{Field, ServiceSchema};

/// Identifier under which root-level annotations are resolved.
pub const ROOT_IDENT: &str = "Server";

const PREFIX_ALIASES: &[&str] = &["prefix", "pre"];
const ROOT_ALIASES: &[&str] = &["root"];
const URL_ALIASES: &[&str] = &["url"];
const VERSION_ALIASES: &[&str] = &["version", "v"];

/// Route metadata for one endpoint or for a service root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointMetadata {
    pub prefix: String,
    pub root: String,
    pub url: String,
    pub version: String,
}

impl EndpointMetadata {
    /// Read metadata from a set of annotations.
    pub fn from_tags(tags: &Tags) -> Self {
        let read = |aliases: &[&str]| tags.coalesce(aliases).unwrap_or_default().to_string();

        Self {
            prefix: read(PREFIX_ALIASES),
            root: read(ROOT_ALIASES),
            url: read(URL_ALIASES),
            version: read(VERSION_ALIASES),
        }
    }

    /// Merge in order: each attribute takes the first non-empty value.
    pub fn merge<'a>(ordered: impl IntoIterator<Item = &'a EndpointMetadata>) -> Self {
        let mut merged = EndpointMetadata::default();

        for meta in ordered {
            fill(&mut merged.prefix, &meta.prefix);
            fill(&mut merged.root, &meta.root);
            fill(&mut merged.url, &meta.url);
            fill(&mut merged.version, &meta.version);
        }

        merged
    }

    /// Fully qualified route path: prefix, `v<version>`, root, url.
    pub fn path(&self) -> String {
        let version = if self.version.is_empty() {
            String::new()
        } else {
            format!("v{}", self.version)
        };

        clean_url(&[&self.prefix, &version, &self.root, &self.url])
    }
}

fn fill(slot: &mut String, candidate: &str) {
    if slot.is_empty() && !candidate.is_empty() {
        *slot = candidate.to_string();
    }
}

/// Resolve the metadata declared on `ident` (a field, or [`ROOT_IDENT`]).
///
/// Unknown identifiers resolve to empty metadata.
pub fn resolve(schema: &ServiceSchema, ident: &str) -> EndpointMetadata {
    let tags = if ident == ROOT_IDENT {
        Some(schema.root_tags())
    } else {
        schema.field_named(ident).map(Field::tags)
    };

    tags.map(EndpointMetadata::from_tags).unwrap_or_default()
}
