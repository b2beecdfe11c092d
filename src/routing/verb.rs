//! HTTP verb marker types.
//!
//! A field declared with one of these marker types is an endpoint field.
//! Recognition is by type identity; any other declared type is ignored.

use std::any::TypeId;
use std::fmt;

use axum::routing::MethodFilter;

/// Marker for `GET` endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Get;

/// Marker for `POST` endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Post;

/// Marker for `PUT` endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Put;

/// Marker for `PATCH` endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Patch;

/// Marker for `DELETE` endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delete;

/// Marker for `OPTIONS` endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options;

/// HTTP verbs a route can be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl Verb {
    /// Recognise a marker type by its `TypeId`.
    pub fn from_marker(marker: TypeId) -> Option<Self> {
        if marker == TypeId::of::<Get>() {
            Some(Verb::Get)
        } else if marker == TypeId::of::<Post>() {
            Some(Verb::Post)
        } else if marker == TypeId::of::<Put>() {
            Some(Verb::Put)
        } else if marker == TypeId::of::<Patch>() {
            Some(Verb::Patch)
        } else if marker == TypeId::of::<Delete>() {
            Some(Verb::Delete)
        } else if marker == TypeId::of::<Options>() {
            Some(Verb::Options)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
            Verb::Options => "OPTIONS",
        }
    }

    /// Engine-side method filter for this verb.
    pub fn method_filter(&self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Put => MethodFilter::PUT,
            Verb::Patch => MethodFilter::PATCH,
            Verb::Delete => MethodFilter::DELETE,
            Verb::Options => MethodFilter::OPTIONS,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
