//! Per-request context handed to bound service methods.
//!
//! # Responsibilities
//! - Expose the incoming request (method, URI, headers, extensions)
//! - Write a status code and payload back to the client
//!
//! # Design Decisions
//! - One `Context` per request; it owns the request and is never shared
//! - Body parsing is left to the handler via `into_request`

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Request context for a bound handler.
#[derive(Debug)]
pub struct Context {
    request: Request<Body>,
}

impl Context {
    pub fn new(request: Request<Body>) -> Self {
        Self { request }
    }

    pub fn request(&self) -> &Request<Body> {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut Request<Body> {
        &mut self.request
    }

    /// Take the request back, e.g. to read its body.
    pub fn into_request(self) -> Request<Body> {
        self.request
    }

    pub fn method(&self) -> &Method {
        self.request.method()
    }

    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    pub fn path(&self) -> &str {
        self.request.uri().path()
    }

    pub fn query(&self) -> Option<&str> {
        self.request.uri().query()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    /// Header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.request.headers().get(name).and_then(|v| v.to_str().ok())
    }

    /// Typed value inserted into the request by a middleware.
    pub fn extension<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.request.extensions().get::<T>()
    }

    /// JSON payload with the given status.
    pub fn json<T: Serialize>(&self, status: StatusCode, body: T) -> Response {
        (status, Json(body)).into_response()
    }

    /// Plain-text payload with the given status.
    pub fn string(&self, status: StatusCode, body: impl Into<String>) -> Response {
        (status, body.into()).into_response()
    }

    /// Empty response with the given status.
    pub fn status(&self, status: StatusCode) -> Response {
        status.into_response()
    }
}
