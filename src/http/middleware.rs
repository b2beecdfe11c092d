//! Service-scoped middleware.
//!
//! A service returns its middleware list from `Service::middlewares`; the
//! registrar applies it to that service's routes only. The first entry runs
//! outermost. `Next::run` continues the chain.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use futures_util::future::BoxFuture;

type MiddlewareFn = dyn Fn(Request, Next) -> BoxFuture<'static, Response> + Send + Sync;

/// A request middleware.
#[derive(Clone)]
pub struct Middleware {
    inner: Arc<MiddlewareFn>,
}

impl Middleware {
    /// Wrap an async function of `(request, next)`.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self {
            inner: Arc::new(
                move |request: Request, next: Next| -> BoxFuture<'static, Response> {
                    Box::pin(f(request, next))
                },
            ),
        }
    }

    pub async fn call(&self, request: Request, next: Next) -> Response {
        (self.inner)(request, next).await
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}

/// Apply `middlewares` to every route already in `router`.
///
/// `router` must contain at least one route.
pub(crate) fn apply(router: Router, middlewares: Vec<Middleware>) -> Router {
    middlewares.into_iter().rev().fold(router, |router, middleware| {
        router.route_layer(from_fn(move |request: Request, next: Next| {
            let middleware = middleware.clone();
            async move { middleware.call(request, next).await }
        }))
    })
}
