//! Service registration.
//!
//! # Responsibilities
//! - Validate the service schema
//! - Walk endpoint fields in declaration order
//! - Merge endpoint and root metadata, apply defaults, compute the path
//! - Bind handlers and register valid routes in a service-scoped group
//!
//! # Design Decisions
//! - Invalid bindings are skipped silently at the route level (logged only)
//! - A path the engine cannot register fails the whole service with an error
//! - Routes resolving to the same (verb, path) are handed to the engine as-is
//! - Service middleware applies to the service's routes only

use std::any::type_name;
use std::sync::Arc;
use std::time::Instant;

use axum::{extract::Request, routing::on, Router};

use crate::error::{FlashError, FlashResult};
use crate::http::context::Context;
use crate::http::middleware;
use crate::observability::metrics;
use crate::routing::metadata::{resolve, EndpointMetadata, ROOT_IDENT};
use crate::routing::path::engine_path;
use crate::routing::verb::Verb;
use crate::service::binder::{bind, ContextHandler};
use crate::service::{MethodTable, Service};

/// A route registered with the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub verb: Verb,
    pub path: String,
    pub service: String,
    pub method: String,
}

/// Routes derived from one service, ready to merge into the engine.
pub(crate) struct ServiceRoutes {
    pub name: String,
    pub router: Router,
    pub routes: Vec<RouteInfo>,
}

/// Derive and bind every route of `service`.
pub(crate) fn register_service<S: Service>(service: &Arc<S>) -> FlashResult<ServiceRoutes> {
    let schema = S::schema();
    let name = schema.validate(type_name::<S>())?;

    let mut methods = MethodTable::new();
    S::methods(&mut methods);

    let root = resolve(&schema, ROOT_IDENT);
    let mut endpoints = Vec::new();

    // Every path is checked before any route is bound, so a bad path
    // registers nothing.
    for field in schema.fields() {
        let Some(verb) = field.verb() else {
            tracing::trace!(
                service = %name,
                field = %field.ident(),
                marker = %field.marker_name(),
                "Non-endpoint field ignored"
            );
            continue;
        };

        let own = resolve(&schema, field.ident());
        let mut meta = EndpointMetadata::merge([&own, &root]);
        if meta.root.is_empty() {
            meta.root = name.to_lowercase();
        }
        if meta.url.is_empty() {
            meta.url = field.ident().to_lowercase();
        }

        let path = engine_path(&meta.path()).map_err(|error| FlashError::InvalidServiceType {
            service: name.clone(),
            reason: format!("field `{}`: {}", field.ident(), error),
        })?;
        endpoints.push((field, verb, path));
    }

    let mut router = Router::new();
    let mut routes = Vec::new();

    for (field, verb, path) in endpoints {
        let bound = bind(service, &methods, &name, field, verb);
        let Some(handler) = bound.handler() else {
            metrics::record_route_skipped(&name);
            continue;
        };

        router = router.route(&path, dispatch(verb, path.clone(), handler));

        tracing::info!(
            service = %name,
            verb = %verb,
            path = %path,
            method = %bound.method_name(),
            "Route registered"
        );
        metrics::record_route_registered(&name, verb);

        routes.push(RouteInfo {
            verb,
            path,
            service: name.clone(),
            method: bound.method_name().to_string(),
        });
    }

    if !routes.is_empty() {
        router = middleware::apply(router, service.middlewares());
    }

    Ok(ServiceRoutes {
        name,
        router,
        routes,
    })
}

/// Engine-side handler: wraps the request in a `Context` and records metrics.
fn dispatch(verb: Verb, route: String, handler: ContextHandler) -> axum::routing::MethodRouter {
    on(verb.method_filter(), move |request: Request| {
        let handler = Arc::clone(&handler);
        let route = route.clone();
        async move {
            let start = Instant::now();
            let response = handler(Context::new(request)).await;
            metrics::record_request(verb.as_str(), &route, response.status().as_u16(), start);
            response
        }
    })
}
