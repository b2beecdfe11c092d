//! Handler binding and signature validation.
//!
//! # Responsibilities
//! - Find the method an endpoint field binds to
//! - Validate it takes exactly one `Context` parameter
//! - Produce a handler that invokes the method on the shared instance
//!
//! # Design Decisions
//! - Validation happens once at registration; requests only box the context
//! - A failed validation is logged and drops the route, never the service

use std::any::Any;
use std::sync::Arc;

use thiserror::Error;

use crate::http::context::Context;
use crate::routing::verb::Verb;
use crate::service::method::{Method, MethodFuture};
use crate::service::schema::Field;
use crate::service::MethodTable;

/// Handler invoked with a live request context.
pub type ContextHandler = Arc<dyn Fn(Context) -> MethodFuture + Send + Sync>;

/// Why a method could not be bound to a route.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("no `{method}` method on `{service}` service")]
    MissingMethod { service: String, method: String },

    #[error("`{method}` method of `{service}` service needs exactly one request-context parameter, found {found}")]
    Arity {
        service: String,
        method: String,
        found: usize,
    },

    #[error("Context missing in `{method}` method of `{service}` service, found `{found}`")]
    ContextMissing {
        service: String,
        method: String,
        found: &'static str,
    },
}

/// A method bound to one endpoint of a service instance.
pub struct BoundHandler<S> {
    target: Arc<S>,
    method_name: String,
    verb: Verb,
    outcome: Result<Method<S>, BindingError>,
}

impl<S: Send + Sync + 'static> BoundHandler<S> {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn error(&self) -> Option<&BindingError> {
        self.outcome.as_ref().err()
    }

    /// The callable handler, or `None` when validation failed.
    pub fn handler(&self) -> Option<ContextHandler> {
        let method = self.outcome.as_ref().ok()?.clone();
        let target = Arc::clone(&self.target);

        Some(Arc::new(move |ctx: Context| {
            let args: Vec<Box<dyn Any + Send>> = vec![Box::new(ctx)];
            method.call(Arc::clone(&target), args)
        }))
    }
}

/// Bind `field` of `service` to its method in `methods`.
pub fn bind<S: Send + Sync + 'static>(
    service: &Arc<S>,
    methods: &MethodTable<S>,
    service_name: &str,
    field: &Field,
    verb: Verb,
) -> BoundHandler<S> {
    let method_name = field.method_name();
    let outcome = validate(methods, service_name, &method_name);

    if let Err(error) = &outcome {
        tracing::warn!(
            service = %service_name,
            method = %method_name,
            field = %field.ident(),
            error = %error,
            "Handler not bound, route skipped"
        );
    }

    BoundHandler {
        target: Arc::clone(service),
        method_name,
        verb,
        outcome,
    }
}

fn validate<S: Send + Sync + 'static>(
    methods: &MethodTable<S>,
    service: &str,
    method: &str,
) -> Result<Method<S>, BindingError> {
    let found = methods
        .get(method)
        .ok_or_else(|| BindingError::MissingMethod {
            service: service.to_string(),
            method: method.to_string(),
        })?;

    let [param] = found.params() else {
        return Err(BindingError::Arity {
            service: service.to_string(),
            method: method.to_string(),
            found: found.params().len(),
        });
    };

    if !param.is::<Context>() {
        return Err(BindingError::ContextMissing {
            service: service.to_string(),
            method: method.to_string(),
            found: param.type_name(),
        });
    }

    Ok(found.clone())
}
