//! Server: service registry and engine owner.
//!
//! # Responsibilities
//! - Own the Axum router and the list of registered services
//! - Register each service's routes eagerly on `add_service`
//! - Wire up engine middleware (tracing, panic recovery, timeout)
//! - Bind listeners and serve until shutdown
//!
//! # Design Decisions
//! - `add_service` is a startup-time, single-threaded operation (`&mut self`)
//! - No service removal or reload; the route set only grows
//! - Engine middleware wraps every route, including services added later

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{EngineConfig, ServerConfig};
use crate::error::{FlashError, FlashResult};
use crate::lifecycle::{signals, Shutdown};
use crate::net::listener;
use crate::service::registrar::register_service;
use crate::service::{RouteInfo, Service};

struct RegisteredService {
    name: String,
    instance: Arc<dyn Any + Send + Sync>,
}

/// HTTP server built from declared services.
pub struct Server {
    engine: Router,
    config: ServerConfig,
    services: Vec<RegisteredService>,
    routes: Vec<RouteInfo>,
}

impl Default for Server {
    /// Server with request tracing and panic recovery.
    fn default() -> Self {
        Self::with_config(ServerConfig::default())
    }
}

impl Server {
    /// Server without any engine middleware.
    pub fn new() -> Self {
        Self::with_config(ServerConfig {
            engine: EngineConfig::bare(),
            ..ServerConfig::default()
        })
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            engine: Router::new(),
            config,
            services: Vec::new(),
            routes: Vec::new(),
        }
    }

    /// Register every valid route of `service`.
    ///
    /// The service must be handed over as a shared reference so bound
    /// handlers can call into the same instance; a plain value does not
    /// compile:
    ///
    /// ```compile_fail
    /// use flash::{MethodTable, Server, Service, ServiceSchema};
    ///
    /// struct Plain;
    ///
    /// impl Service for Plain {
    ///     fn schema() -> ServiceSchema { ServiceSchema::new() }
    ///     fn methods(_: &mut MethodTable<Self>) {}
    /// }
    ///
    /// Server::new().add_service(Plain).unwrap();
    /// ```
    ///
    /// A schema that cannot describe a named struct, or a route path with a
    /// malformed capture, is rejected with [`FlashError::InvalidServiceType`]
    /// and registers nothing. `:id` and trailing `*rest` segments are
    /// registered as engine captures. Handlers that fail validation only
    /// drop their own route.
    ///
    /// Two endpoints resolving to the same verb and path are both handed to
    /// the engine, which panics on the overlap.
    pub fn add_service<S: Service>(&mut self, service: Arc<S>) -> FlashResult<()> {
        let registered = register_service(&service)?;

        tracing::info!(
            service = %registered.name,
            routes = registered.routes.len(),
            "Service added"
        );

        let engine = std::mem::replace(&mut self.engine, Router::new());
        self.engine = engine.merge(registered.router);
        self.routes.extend(registered.routes);
        self.services.push(RegisteredService {
            name: registered.name,
            instance: service,
        });

        Ok(())
    }

    /// Names of registered services, in registration order.
    pub fn services(&self) -> impl Iterator<Item = &str> + '_ {
        self.services.iter().map(|s| s.name.as_str())
    }

    /// The first registered instance of `S`.
    pub fn service<S: Service>(&self) -> Option<Arc<S>> {
        self.services
            .iter()
            .find_map(|s| Arc::clone(&s.instance).downcast::<S>().ok())
    }

    /// Every registered route, in registration order.
    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The engine router with engine middleware applied.
    #[allow(deprecated)]
    pub fn router(&self) -> Router {
        let engine = &self.config.engine;
        let mut router = self.engine.clone();

        if let Some(secs) = engine.request_timeout_secs {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(secs)));
        }
        if engine.recovery {
            router = router.layer(CatchPanicLayer::new());
        }
        if engine.logger {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Bind `addresses` (or the configured ones when empty) and serve until
    /// SIGINT/SIGTERM.
    pub async fn start(self, addresses: &[&str]) -> FlashResult<()> {
        let addresses: Vec<String> = if addresses.is_empty() {
            self.config.listener.effective_addresses()
        } else {
            addresses.iter().map(|a| a.to_string()).collect()
        };

        let listeners = listener::bind_all(&addresses).await?;

        let shutdown = Shutdown::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            signals::shutdown_signal().await;
            trigger.trigger();
        });

        self.serve(listeners, shutdown).await
    }

    /// Serve pre-bound listeners until `shutdown` is triggered.
    pub async fn serve(self, listeners: Vec<TcpListener>, shutdown: Shutdown) -> FlashResult<()> {
        let app = self.router();

        let servers = listeners.into_iter().map(|listener| {
            let app = app.clone();
            let shutdown = shutdown.clone();
            async move {
                let addr = listener.local_addr()?;
                tracing::info!(address = %addr, "HTTP server starting");

                axum::serve(listener, app)
                    .with_graceful_shutdown(async move { shutdown.wait().await })
                    .await?;

                tracing::info!(address = %addr, "HTTP server stopped");
                Ok::<(), FlashError>(())
            }
        });

        futures_util::future::try_join_all(servers).await?;
        Ok(())
    }
}
