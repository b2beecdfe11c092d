//! Demo server.
//!
//! Registers a small versioned service and serves it:
//!
//! ```text
//! GET /v1/test/ping  → {"message":"pong"}
//! GET /v2/test/ping  → {"message":"pong with version"}
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use axum::{http::StatusCode, response::Response};
use clap::Parser;
use serde_json::json;

use flash::lifecycle::startup;
use flash::{Context, MethodTable, Server, Service, ServiceSchema};

#[derive(Parser)]
#[command(name = "flash")]
#[command(about = "Serve the demo ping service", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen addresses (e.g. ":7071"); defaults to the configured ones
    addresses: Vec<String>,
}

struct TestService;

impl TestService {
    async fn ping(self: Arc<Self>, ctx: Context) -> Response {
        ctx.json(StatusCode::OK, json!({ "message": "pong" }))
    }

    async fn ping2(self: Arc<Self>, ctx: Context) -> Response {
        ctx.json(StatusCode::OK, json!({ "message": "pong with version" }))
    }
}

impl Service for TestService {
    fn schema() -> ServiceSchema {
        ServiceSchema::new()
            .root(r#"version:"1" root:"/test/""#)
            .get("ping", r#"url:"/ping""#)
            .get("ping2", r#"url:"/ping" version:"2""#)
    }

    fn methods(methods: &mut MethodTable<Self>) {
        methods
            .register("Ping", TestService::ping)
            .register("Ping2", TestService::ping2);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = startup::prepare(cli.config.as_deref())?;

    tracing::info!("flash v{} starting", env!("CARGO_PKG_VERSION"));

    let mut server = Server::with_config(config);
    server.add_service(Arc::new(TestService))?;

    let addresses: Vec<&str> = cli.addresses.iter().map(String::as_str).collect();
    server.start(&addresses).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
