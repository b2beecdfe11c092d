//! In-process dispatch tests for registered services.

use std::sync::atomic::AtomicU32;
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::Response;
use flash::{Context, FlashError, MethodTable, Server, Service, ServiceSchema, Verb};

mod common;

use common::{send, Inventory, Service1, Service2};

const PONG: &str = r#"{"message":"pong"}"#;

fn setup_server() -> Server {
    let mut server = Server::default();
    server.add_service(Arc::new(Service1)).unwrap();
    server.add_service(Arc::new(Service2)).unwrap();
    server
}

#[tokio::test]
async fn test_services() {
    let router = setup_server().router();

    let cases = [
        (Method::GET, "/v1/test/ping", StatusCode::OK, "ping v1 success"),
        (Method::GET, "/v2/test/ping", StatusCode::NOT_FOUND, "ping2 method not created"),
        (Method::GET, "/v1/test/invalid", StatusCode::NOT_FOUND, "extra param method"),
        (Method::GET, "/v2/test/invalid", StatusCode::NOT_FOUND, "ctx missing method"),
        (Method::GET, "/service2/ping", StatusCode::OK, "service2 get ping"),
        (Method::POST, "/service2/ping", StatusCode::OK, "service2 post ping"),
        (Method::PUT, "/service2/ping", StatusCode::OK, "service2 put ping"),
        (Method::PATCH, "/service2/ping", StatusCode::OK, "service2 patch ping"),
        (Method::DELETE, "/service2/ping", StatusCode::OK, "service2 delete ping"),
        (Method::OPTIONS, "/service2/ping", StatusCode::OK, "service2 options ping"),
    ];

    for (method, uri, expected, name) in cases {
        let (status, _, body) = send(&router, method, uri).await;
        assert_eq!(status, expected, "{}", name);
        if expected == StatusCode::OK {
            assert_eq!(body, PONG, "{}", name);
        }
    }
}

#[test]
fn test_route_table() {
    let server = setup_server();
    let routes: Vec<_> = server
        .routes()
        .iter()
        .map(|r| (r.verb, r.path.as_str(), r.method.as_str()))
        .collect();

    assert_eq!(
        routes,
        [
            (Verb::Get, "/v1/test/ping", "Ping"),
            (Verb::Get, "/service2/ping", "GetPing"),
            (Verb::Post, "/service2/ping", "PostPing"),
            (Verb::Put, "/service2/ping", "PutPing"),
            (Verb::Patch, "/service2/ping", "PatchPing"),
            (Verb::Delete, "/service2/ping", "DeletePing"),
            (Verb::Options, "/service2/ping", "OptionPing"),
        ]
    );
    assert_eq!(server.services().collect::<Vec<_>>(), ["Service1", "Service2"]);
}

#[tokio::test]
async fn test_wrong_verb_is_not_routed() {
    let mut server = Server::new();
    server.add_service(Arc::new(Service1)).unwrap();

    let (status, _, _) = send(&server.router(), Method::POST, "/v1/test/ping").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_middleware_is_scoped_per_service() {
    let mut server = Server::new();
    server.add_service(Arc::new(Service1)).unwrap();
    server.add_service(Arc::new(Service2)).unwrap();
    server
        .add_service(Arc::new(Inventory {
            restocked: AtomicU32::new(0),
        }))
        .unwrap();
    let router = server.router();

    let (_, headers, _) = send(&router, Method::GET, "/v1/test/ping").await;
    assert!(headers.get("x-service").is_none());

    let (_, headers, _) = send(&router, Method::PUT, "/service2/ping").await;
    assert_eq!(headers["x-service"], "service2");
    // Inner middleware returns first, so it appends first.
    let chain: Vec<_> = headers
        .get_all("x-chain")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(chain, ["inner", "outer"]);

    let (_, headers, _) = send(&router, Method::GET, "/api/v3/inventory/items").await;
    assert_eq!(headers["x-service"], "inventory");
}

#[tokio::test]
async fn test_defaults_aliases_and_explicit_method() {
    let mut server = Server::new();
    let inventory = Arc::new(Inventory {
        restocked: AtomicU32::new(0),
    });
    server.add_service(Arc::clone(&inventory)).unwrap();
    let router = server.router();

    let paths: Vec<_> = server.routes().iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, ["/api/v3/inventory/items", "/api/v4/stock/items"]);

    let (status, _, body) = send(&router, Method::GET, "/api/v3/inventory/items").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "items"));

    let (status, _, body) = send(&router, Method::POST, "/api/v4/stock/items").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, r#"{"restocked":1}"#);

    // Handlers run against the registered instance.
    send(&router, Method::POST, "/api/v4/stock/items").await;
    assert_eq!(
        inventory
            .restocked
            .load(std::sync::atomic::Ordering::SeqCst),
        2
    );
    assert!(Arc::ptr_eq(&server.service::<Inventory>().unwrap(), &inventory));
    assert!(server.service::<Service1>().is_none());
}

struct Duplicated;

impl Service for Duplicated {
    fn schema() -> ServiceSchema {
        ServiceSchema::new()
            .get("ping", r#"url:"/a""#)
            .post("ping", r#"url:"/b""#)
    }

    fn methods(methods: &mut MethodTable<Self>) {
        methods.register("Ping", Duplicated::ping);
    }
}

impl Duplicated {
    async fn ping(self: Arc<Self>, ctx: Context) -> Response {
        ctx.status(StatusCode::OK)
    }
}

#[tokio::test]
async fn test_invalid_service_registers_nothing() {
    let mut server = Server::new();
    let err = server.add_service(Arc::new(Duplicated)).unwrap_err();

    assert!(matches!(err, FlashError::InvalidServiceType { .. }));
    assert!(server.routes().is_empty());
    assert_eq!(server.services().count(), 0);

    let (status, _, _) = send(&server.router(), Method::GET, "/duplicated/a").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

struct Exploding;

impl Exploding {
    async fn boom(self: Arc<Self>, _ctx: Context) -> Response {
        panic!("handler failure");
    }
}

impl Service for Exploding {
    fn schema() -> ServiceSchema {
        ServiceSchema::new().get("boom", "")
    }

    fn methods(methods: &mut MethodTable<Self>) {
        methods.register("Boom", Exploding::boom);
    }
}

#[tokio::test]
async fn test_default_server_recovers_from_panics() {
    let mut server = Server::default();
    server.add_service(Arc::new(Exploding)).unwrap();

    let (status, _, _) = send(&server.router(), Method::GET, "/exploding/boom").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_service_declared_inside_test_body() {
    struct Local;

    impl Local {
        async fn ping(self: Arc<Self>, ctx: Context) -> Response {
            ctx.string(StatusCode::OK, "local")
        }
    }

    impl Service for Local {
        fn schema() -> ServiceSchema {
            ServiceSchema::new().get("ping", "")
        }

        fn methods(methods: &mut MethodTable<Self>) {
            methods.register("Ping", Local::ping);
        }
    }

    let mut server = Server::new();
    server.add_service(Arc::new(Local)).unwrap();
    assert_eq!(server.services().collect::<Vec<_>>(), ["Local"]);

    let (status, _, body) = send(&server.router(), Method::GET, "/local/ping").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "local"));
}

struct Users;

impl Users {
    async fn show(self: Arc<Self>, ctx: Context) -> Response {
        let id = ctx.path().rsplit('/').next().unwrap_or_default().to_string();
        ctx.string(StatusCode::OK, id)
    }
}

impl Service for Users {
    fn schema() -> ServiceSchema {
        ServiceSchema::new()
            .root(r#"v:"1""#)
            .get("show", r#"url:"/:id""#)
            .get("files", r#"url:"/files/*rest""#)
    }

    fn methods(methods: &mut MethodTable<Self>) {
        methods
            .register("Show", Users::show)
            .register("Files", Users::show);
    }
}

#[tokio::test]
async fn test_colon_and_star_segments_become_captures() {
    let mut server = Server::new();
    server.add_service(Arc::new(Users)).unwrap();

    let paths: Vec<_> = server.routes().iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, ["/v1/users/{id}", "/v1/users/files/{*rest}"]);

    let router = server.router();
    let (status, _, body) = send(&router, Method::GET, "/v1/users/42").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "42"));

    let (status, _, body) = send(&router, Method::GET, "/v1/users/files/a/b.txt").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "b.txt"));
}

struct BadCatchAll;

impl BadCatchAll {
    async fn ping(self: Arc<Self>, ctx: Context) -> Response {
        ctx.status(StatusCode::OK)
    }
}

impl Service for BadCatchAll {
    fn schema() -> ServiceSchema {
        ServiceSchema::new()
            .get("ping", "")
            .get("rest", r#"url:"/*rest/tail""#)
    }

    fn methods(methods: &mut MethodTable<Self>) {
        methods
            .register("Ping", BadCatchAll::ping)
            .register("Rest", BadCatchAll::ping);
    }
}

struct UnnamedCapture;

impl Service for UnnamedCapture {
    fn schema() -> ServiceSchema {
        ServiceSchema::new().get("show", r#"url:"/:""#)
    }

    fn methods(_: &mut MethodTable<Self>) {}
}

#[tokio::test]
async fn test_unregistrable_path_is_an_error() {
    let mut server = Server::new();

    let err = server.add_service(Arc::new(BadCatchAll)).unwrap_err();
    assert!(
        matches!(err, FlashError::InvalidServiceType { ref reason, .. } if reason.contains("`rest`")),
        "{}",
        err
    );

    let err = server.add_service(Arc::new(UnnamedCapture)).unwrap_err();
    assert!(matches!(err, FlashError::InvalidServiceType { .. }));

    // The valid `ping` endpoint declared before the bad one is not registered.
    assert!(server.routes().is_empty());
    let (status, _, _) = send(&server.router(), Method::GET, "/badcatchall/ping").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
