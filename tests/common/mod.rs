//! Shared services and helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Method, Request, StatusCode},
    response::Response,
    Router,
};
use flash::{Context, Field, MethodTable, Middleware, Post, Service, ServiceSchema};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Versioned service with one valid endpoint and three that never bind.
pub struct Service1;

impl Service1 {
    async fn ping(self: Arc<Self>, ctx: Context) -> Response {
        ctx.json(StatusCode::OK, json!({ "message": "pong" }))
    }

    async fn extra_param(self: Arc<Self>, ctx: Context, _data: Value) -> Response {
        ctx.json(StatusCode::OK, json!({ "message": "pong" }))
    }

    async fn ctx_param_missing(self: Arc<Self>, _data: Value) {}
}

impl Service for Service1 {
    fn schema() -> ServiceSchema {
        ServiceSchema::new()
            .root(r#"version:"1" root:"/test/" prefix:"/""#)
            .get("ping", r#"url:"/ping""#)
            .get("ping2", r#"url:"/ping" version:"2""#)
            .get("extraParam", r#"url:"/invalid" v:"1""#)
            .get("ctxParamMissing", r#"url:"/invalid" v:"2""#)
    }

    fn methods(methods: &mut MethodTable<Self>) {
        methods
            .register("Ping", Service1::ping)
            .register("ExtraParam", Service1::extra_param)
            .register("CtxParamMissing", Service1::ctx_param_missing);
    }
}

/// One endpoint per verb on the same URL, rooted at the type name.
pub struct Service2;

impl Service2 {
    async fn pong(self: Arc<Self>, ctx: Context) -> Response {
        ctx.json(StatusCode::OK, json!({ "message": "pong" }))
    }
}

impl Service for Service2 {
    fn schema() -> ServiceSchema {
        ServiceSchema::new()
            .get("getPing", r#"url:"/ping""#)
            .post("postPing", r#"url:"/ping""#)
            .put("putPing", r#"url:"/ping""#)
            .patch("patchPing", r#"url:"/ping""#)
            .delete("deletePing", r#"url:"/ping""#)
            .options("optionPing", r#"url:"/ping""#)
    }

    fn methods(methods: &mut MethodTable<Self>) {
        for name in [
            "GetPing",
            "PostPing",
            "PutPing",
            "PatchPing",
            "DeletePing",
            "OptionPing",
        ] {
            methods.register(name, Service2::pong);
        }
    }

    fn middlewares(&self) -> Vec<Middleware> {
        vec![
            tag_response("x-service", "service2"),
            tag_response("x-chain", "outer"),
            tag_response("x-chain", "inner"),
        ]
    }
}

/// Marker for a field that is not an endpoint.
pub struct Database;

/// Prefix alias, defaults, a non-endpoint field and an explicit method name.
pub struct Inventory {
    pub restocked: std::sync::atomic::AtomicU32,
}

impl Inventory {
    async fn items(self: Arc<Self>, ctx: Context) -> Response {
        ctx.string(StatusCode::OK, "items")
    }

    async fn replenish(self: Arc<Self>, ctx: Context) -> Response {
        let total = self
            .restocked
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            + 1;
        ctx.json(StatusCode::CREATED, json!({ "restocked": total }))
    }
}

impl Service for Inventory {
    fn schema() -> ServiceSchema {
        ServiceSchema::new()
            .root(r#"pre:"api" v:"3""#)
            .field::<Database>("store", "")
            .get("items", "")
            .push(
                Field::new::<Post>("restock")
                    .with_tags(r#"url:"/items" version:"4" root:"stock""#)
                    .bind_to("Replenish"),
            )
    }

    fn methods(methods: &mut MethodTable<Self>) {
        methods
            .register("Items", Inventory::items)
            .register("Replenish", Inventory::replenish);
    }

    fn middlewares(&self) -> Vec<Middleware> {
        vec![tag_response("x-service", "inventory")]
    }
}

/// Middleware appending `name: value` to every response.
pub fn tag_response(name: &'static str, value: &'static str) -> Middleware {
    Middleware::from_fn(move |request, next| async move {
        let mut response = next.run(request).await;
        response
            .headers_mut()
            .append(name, HeaderValue::from_static(value));
        response
    })
}

/// Dispatch one request in-process.
pub async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, HeaderMap, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}
