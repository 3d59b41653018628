#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::Router;
use serde_json::Value;
use todo_api::domain::repository::TodoListRepository;
use todo_api::http::routing;
use todo_api::infrastructure::sqlite_repo::SqliteRepository;

pub async fn app() -> Router {
    // use in-memory sqlite for tests
    let repo = SqliteRepository::connect("sqlite::memory:").await.unwrap();
    repo.init().await.unwrap();
    routing::build(repo, false)
}

pub async fn request(app: &Router, method: &str, path: &str, body: Option<Value>) -> hyper::Response<Body> {
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

/// Sends the request and returns status plus decoded JSON body.
pub async fn call(app: &Router, method: &str, path: &str, body: Option<Value>) -> (u16, Value) {
    let res = request(app, method, path, body).await;
    let status = res.status().as_u16();
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

/// Sends a raw body, optionally without a content type, and returns the status.
pub async fn send_raw(app: &Router, method: &str, path: &str, content_type: Option<&str>, body: &str) -> u16 {
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let mut req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    if let Some(ct) = content_type {
        req = req.header("content-type", ct);
    }
    let req = req.body(Body::from(body.to_string())).unwrap();
    app.clone().oneshot(req).await.unwrap().status().as_u16()
}
