use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::http::extract::ValidQuery;

#[derive(Debug, Serialize)]
struct HealthResponse { status: &'static str }

#[derive(Debug, Deserialize, Validate)]
pub struct EchoParams {
    pub message: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
struct EchoResponse {
    #[serde(rename = "Message")]
    message: String,
}

async fn health() -> Json<HealthResponse> { Json(HealthResponse { status: "ok" }) }

async fn echo(ValidQuery(params): ValidQuery<EchoParams>) -> Json<EchoResponse> {
    Json(EchoResponse { message: format!("{} {}!", params.message, params.name) })
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/echo", get(echo))
}
