//! Extractors that deserialize and validate before a handler runs.
//!
//! Type and shape errors in the path or query string are reported as 422,
//! as are unparseable JSON bodies and field rule violations.

use async_trait::async_trait;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::types::ApiError;

/// JSON body that has passed its `validator` rules.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(json_rejection)?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string that has passed its `validator` rules.
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::unprocessable(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Typed path parameters; a segment that fails to parse is a 422.
#[derive(Debug, Clone)]
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(PathRejection::FailedToDeserializePathParams(e)) => Err(ApiError::unprocessable(e.body_text())),
            Err(other) => Err(ApiError::Rejected { status: other.status(), detail: other.body_text() }),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    let status = match rejection {
        JsonRejection::JsonDataError(_)
        | JsonRejection::JsonSyntaxError(_)
        | JsonRejection::MissingJsonContentType(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ref other => other.status(),
    };
    ApiError::Rejected { status, detail: rejection.body_text() }
}
