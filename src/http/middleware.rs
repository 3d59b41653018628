use axum::Router;
use axum::http::Request;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Assigns a v4 UUID to requests that arrive without `x-request-id`.
#[derive(Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let value = uuid::Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(value))
    }
}

/// Wraps the router with request ids and tracing. In debug mode spans carry
/// headers and request/response events are emitted at info.
pub fn apply(router: Router, debug: bool) -> Router {
    let level = if debug { Level::INFO } else { Level::DEBUG };
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(level).include_headers(debug))
        .on_request(DefaultOnRequest::new().level(level))
        .on_response(DefaultOnResponse::new().level(level).include_headers(debug));

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
            .layer(trace)
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}
