//! HTTP Middleware

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;

/// 失败请求的访问日志
///
/// 5xx 记为 error，4xx 记为 warn，其余不记录；响应体由 ApiError 负责
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match failure_class(status) {
        Some(FailureClass::Server) => tracing::error!(
            %method,
            %path,
            status = status.as_u16(),
            elapsed_ms,
            "Request failed"
        ),
        Some(FailureClass::Client) => tracing::warn!(
            %method,
            %path,
            status = status.as_u16(),
            elapsed_ms,
            "Request rejected"
        ),
        None => {}
    }

    response
}

#[derive(Debug, PartialEq, Eq)]
enum FailureClass {
    Client,
    Server,
}

fn failure_class(status: StatusCode) -> Option<FailureClass> {
    if status.is_server_error() {
        Some(FailureClass::Server)
    } else if status.is_client_error() {
        Some(FailureClass::Client)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::util::ServiceExt;

    #[test]
    fn test_failure_class() {
        assert_eq!(failure_class(StatusCode::OK), None);
        assert_eq!(failure_class(StatusCode::NOT_MODIFIED), None);
        assert_eq!(
            failure_class(StatusCode::NOT_FOUND),
            Some(FailureClass::Client)
        );
        assert_eq!(
            failure_class(StatusCode::BAD_GATEWAY),
            Some(FailureClass::Server)
        );
    }

    #[tokio::test]
    async fn test_response_is_untouched() {
        let router = Router::new()
            .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }))
            .layer(axum::middleware::from_fn(error_logging_middleware));

        let request = axum::http::Request::builder()
            .uri("/teapot")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }
}
