use axum::Router;
use axum::body::Body;
use axum::extract::Extension;
use axum::http::Request;
use axum::middleware;
use axum::routing::get;
use tower::ServiceExt;

use mediscan::infrastructure::observability::{REQUEST_ID_HEADER, RequestId, request_id_middleware};

fn app() -> Router {
    Router::new()
        .route(
            "/echo",
            get(|Extension(id): Extension<RequestId>| async move { id.0 }),
        )
        .layer(middleware::from_fn(request_id_middleware))
}

async fn call(header: Option<&str>) -> (String, String) {
    let mut builder = Request::builder().uri("/echo");
    if let Some(value) = header {
        builder = builder.header(REQUEST_ID_HEADER, value);
    }
    let response = app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let echoed = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let bytes = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    (echoed, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn given_caller_request_id_when_handling_then_echoes_same_id() {
    let (echoed, seen_by_handler) = call(Some("abc-123")).await;

    assert_eq!(echoed, "abc-123");
    assert_eq!(seen_by_handler, "abc-123");
}

#[tokio::test]
async fn given_no_request_id_when_handling_then_generates_uuid() {
    let (echoed, seen_by_handler) = call(None).await;

    assert!(uuid::Uuid::parse_str(&echoed).is_ok());
    assert_eq!(echoed, seen_by_handler);
}

#[tokio::test]
async fn given_oversized_request_id_when_handling_then_replaces_it() {
    let oversized = "x".repeat(200);

    let (echoed, _) = call(Some(&oversized)).await;

    assert_ne!(echoed, oversized);
    assert!(uuid::Uuid::parse_str(&echoed).is_ok());
}
