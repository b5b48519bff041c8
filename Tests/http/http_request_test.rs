use api_shell::{
    errors::ServiceError,
    services::{HttpRequest, RequestOptions, RequestType},
};
use axum::{
    Json, Router,
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get},
};
use serde_json::json;
use std::net::SocketAddr;

/// Echo server: reports the method, auth header and body it received
async fn spawn_echo_server() -> SocketAddr {
    let app = Router::new()
        .route(
            "/echo",
            any(|method: Method, headers: HeaderMap, body: String| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                Json(json!({
                    "method": method.as_str(),
                    "authorization": auth,
                    "content_type": content_type,
                    "body": body,
                }))
            }),
        )
        .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_get_with_bearer_token() {
    let addr = spawn_echo_server().await;
    let client = HttpRequest::new();

    let response = client
        .get(
            &format!("http://{}/echo", addr),
            RequestOptions::new()
                .with_bearer_token("secret-token")
                .with_label("echo")
                .with_request_id("req-1"),
        )
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.request_id, "req-1");

    let echoed: serde_json::Value = response.json().unwrap();
    assert_eq!(echoed["method"], "GET");
    assert_eq!(echoed["authorization"], "Bearer secret-token");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let addr = spawn_echo_server().await;
    let client = HttpRequest::new();

    let response = client
        .get(&format!("http://{}/echo", addr), RequestOptions::new())
        .await
        .unwrap();

    assert!(uuid::Uuid::parse_str(&response.request_id).is_ok());
    let echoed: serde_json::Value = response.json().unwrap();
    assert!(echoed["authorization"].is_null());
}

#[tokio::test]
async fn test_post_json_and_form() {
    let addr = spawn_echo_server().await;
    let client = HttpRequest::new();
    let url = format!("http://{}/echo", addr);

    let response = client
        .post(&url, RequestOptions::new().with_json(json!({ "id": "a1" })))
        .await
        .unwrap();
    let echoed: serde_json::Value = response.json().unwrap();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["content_type"], "application/json");
    assert_eq!(echoed["body"], r#"{"id":"a1"}"#);

    let response = client
        .put(&url, RequestOptions::new().with_form([("desc", "two words")]))
        .await
        .unwrap();
    let echoed: serde_json::Value = response.json().unwrap();
    assert_eq!(echoed["method"], "PUT");
    assert_eq!(echoed["content_type"], "application/x-www-form-urlencoded");
    assert_eq!(echoed["body"], "desc=two+words");
}

#[tokio::test]
async fn test_every_verb_reaches_the_server() {
    let addr = spawn_echo_server().await;
    let client = HttpRequest::new();
    let url = format!("http://{}/echo", addr);

    for verb in [
        RequestType::Get,
        RequestType::Post,
        RequestType::Put,
        RequestType::Patch,
        RequestType::Delete,
        RequestType::Options,
    ] {
        let response = client.request(verb, &url, RequestOptions::new()).await.unwrap();
        let echoed: serde_json::Value = response.json().unwrap();
        assert_eq!(echoed["method"], verb.as_str());
    }

    let response = client.head(&url, RequestOptions::new()).await.unwrap();
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let addr = spawn_echo_server().await;
    let client = HttpRequest::new();

    let response = client
        .get(&format!("http://{}/teapot", addr), RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::IM_A_TEAPOT);
    assert_eq!(response.text(), "short and stout");
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_transport_failure_is_external_service_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = HttpRequest::new()
        .get(&format!("http://{}/echo", addr), RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::ExternalServiceError { .. }));
    assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
}
