use super::*;
use crate::config::AccountConfig;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;


const EDITOR_EMAIL: &str = "editor@example.com";
const EDITOR_PASSWORD: &str = "correct horse";
const MULTIPART_BOUNDARY: &str = "realnews-test-boundary";

/// Test configuration rooted in a fresh temp dir, with one editor and one
/// read-only account
fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.persistence.database_path = dir.path().join("api.db");
    config.persistence.media_dir = dir.path().join("media");
    config.site.public_base_url = "http://news.test".to_string();
    config.auth.accounts = vec![
        AccountConfig {
            email: EDITOR_EMAIL.to_string(),
            password: EDITOR_PASSWORD.to_string(),
            can_publish: true,
        },
        AccountConfig {
            email: "intern@example.com".to_string(),
            password: "readonly".to_string(),
            can_publish: false,
        },
    ];
    config
}

/// Router over a fresh newsroom
async fn create_test_app() -> (Router, Arc<Newsroom>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let newsroom = Arc::new(Newsroom::new(config.clone()).await.unwrap());
    let app = create_router(newsroom.clone(), Arc::new(config));
    (app, newsroom, dir)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn authed(method: &str, uri: &str, token: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(body)
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Sign in through the API and return the bearer token
async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/session/login",
            &serde_json::json!({ "email": email, "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Encode text fields and an optional image as multipart/form-data
fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &str, &[u8])>) -> Body {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    Body::from(body)
}

fn article_fields<'a>(title: &'a str, category: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("title", "தலைப்பு"),
        ("english_title", title),
        ("content", "உள்ளடக்கம்"),
        ("english_content", "Body text"),
        ("category", category),
    ]
}

/// POST /admin/posts with the given form
async fn publish(
    app: &Router,
    token: &str,
    fields: &[(&str, &str)],
    image: Option<(&str, &str, &[u8])>,
) -> Response {
    let mut request = authed(
        "POST",
        "/api/v1/admin/posts",
        token,
        multipart_body(fields, image),
    );
    request.headers_mut().insert(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")
            .parse()
            .unwrap(),
    );
    app.clone().oneshot(request).await.unwrap()
}

#[tokio::test]
async fn api_server_starts_and_stops_gracefully() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir);
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();
    let newsroom = Arc::new(Newsroom::new(config.clone()).await.unwrap());

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(start_api_server(newsroom, Arc::new(config), async move {
        let _ = stop_rx.await;
    }));

    tokio::time::sleep(Duration::from_millis(50)).await;
    stop_tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn cors_headers_present_when_enabled() {
    let (app, _newsroom, _dir) = create_test_app().await;

    let request = Request::builder()
        .uri("/api/v1/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn cors_headers_absent_when_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir);
    config.server.api.cors_enabled = false;
    let newsroom = Arc::new(Newsroom::new(config.clone()).await.unwrap());
    let app = create_router(newsroom, Arc::new(config));

    let request = Request::builder()
        .uri("/api/v1/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(
        !response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (app, _newsroom, _dir) = create_test_app().await;

    let response = app.oneshot(get("/api/v1/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
