#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pactum_api::auth::jwt::JwtConfig;
use pactum_api::config::ServerConfig;
use pactum_api::router::build_app_router;
use pactum_api::state::AppState;
use pactum_core::attachment::AttachmentManager;
use pactum_core::report::TracingReporter;
use pactum_core::types::DbId;
use pactum_storage::local::LocalObjectStore;
use pactum_storage::{StorageBackendType, StorageSettings};
use serde_json::Value;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

pub const PUBLIC_FILES_URL: &str = "http://localhost:3000/files";

const MULTIPART_BOUNDARY: &str = "pactum-test-boundary";

/// Build a test `ServerConfig` storing attachments under `storage_root`.
pub fn test_config(storage_root: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        storage: StorageSettings {
            backend: StorageBackendType::Local,
            root: storage_root,
            bucket: None,
            region: None,
            endpoint: None,
        },
        storage_public_url: PUBLIC_FILES_URL.to_string(),
        max_upload_bytes: 1024 * 1024,
        alert_sweep_interval_secs: 3600,
        alert_lookahead_days: 30,
    }
}

/// The application router plus the temporary storage directory it writes
/// attachments to. The directory lives as long as this value.
pub struct TestApp {
    pub router: Router,
    pub storage: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// On-disk path of a stored attachment.
    pub fn stored_path(&self, locator: &str) -> PathBuf {
        self.storage.path().join(locator)
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a fresh local storage directory.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let storage = TempDir::new().expect("temp dir should be created");
    let config = test_config(storage.path().to_path_buf());

    let attachments = AttachmentManager::new(
        Arc::new(LocalObjectStore::new(storage.path())),
        config.storage_public_url.clone(),
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        attachments: Arc::new(attachments),
        reporter: Arc::new(TracingReporter),
    };

    TestApp {
        router: build_app_router(state, &config),
        storage,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should be handled")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let req = request(Method::GET, uri, None).body(Body::empty()).unwrap();
    send(app, req).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let req = request(Method::GET, uri, Some(token))
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let req = request(Method::POST, uri, None)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    let req = request(Method::POST, uri, Some(token))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let req = request(Method::POST, uri, Some(token))
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    let req = request(Method::PUT, uri, Some(token))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let req = request(Method::DELETE, uri, Some(token))
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

/// A file part for [`multipart_auth`]: name, content type, bytes.
pub struct FilePart<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

/// Encode a `data` JSON part and an optional `file` part.
pub fn multipart_body(data: &Value, file: Option<&FilePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"data\"\r\n\
             Content-Type: application/json\r\n\r\n{data}\r\n"
        )
        .as_bytes(),
    );
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n\
                 Content-Type: {}\r\n\r\n",
                file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn multipart_auth(
    app: Router,
    method: Method,
    uri: &str,
    data: Value,
    file: Option<FilePart<'_>>,
    token: &str,
) -> Response<Body> {
    let req = request(method, uri, Some(token))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(multipart_body(&data, file.as_ref())))
        .unwrap();
    send(app, req).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Sign up `email` through the API; returns the access token and user id.
pub async fn signup(app: Router, email: &str) -> (String, DbId) {
    let body = serde_json::json!({ "email": email, "password": "correct-horse" });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let token = json["access_token"].as_str().unwrap().to_string();
    let id = json["user"]["id"].as_i64().unwrap();
    (token, id)
}

/// A minimal valid contract form.
pub fn contract_form(title: &str, status: &str) -> Value {
    serde_json::json!({
        "title": title,
        "client_name": "Globex",
        "status": status,
    })
}
