//! Shared helpers for router-level integration tests.
//!
//! These tests drive the real router via `tower::ServiceExt::oneshot`
//! without a database: the state is built from a config literal with
//! `database_url: None`, which exercises the degraded-mode paths.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use secrecy::SecretString;
use serde_json::Value;

use uplift_server::config::{AdminConfig, ServerConfig};
use uplift_server::routes;
use uplift_server::state::AppState;

pub const ADMIN_EMAIL: &str = "ops@example.org";
pub const ADMIN_PASSWORD: &str = "correct horse battery";
pub const ADMIN_API_KEY: &str = "legacy-static-key";
pub const JWT_SECRET: &str = "0123456789abcdef0123456789abcdef";

/// Config literal with no database configured.
#[must_use]
pub fn degraded_config() -> ServerConfig {
    ServerConfig {
        database_url: None,
        host: "127.0.0.1".parse().expect("valid ip"),
        port: 0,
        admin: AdminConfig {
            email: ADMIN_EMAIL.to_string(),
            password: SecretString::from(ADMIN_PASSWORD),
            jwt_secret: SecretString::from(JWT_SECRET),
            api_key: Some(ADMIN_API_KEY.to_string()),
        },
        cloud: None,
        uploads_dir: std::env::temp_dir().join("uplift-test-uploads"),
        ping_message: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    }
}

/// Build the full application router in degraded mode.
#[must_use]
pub fn degraded_app() -> Router {
    let state = AppState::new(degraded_config()).expect("state builds without a database");
    routes::app(state)
}

/// Build a JSON request.
#[must_use]
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// Build an empty-bodied request.
#[must_use]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

/// Extract a JSON body from a response.
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON body")
}

/// Multipart boundary used by [`multipart_request`].
pub const BOUNDARY: &str = "uplift-test-boundary";

/// Build a `multipart/form-data` request from text fields and file parts.
#[must_use]
pub fn multipart_request(
    uri: &str,
    text_fields: &[(&str, &str)],
    file_fields: &[(&str, &str, &[u8])],
    extra_headers: &[(&str, &str)],
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();

    for (name, value) in text_fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    for (name, filename, data) in file_fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    for (name, value) in extra_headers {
        builder = builder.header(*name, *value);
    }

    builder.body(Body::from(body)).expect("valid request")
}
