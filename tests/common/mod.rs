//! Shared helpers for the integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use showcase::auth::hash_password;
use showcase::config::Config;
use showcase::database::AppState;
use showcase::route::create_app;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const BOUNDARY: &str = "showcase-test-boundary";

/// A router over a throwaway database and storage directory
pub struct TestApp {
    pub app: Router,
    pub dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_admin(true)
    }

    pub fn with_admin(admin: bool) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = dir.path().join("test.db");
        let mut config = Config::local(db_path.to_str().unwrap(), dir.path().join("storage"));

        if admin {
            config.admin_email = Some(ADMIN_EMAIL.to_string());
            config.admin_password_hash = Some(hash_password(ADMIN_PASSWORD).unwrap());
        }

        let state = AppState::open(config).expect("Failed to open test stores");
        Self {
            app: create_app(state),
            dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Signs in with the test admin and returns the bearer token
    pub async fn login(&self) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/api/auth/login",
                json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response.into_body()).await;
        body["token"].as_str().unwrap().to_string()
    }

    /// Path on disk of a stored object, given its public URL
    pub fn stored_path(&self, url: &str) -> std::path::PathBuf {
        let key = url
            .strip_prefix("http://localhost:8080/media/")
            .expect("URL not issued by the test store");
        self.dir.path().join("storage").join(key)
    }
}

/// One part of a multipart form: `(name, file_name, data)`
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
            }
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, token: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let body = multipart_body(parts);
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header("content-length", body.len());

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    builder.body(Body::from(body)).unwrap()
}

pub fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

pub fn request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Helper function to parse response body as JSON
pub async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

pub async fn response_bytes(body: Body) -> Vec<u8> {
    body.collect()
        .await
        .expect("Failed to read response body")
        .to_bytes()
        .to_vec()
}
