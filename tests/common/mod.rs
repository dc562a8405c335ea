//! Shared setup for router-level tests: a fresh temp database per test and
//! the exact route table the server runs.

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response, StatusCode},
    Router,
};
use ricemill_backend::app::{build_router, AppState};
use ricemill_backend::auth::{AuthStore, TokenService};
use ricemill_backend::mill::MillStore;
use ricemill_backend::notify::Notifier;
use serde_json::Value;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-key";

pub struct TestApp {
    pub router: Router,
    pub tokens: Arc<TokenService>,
    _db: NamedTempFile,
}

pub fn test_app() -> TestApp {
    let db = NamedTempFile::new().unwrap();
    let db_path = db.path().to_str().unwrap();

    let tokens = Arc::new(TokenService::new(TEST_SECRET.to_string()));
    let state = AppState {
        auth: Arc::new(AuthStore::new(db_path).unwrap()),
        mill: Arc::new(MillStore::new(db_path).unwrap()),
        tokens: tokens.clone(),
        notifier: Notifier::disabled(),
    };

    TestApp {
        router: build_router(state),
        tokens,
        _db: db,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Register then login, returning a live bearer token.
    pub async fn register_and_login(&self, name: &str, email: &str, password: &str) -> String {
        let status = self
            .request(
                "POST",
                "/auth/register",
                None,
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": password,
                })),
            )
            .await
            .status();
        assert_eq!(status, StatusCode::CREATED);

        self.login(email, password).await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/auth/login",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        body["access_token"].as_str().unwrap().to_string()
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
