//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use accounthub_api::state::Stores;
use accounthub_core::config::AuthConfig;
use accounthub_core::result::AppResult;
use accounthub_core::traits::EmailSender;
use accounthub_database::MemoryAccountStore;

/// Email sender that keeps every message in memory.
#[derive(Debug, Default)]
pub struct Outbox {
    sent: Mutex<Vec<(String, String)>>,
}

impl Outbox {
    /// `(address, code)` pairs in send order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// The code of the most recent message to `address`.
    pub fn last_code_for(&self, address: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .rev()
            .find(|(to, _)| to == address)
            .map(|(_, code)| code)
    }
}

#[async_trait]
impl EmailSender for Outbox {
    async fn send_reset_email(&self, to: &str, code: &str) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }
}

/// Decoded response of a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// JSON body, or a string for non-JSON bodies.
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, shared with the router
    pub store: MemoryAccountStore,
    /// Captured reset emails
    pub outbox: Arc<Outbox>,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store.
    pub fn new() -> Self {
        let config = AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            hash_memory_kib: 256,
            hash_iterations: 1,
            hash_parallelism: 1,
            ..AuthConfig::default()
        };

        let store = MemoryAccountStore::new();
        let stores = Stores {
            users: Arc::new(store.clone()),
            api_tokens: Arc::new(store.clone()),
            password_resets: Arc::new(store.clone()),
            notification_targets: Arc::new(store.clone()),
        };
        let outbox = Arc::new(Outbox::default());

        let state = accounthub_api::AppState::build(&config, stores, outbox.clone())
            .expect("Failed to build app state");

        Self {
            router: accounthub_api::build_router(state),
            store,
            outbox,
        }
    }

    /// Send a request through the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, body }
    }

    /// Register a local account and return its id.
    pub async fn signup(&self, username: &str, password: &str, email: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/v1/auth/",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                    "email": email,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.data()["id"].as_i64().unwrap()
    }

    /// Log in and return the session token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self.try_login(username, password).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.data()["token"].as_str().unwrap().to_string()
    }

    /// Attempt a login.
    pub async fn try_login(&self, username: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/v1/auth/login",
            Some(serde_json::json!({
                "username": username,
                "password": password,
            })),
            None,
        )
        .await
    }
}
