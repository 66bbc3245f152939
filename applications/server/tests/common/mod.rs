//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use bazaar_server::{create_router, services::AuthService, state::AppState};
use bazaar_storage::SqliteMarket;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";
pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Router over a fresh SQLite file, removed on drop
pub struct TestApp {
    pub router: Router,
    pub store: Arc<SqliteMarket>,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let store = Arc::new(SqliteMarket::connect(&db_url).await.unwrap());

        // Minimum bcrypt cost keeps the suite fast
        let auth_service = Arc::new(AuthService::new(TEST_SECRET.to_string(), 365).with_hash_cost(4));

        let app_state = AppState::new(store.clone(), Arc::clone(&auth_service));

        Self {
            router: create_router(app_state),
            store,
            auth_service,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request and decode the JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("auth-token", token);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    /// Register `username@example.com` and return (token, user id)
    pub async fn register(&self, username: &str, location: &str) -> (String, String) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/register",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": TEST_PASSWORD,
                    "location": location,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");

        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["_id"].as_str().unwrap().to_string(),
        )
    }

    /// Register a user and top up their balance
    pub async fn register_funded(
        &self,
        username: &str,
        location: &str,
        amount: f64,
    ) -> (String, String) {
        let (token, id) = self.register(username, location).await;
        let (status, _) = self
            .post(
                "/api/increase-balance",
                &token,
                serde_json::json!({ "amount": amount }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        (token, id)
    }

    /// List a product and return its id
    pub async fn list_product(&self, token: &str, name: &str, price: f64) -> String {
        let (status, body) = self
            .send(
                Method::PUT,
                "/api/product",
                Some(token),
                Some(serde_json::json!({ "name": name, "price": price })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "add product failed: {body}");

        let (_, inventory) = self.get("/api/inventory", token).await;
        inventory["user"]["inventory"]
            .as_array()
            .unwrap()
            .iter()
            .rev()
            .find(|p| p["name"] == name)
            .unwrap()["_id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Current user view via GET /api/auth
    pub async fn whoami(&self, token: &str) -> Value {
        let (status, body) = self.send(Method::GET, "/api/auth", Some(token), None).await;
        assert_eq!(status, StatusCode::OK, "whoami failed: {body}");
        body["user"].clone()
    }
}
