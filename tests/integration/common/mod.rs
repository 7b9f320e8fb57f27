//! Common test utilities and fixtures for integration tests
//!
//! Every `TestApp` owns a private in-memory database with the schema applied
//! and a seeded administrator, so tests never share state.

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE},
        HeaderMap, Method, Request, StatusCode,
    },
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

use venturesroom_common::{db, Config};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const ADMIN_EMAIL: &str = "admin@venturesroom.test";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const PASSWORD: &str = "secret123";
pub const COMMISSION_RATE_BPS: i64 = 1000;

/// Response captured for assertions
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `code` field of an error body
    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(SET_COOKIE)
            .and_then(|value| value.to_str().ok())
    }
}

/// How a request carries its session token
#[derive(Debug, Clone, Copy)]
pub enum Credentials<'a> {
    Anonymous,
    Bearer(&'a str),
    Cookie(&'a str),
}

/// Test application with its own database
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub config: Config,
}

impl TestApp {
    /// Create a new test application with a fresh in-memory database
    pub async fn new() -> Result<Self> {
        let config = Config::from_lookup(|key| {
            let value = match key {
                "APP_ENV" => "test",
                "JWT_SECRET" => TEST_JWT_SECRET,
                "ADMIN_EMAIL" => ADMIN_EMAIL,
                "ADMIN_PASSWORD" => ADMIN_PASSWORD,
                "COMMISSION_RATE_BPS" => "1000",
                _ => return None,
            };
            Some(value.to_string())
        })?;

        let pool = db::connect_in_memory().await?;
        db::migrate(&pool).await?;

        let router = venturesroom_app::create_app(&config, pool.clone()).await?;

        Ok(Self {
            router,
            pool,
            config,
        })
    }

    /// Send a request through the router
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        credentials: Credentials<'_>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        builder = match credentials {
            Credentials::Anonymous => builder,
            Credentials::Bearer(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            Credentials::Cookie(token) => builder.header(
                COOKIE,
                format!("{}={token}", self.config.auth_cookie_name),
            ),
        };

        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::GET, uri, Credentials::Bearer(token), None)
            .await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Credentials::Bearer(token), Some(body))
            .await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Credentials::Bearer(token), Some(body))
            .await
    }

    /// POST /auth/register with extra profile fields merged into the body
    pub async fn register(&self, email: &str, role: &str, extra: Value) -> TestResponse {
        let mut body = json!({ "email": email, "password": PASSWORD, "role": role });
        if let (Some(target), Value::Object(fields)) = (body.as_object_mut(), extra) {
            target.extend(fields);
        }

        self.request(Method::POST, "/auth/register", Credentials::Anonymous, Some(body))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/auth/login",
            Credentials::Anonymous,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Token of the seeded administrator
    pub async fn admin_token(&self) -> String {
        let response = self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        assert_eq!(response.status, StatusCode::OK, "admin login: {:?}", response.body);
        token_of(&response)
    }

    /// Register a client and return its session token
    pub async fn client(&self, email: &str) -> String {
        let response = self.register(email, "client", json!({})).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        token_of(&response)
    }

    /// Register a startup or structure, approve it, and sign it in
    pub async fn approved(&self, email: &str, role: &str) -> UserFixture {
        let response = self
            .register(email, role, json!({ "company_name": format!("{email} Ltd") }))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        let id = user_id_of(&response);

        let admin = self.admin_token().await;
        let approval = self
            .post(&format!("/admin/users/{id}/approve"), &admin, json!({}))
            .await;
        assert_eq!(approval.status, StatusCode::OK, "{:?}", approval.body);

        let login = self.login(email, PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);

        UserFixture {
            id,
            token: token_of(&login),
        }
    }
}

/// A registered account and a live token for it
#[derive(Debug, Clone)]
pub struct UserFixture {
    pub id: Uuid,
    pub token: String,
}

pub fn token_of(response: &TestResponse) -> String {
    response.body["token"]
        .as_str()
        .expect("response carries a token")
        .to_string()
}

pub fn user_id_of(response: &TestResponse) -> Uuid {
    response.body["user"]["id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .expect("response carries a user id")
}

pub fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("body carries an id").to_string()
}
