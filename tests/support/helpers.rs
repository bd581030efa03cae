// tests/support/helpers.rs
use super::mocks::{CountingRepo, PlainPasswordHasher, StaticSessionManager, SteppingClock};
use axum::{
    Router,
    body::{self, Body},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tabula_core::{
    application::{
        identity::IdentityFields,
        ports::session::SessionManager,
        resources::{ResourceDefinition, definition::with_builtin_users},
        services::ApplicationServices,
    },
    domain::record::{CollectionName, Record, RecordId, RecordRepository},
    presentation::http::{
        routes::{RouterOptions, build_router},
        state::HttpState,
    },
};
use tower::util::ServiceExt as _;

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<CountingRepo>,
    pub sessions: Arc<StaticSessionManager>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// Router over `definitions` plus the built-in users resource.
    pub fn new(definitions: Vec<ResourceDefinition>) -> Self {
        Self::build(definitions, true)
    }

    /// Router whose policies get no session manager at all.
    pub fn without_sessions(definitions: Vec<ResourceDefinition>) -> Self {
        Self::build(definitions, false)
    }

    fn build(definitions: Vec<ResourceDefinition>, with_sessions: bool) -> Self {
        let identity = IdentityFields::default();
        let definitions =
            with_builtin_users(definitions, &identity, "users").expect("valid definitions");
        let repo = Arc::new(CountingRepo::default());
        let sessions = Arc::new(StaticSessionManager::default());
        let session_port: Option<Arc<dyn SessionManager>> = if with_sessions {
            Some(sessions.clone())
        } else {
            None
        };

        let services = ApplicationServices::from_definitions(
            &definitions,
            repo.clone(),
            Arc::new(PlainPasswordHasher),
            session_port,
            Arc::new(SteppingClock::default()),
            identity,
        )
        .expect("services");
        let state = HttpState {
            services: Arc::new(services),
        };

        Self {
            router: build_router(state, &RouterOptions::default()),
            repo,
            sessions,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).expect("request")).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let (parts, body) = response.into_parts();
        let bytes = body::to_bytes(body, 1024 * 1024).await.expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Stores a user directly, with the password already "hashed".
    pub async fn seed_user(&self, username: &str, password: &str, role: &str) -> RecordId {
        let record = Record::try_from(json!({
            "username": username,
            "password": format!("hashed:{password}"),
            "role": role,
        }))
        .expect("object");
        self.repo
            .inner()
            .insert(&CollectionName::new("users").expect("name"), record)
            .await
            .expect("seed user")
    }

    pub async fn stored(&self, collection: &str, id: i64) -> Option<Record> {
        self.repo
            .inner()
            .find_by_id(
                &CollectionName::new(collection).expect("name"),
                RecordId::new(id).expect("id"),
            )
            .await
            .expect("lookup")
    }
}

pub fn id_of(body: &Value) -> i64 {
    body.get("id").and_then(Value::as_i64).expect("numeric id")
}

pub fn assert_code(response: &TestResponse, status: StatusCode, code: &str) {
    assert_eq!(response.status, status, "body: {}", response.body);
    assert_eq!(response.body, json!({ "code": code }));
}
