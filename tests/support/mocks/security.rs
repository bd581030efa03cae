// tests/support/mocks/security.rs
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tabula_core::application::{
    ApplicationResult,
    dto::{Actor, SessionGrant},
    error::ApplicationError,
    ports::{
        security::PasswordHasher,
        session::{Credentials, SessionManager},
    },
};
use tabula_core::domain::record::{Record, RecordId};
use tokio::sync::Mutex;

use super::time::fixed_now;

/// Reversible "hash" that is easy to assert on: `hashed:<password>`.
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("hashed:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

/// Token table in memory: `token-<id>` maps to the actor it was issued to.
pub struct StaticSessionManager {
    expose: Vec<String>,
    sessions: Mutex<HashMap<String, Actor>>,
}

impl Default for StaticSessionManager {
    fn default() -> Self {
        Self {
            expose: vec!["username".to_string(), "role".to_string()],
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl StaticSessionManager {
    /// Registers a session without going through sign-in.
    pub async fn login(&self, id: i64, role: &str) -> String {
        let mut fields = serde_json::Map::new();
        fields.insert("username".into(), Value::from(format!("user{id}")));
        fields.insert("role".into(), Value::from(role));
        let actor = Actor::new(RecordId::new(id).expect("positive id"), fields);
        let token = format!("token-{id}");
        self.sessions.lock().await.insert(token.clone(), actor);
        token
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[async_trait]
impl SessionManager for StaticSessionManager {
    async fn load(&self, credentials: &Credentials) -> ApplicationResult<Option<Actor>> {
        let Some(token) = credentials.token() else {
            return Ok(None);
        };
        Ok(self.sessions.lock().await.get(token).cloned())
    }

    async fn create(&self, user: &Record) -> ApplicationResult<SessionGrant> {
        let actor = Actor::from_record(user, &self.expose)
            .ok_or_else(|| ApplicationError::infrastructure("user without id"))?;
        let token = format!("token-{}", actor.id());
        self.sessions
            .lock()
            .await
            .insert(token.clone(), actor.clone());
        Ok(SessionGrant {
            token,
            actor,
            expires_at: fixed_now(),
        })
    }

    async fn destroy(&self, credentials: &Credentials) -> ApplicationResult<()> {
        if let Some(token) = credentials.token() {
            self.sessions.lock().await.remove(token);
        }
        Ok(())
    }
}
