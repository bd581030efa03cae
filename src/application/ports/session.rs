// src/application/ports/session.rs
use crate::application::{
    ApplicationResult,
    dto::{Actor, SessionGrant},
    error::ApplicationError,
};
use crate::domain::record::Record;
use async_trait::async_trait;

/// Raw credentials presented by a request, before anything is verified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
}

impl Credentials {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Session port: authenticates requests and mints/invalidates credentials.
#[async_trait]
pub trait SessionManager: Send + Sync {
    /// Resolves the actor behind `credentials`. Missing, invalid, expired or
    /// revoked credentials yield `Ok(None)`; only collaborator failures are
    /// errors.
    async fn load(&self, credentials: &Credentials) -> ApplicationResult<Option<Actor>>;

    /// Like [`load`](Self::load) but an absent actor is `Unauthorized`.
    async fn authorize(&self, credentials: &Credentials) -> ApplicationResult<Actor> {
        self.load(credentials)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("no active session"))
    }

    /// Opens a session for a stored user record.
    async fn create(&self, user: &Record) -> ApplicationResult<SessionGrant>;

    /// Invalidates the session behind `credentials`.
    async fn destroy(&self, _credentials: &Credentials) -> ApplicationResult<()> {
        Err(ApplicationError::not_implemented(
            "session manager cannot destroy sessions",
        ))
    }
}
