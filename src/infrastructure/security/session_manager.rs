// src/infrastructure/security/session_manager.rs
use crate::application::{
    ApplicationResult,
    dto::{Actor, SessionGrant, TokenSubject},
    error::ApplicationError,
    ports::{
        security::TokenManager,
        session::{Credentials, SessionManager},
        session_revocation::SessionRevocationStore,
    },
};
use crate::domain::record::Record;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Stateless bearer-token sessions: the token carries the actor, the
/// revocation store remembers signed-out sessions.
pub struct TokenSessionManager {
    tokens: Arc<dyn TokenManager>,
    revocations: Arc<dyn SessionRevocationStore>,
    expose: Vec<String>,
}

impl TokenSessionManager {
    /// `expose` lists the user fields copied into the actor projection.
    pub fn new(
        tokens: Arc<dyn TokenManager>,
        revocations: Arc<dyn SessionRevocationStore>,
        expose: Vec<String>,
    ) -> Self {
        Self {
            tokens,
            revocations,
            expose,
        }
    }
}

#[async_trait]
impl SessionManager for TokenSessionManager {
    async fn load(&self, credentials: &Credentials) -> ApplicationResult<Option<Actor>> {
        let Some(token) = credentials.token() else {
            return Ok(None);
        };
        let claims = match self.tokens.authenticate(token).await {
            Ok(claims) => claims,
            Err(err) if err.is_unauthorized() => {
                tracing::debug!(error = %err, "ignoring unusable session token");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        if self.revocations.is_revoked(&claims.session_id).await? {
            return Ok(None);
        }
        Ok(Some(claims.actor))
    }

    async fn create(&self, user: &Record) -> ApplicationResult<SessionGrant> {
        let actor = Actor::from_record(user, &self.expose)
            .ok_or_else(|| ApplicationError::infrastructure("user record has no id"))?;
        let issued = self
            .tokens
            .issue(TokenSubject {
                session_id: Uuid::new_v4().to_string(),
                actor: actor.clone(),
            })
            .await?;
        Ok(SessionGrant {
            token: issued.token,
            actor,
            expires_at: issued.expires_at,
        })
    }

    async fn destroy(&self, credentials: &Credentials) -> ApplicationResult<()> {
        let token = credentials
            .token()
            .ok_or_else(|| ApplicationError::unauthorized("no active session"))?;
        let claims = self.tokens.authenticate(token).await?;
        self.revocations
            .revoke(&claims.session_id, claims.expires_at)
            .await?;
        tracing::debug!(session_id = %claims.session_id, "session revoked");
        Ok(())
    }
}
