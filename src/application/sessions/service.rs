// src/application/sessions/service.rs
use crate::application::{
    dto::{Actor, SessionGrant},
    error::ApplicationError,
    identity::IdentityFields,
    ports::{
        security::PasswordHasher,
        session::{Credentials, SessionManager},
    },
    stage::{AtStage, Stage, StageError, StageResult},
};
use crate::domain::record::{CollectionName, Condition, Record, RecordRepository};
use serde_json::Value;
use std::sync::Arc;

/// Sign-in payload: the user's primary field value and plaintext password.
#[derive(Debug, Clone)]
pub struct SignInRequest {
    pub primary: Value,
    pub password: String,
}

impl SignInRequest {
    /// Reads the configured primary and password fields out of a body.
    pub fn from_record(body: &Record, identity: &IdentityFields) -> Result<Self, ApplicationError> {
        let primary = match body.get(identity.primary()) {
            Some(value) if !value.is_null() => value.clone(),
            _ => {
                return Err(ApplicationError::validation(format!(
                    "{} is required",
                    identity.primary()
                )));
            }
        };
        let password = body
            .get_str(identity.password())
            .ok_or_else(|| {
                ApplicationError::validation(format!("{} is required", identity.password()))
            })?
            .to_string();
        Ok(Self { primary, password })
    }
}

pub struct SessionService {
    users: Arc<dyn RecordRepository>,
    collection: CollectionName,
    identity: IdentityFields,
    hasher: Arc<dyn PasswordHasher>,
    sessions: Arc<dyn SessionManager>,
}

impl SessionService {
    pub fn new(
        users: Arc<dyn RecordRepository>,
        collection: CollectionName,
        identity: IdentityFields,
        hasher: Arc<dyn PasswordHasher>,
        sessions: Arc<dyn SessionManager>,
    ) -> Self {
        Self {
            users,
            collection,
            identity,
            hasher,
            sessions,
        }
    }

    pub fn identity(&self) -> &IdentityFields {
        &self.identity
    }

    pub async fn sign_in(&self, request: SignInRequest) -> StageResult<SessionGrant> {
        let invalid = || ApplicationError::unauthorized("invalid credentials");

        let condition = Condition::equals(self.identity.primary(), request.primary);
        let user = self
            .users
            .query(&self.collection, &[condition])
            .await
            .at(Stage::SignInQueryResult)?
            .into_iter()
            .next()
            .ok_or_else(|| StageError::new(Stage::SignInQueryResult, invalid()))?;

        let stored_hash = user
            .get_str(self.identity.password())
            .ok_or_else(|| StageError::new(Stage::SignInPasswordResult, invalid()))?;
        self.hasher
            .verify(&request.password, stored_hash)
            .await
            .at(Stage::SignInPasswordResult)?;

        let grant = self
            .sessions
            .create(&user)
            .await
            .at(Stage::SignInSessionResult)?;
        tracing::info!(actor_id = %grant.actor.id(), "session opened");
        Ok(grant)
    }

    pub async fn info(&self, credentials: &Credentials) -> StageResult<Actor> {
        self.sessions
            .authorize(credentials)
            .await
            .at(Stage::InfoAuthorized)
    }

    pub async fn sign_out(&self, credentials: &Credentials) -> StageResult<()> {
        let actor = self
            .sessions
            .authorize(credentials)
            .await
            .at(Stage::SignOutAuthorized)?;
        self.sessions
            .destroy(credentials)
            .await
            .at(Stage::SignOutSessionDestroy)?;
        tracing::info!(actor_id = %actor.id(), "session closed");
        Ok(())
    }
}
