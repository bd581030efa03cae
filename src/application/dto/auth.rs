use crate::application::dto::actor::Actor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokenDto {
    pub token: String,
    #[serde(with = "serde_time")]
    pub issued_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

/// What a token is minted for: one session of one actor.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub session_id: String,
    pub actor: Actor,
}

/// What an accepted token proves.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub session_id: String,
    pub actor: Actor,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
