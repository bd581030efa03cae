use crate::application::dto::actor::Actor;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::serde_time;

/// Result of a successful sign-in: the credential to hand back to the
/// client plus the session data it unlocks.
#[derive(Debug, Clone, Serialize)]
pub struct SessionGrant {
    #[serde(skip)]
    pub token: String,
    pub actor: Actor,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
}
