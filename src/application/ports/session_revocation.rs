use crate::application::ApplicationResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Remembers signed-out sessions until their tokens would have expired
/// anyway.
#[async_trait]
pub trait SessionRevocationStore: Send + Sync {
    async fn is_revoked(&self, session_id: &str) -> ApplicationResult<bool>;

    /// Revokes `session_id`; the entry may be forgotten after `until`.
    async fn revoke(&self, session_id: &str, until: DateTime<Utc>) -> ApplicationResult<()>;
}
