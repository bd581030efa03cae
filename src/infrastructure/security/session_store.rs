use crate::application::ApplicationResult;
use crate::application::ports::session_revocation::SessionRevocationStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Process-local revocation list. Entries are pruned once their tokens
/// would have expired.
#[derive(Default)]
pub struct InMemorySessionRevocationStore {
    revoked: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl InMemorySessionRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRevocationStore for InMemorySessionRevocationStore {
    async fn is_revoked(&self, session_id: &str) -> ApplicationResult<bool> {
        let guard = self.revoked.lock().await;
        Ok(guard.contains_key(session_id))
    }

    async fn revoke(&self, session_id: &str, until: DateTime<Utc>) -> ApplicationResult<()> {
        let now = Utc::now();
        let mut guard = self.revoked.lock().await;
        guard.retain(|_, expires| *expires > now);
        guard.insert(session_id.to_string(), until);
        Ok(())
    }
}
