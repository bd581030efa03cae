// src/application/resources/conflict.rs
use super::ResourceService;
use crate::domain::errors::DomainResult;
use crate::domain::record::{Condition, Record};
use serde_json::Value;

impl ResourceService {
    /// Looks for a stored record sharing every unique field value with
    /// `body`. Not atomic with the insert that follows.
    pub(super) async fn find_conflict(&self, body: &Record) -> DomainResult<Option<Record>> {
        let unique = self.config.unique_fields();
        if unique.is_empty() {
            return Ok(None);
        }
        let conditions: Vec<Condition> = unique
            .iter()
            .map(|field| {
                Condition::equals(field.clone(), body.get(field).cloned().unwrap_or(Value::Null))
            })
            .collect();
        let mut existing = self
            .repo
            .query(self.config.collection(), &conditions)
            .await?;
        Ok(if existing.is_empty() {
            None
        } else {
            Some(existing.swap_remove(0))
        })
    }
}
