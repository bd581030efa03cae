// src/infrastructure/repositories/memory_record.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::{
    CollectionName, Condition, Record, RecordId, RecordRepository, condition::matches_all,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

/// Process-local storage for development and tests. Ids are handed out
/// per collection starting at 1 and never reused.
#[derive(Default)]
pub struct InMemoryRecordRepository {
    collections: RwLock<HashMap<String, Collection>>,
}

#[derive(Default)]
struct Collection {
    next_id: i64,
    records: BTreeMap<i64, Record>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn query(
        &self,
        collection: &CollectionName,
        conditions: &[Condition],
    ) -> DomainResult<Vec<Record>> {
        let guard = self.collections.read().await;
        let Some(stored) = guard.get(collection.as_str()) else {
            return Ok(Vec::new());
        };
        Ok(stored
            .records
            .values()
            .filter(|record| matches_all(conditions, record))
            .cloned()
            .collect())
    }

    async fn insert(&self, collection: &CollectionName, record: Record) -> DomainResult<RecordId> {
        let mut guard = self.collections.write().await;
        let stored = guard.entry(collection.as_str().to_string()).or_default();
        stored.next_id += 1;
        let id = RecordId::new(stored.next_id)?;

        let mut record = record.without_id();
        record.set_id(id);
        stored.records.insert(i64::from(id), record);
        Ok(id)
    }

    async fn replace(
        &self,
        collection: &CollectionName,
        id: RecordId,
        record: Record,
    ) -> DomainResult<()> {
        let mut guard = self.collections.write().await;
        let slot = guard
            .get_mut(collection.as_str())
            .and_then(|stored| stored.records.get_mut(&i64::from(id)))
            .ok_or_else(|| DomainError::not_found(collection.as_str(), id))?;

        let mut record = record.without_id();
        record.set_id(id);
        *slot = record;
        Ok(())
    }

    async fn delete(&self, collection: &CollectionName, id: RecordId) -> DomainResult<()> {
        let mut guard = self.collections.write().await;
        guard
            .get_mut(collection.as_str())
            .and_then(|stored| stored.records.remove(&i64::from(id)))
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(collection.as_str(), id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tasks() -> CollectionName {
        CollectionName::new("tasks").unwrap()
    }

    fn record(value: serde_json::Value) -> Record {
        Record::try_from(value).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_fresh_ids_and_ignores_payload_ids() {
        let repo = InMemoryRecordRepository::new();
        let first = repo.insert(&tasks(), record(json!({"id": 99, "title": "a"}))).await.unwrap();
        let second = repo.insert(&tasks(), record(json!({"title": "b"}))).await.unwrap();
        assert_eq!(i64::from(first), 1);
        assert_eq!(i64::from(second), 2);

        let found = repo.find_by_id(&tasks(), first).await.unwrap().unwrap();
        assert_eq!(found.get("title"), Some(&json!("a")));
        assert_eq!(found.id(), Some(first));
    }

    #[tokio::test]
    async fn query_filters_on_every_condition() {
        let repo = InMemoryRecordRepository::new();
        repo.insert(&tasks(), record(json!({"title": "a", "userId": 1}))).await.unwrap();
        repo.insert(&tasks(), record(json!({"title": "a", "userId": 2}))).await.unwrap();

        let hits = repo
            .query(
                &tasks(),
                &[Condition::equals("title", "a"), Condition::equals("userId", 2)],
            )
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(repo.query(&tasks(), &[]).await.unwrap().len() == 2);
    }

    #[tokio::test]
    async fn replace_and_delete_of_missing_ids_are_not_found() {
        let repo = InMemoryRecordRepository::new();
        let id = RecordId::new(7).unwrap();
        assert!(matches!(
            repo.replace(&tasks(), id, Record::new()).await,
            Err(DomainError::NotFound(_))
        ));

        let id = repo.insert(&tasks(), Record::new()).await.unwrap();
        repo.delete(&tasks(), id).await.unwrap();
        assert!(matches!(
            repo.delete(&tasks(), id).await,
            Err(DomainError::NotFound(_))
        ));
    }
}
