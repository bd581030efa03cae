// src/domain/record/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::record::{
    condition::Condition,
    entity::Record,
    value_objects::{CollectionName, RecordId},
};
use async_trait::async_trait;

/// Storage contract for free-form records grouped in named collections.
///
/// No locking or transactional isolation is assumed: callers that check for
/// existing rows and then insert must tolerate a concurrent writer slipping in
/// between the two calls.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Returns every record of `collection` matching all `conditions`.
    /// An empty condition list returns the whole collection.
    async fn query(
        &self,
        collection: &CollectionName,
        conditions: &[Condition],
    ) -> DomainResult<Vec<Record>>;

    /// Stores `record` and returns the id assigned to it. Any `id` in the
    /// payload is ignored.
    async fn insert(&self, collection: &CollectionName, record: Record) -> DomainResult<RecordId>;

    /// Replaces the stored fields of `id` wholesale.
    async fn replace(
        &self,
        collection: &CollectionName,
        id: RecordId,
        record: Record,
    ) -> DomainResult<()>;

    async fn delete(&self, collection: &CollectionName, id: RecordId) -> DomainResult<()>;

    async fn find_by_id(
        &self,
        collection: &CollectionName,
        id: RecordId,
    ) -> DomainResult<Option<Record>> {
        let mut found = self
            .query(collection, &[Condition::equals("id", id.to_value())])
            .await?;
        Ok(if found.is_empty() {
            None
        } else {
            Some(found.swap_remove(0))
        })
    }
}
