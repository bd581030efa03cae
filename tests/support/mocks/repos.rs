// tests/support/mocks/repos.rs
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tabula_core::domain::errors::DomainResult;
use tabula_core::domain::record::{
    CollectionName, Condition, Record, RecordId, RecordRepository,
};
use tabula_core::infrastructure::repositories::InMemoryRecordRepository;

/// In-memory repository that counts every call made through the port.
#[derive(Default)]
pub struct CountingRepo {
    inner: InMemoryRecordRepository,
    calls: AtomicUsize,
}

impl CountingRepo {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }

    /// Direct access that bypasses the counter, for seeding and assertions.
    pub fn inner(&self) -> &InMemoryRecordRepository {
        &self.inner
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordRepository for CountingRepo {
    async fn query(
        &self,
        collection: &CollectionName,
        conditions: &[Condition],
    ) -> DomainResult<Vec<Record>> {
        self.hit();
        self.inner.query(collection, conditions).await
    }

    async fn insert(&self, collection: &CollectionName, record: Record) -> DomainResult<RecordId> {
        self.hit();
        self.inner.insert(collection, record).await
    }

    async fn replace(
        &self,
        collection: &CollectionName,
        id: RecordId,
        record: Record,
    ) -> DomainResult<()> {
        self.hit();
        self.inner.replace(collection, id, record).await
    }

    async fn delete(&self, collection: &CollectionName, id: RecordId) -> DomainResult<()> {
        self.hit();
        self.inner.delete(collection, id).await
    }
}
