// src/application/resources/shaping.rs
use super::ResourceService;
use crate::application::dto::Actor;
use crate::domain::record::Record;

impl ResourceService {
    /// Filters an outbound record. Stored records are never touched.
    pub(super) fn present(&self, mut record: Record, actor: Option<&Actor>) -> Record {
        for field in self.config.hidden_fields() {
            record.remove(field);
        }
        if !self.config.private_fields().is_empty() && !self.may_see_private(&record, actor) {
            for field in self.config.private_fields() {
                record.remove(field);
            }
        }
        record
    }

    pub(super) fn present_all(&self, records: Vec<Record>, actor: Option<&Actor>) -> Vec<Record> {
        records
            .into_iter()
            .map(|record| self.present(record, actor))
            .collect()
    }

    fn may_see_private(&self, record: &Record, actor: Option<&Actor>) -> bool {
        actor.is_some_and(|actor| {
            actor.is_admin(&self.identity) || self.policies.policy().is_owner(actor, record)
        })
    }
}
