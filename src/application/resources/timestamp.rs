// src/application/resources/timestamp.rs
use super::ResourceService;
use crate::application::dto::serde_time;
use crate::domain::record::Record;

impl ResourceService {
    /// Sets `created` when absent and always refreshes `updated`.
    pub(super) fn timestamp(&self, record: &mut Record) {
        let timestamps = self.config.timestamps();
        if !timestamps.is_enabled() {
            return;
        }
        let now = serde_time::format(&self.clock.now());
        if let Some(created) = &timestamps.created {
            if record.get(created).is_none_or(|v| v.is_null()) {
                record.insert(created.clone(), now.clone());
            }
        }
        if let Some(updated) = &timestamps.updated {
            record.insert(updated.clone(), now);
        }
    }

    /// Carries the stored `created` value over to the record being written.
    pub(super) fn preserve_created(&self, existing: &Record, target: &mut Record) {
        let Some(created) = &self.config.timestamps().created else {
            return;
        };
        match existing.get(created) {
            Some(value) => {
                target.insert(created.clone(), value.clone());
            }
            None => {
                target.remove(created);
            }
        }
    }
}
