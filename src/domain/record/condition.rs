// src/domain/record/condition.rs
use crate::domain::record::entity::{ID_FIELD, Record};
use serde_json::Value;

/// Equality filter on one field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub value: Value,
}

impl Condition {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_id(&self) -> bool {
        self.field == ID_FIELD
    }

    /// In-process evaluation, used by adapters without a query language.
    /// A missing field only matches a `null` condition.
    pub fn matches(&self, record: &Record) -> bool {
        if self.is_id() {
            return match (
                record.id(),
                crate::domain::record::RecordId::from_value(&self.value),
            ) {
                (Some(actual), Some(expected)) => actual == expected,
                _ => false,
            };
        }
        match record.get(&self.field) {
            Some(actual) => actual == &self.value,
            None => self.value.is_null(),
        }
    }
}

pub fn matches_all(conditions: &[Condition], record: &Record) -> bool {
    conditions.iter().all(|condition| condition.matches(record))
}
