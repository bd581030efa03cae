// src/application/dto/actor.rs
use crate::application::identity::IdentityFields;
use crate::domain::record::{Record, RecordId, entity::ID_FIELD};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated identity behind a request: the user record projected
/// onto the exposed field allowlist. `id` is always part of the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    id: RecordId,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Actor {
    pub fn new(id: RecordId, mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_FIELD);
        Self { id, fields }
    }

    /// Projects a stored user record. Returns `None` when the record has no
    /// usable id, which can never authenticate anyone.
    pub fn from_record(record: &Record, expose: &[String]) -> Option<Self> {
        let id = record.id()?;
        let fields = expose
            .iter()
            .filter(|name| name.as_str() != ID_FIELD)
            .filter_map(|name| record.get(name).map(|v| (name.clone(), v.clone())))
            .collect();
        Some(Self { id, fields })
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn role<'a>(&'a self, identity: &IdentityFields) -> Option<&'a str> {
        self.fields.get(identity.role()).and_then(Value::as_str)
    }

    pub fn is_admin(&self, identity: &IdentityFields) -> bool {
        self.role(identity) == Some(identity.admin_role())
    }

    /// True when `value` names this actor (numeric or textual id).
    pub fn is_identified_by(&self, value: Option<&Value>) -> bool {
        value.and_then(RecordId::from_value) == Some(self.id)
    }
}
