// src/application/resources/context.rs
use crate::application::{dto::Actor, ports::session::Credentials};
use crate::domain::record::{Record, RecordId};

/// Per-request state handed through every pipeline stage.
///
/// Owned by exactly one request and dropped with it.
#[derive(Debug, Default)]
pub struct RequestContext {
    credentials: Credentials,
    body: Record,
    resource_id: Option<RecordId>,
    partial_update: bool,
    record: Option<Record>,
    actor: Option<Option<Actor>>,
    metadata: Metadata,
}

/// Data one stage leaves for a later one.
#[derive(Debug, Default)]
pub struct Metadata {
    /// Field names present in the client payload, captured before merging.
    pub supplied_fields: Vec<String>,
}

impl RequestContext {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: Record) -> Self {
        self.body = body;
        self
    }

    pub fn with_resource_id(mut self, id: RecordId) -> Self {
        self.resource_id = Some(id);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn body(&self) -> &Record {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Record {
        &mut self.body
    }

    pub fn take_body(&mut self) -> Record {
        std::mem::take(&mut self.body)
    }

    pub fn resource_id(&self) -> Option<RecordId> {
        self.resource_id
    }

    pub fn set_resource_id(&mut self, id: RecordId) {
        self.resource_id = Some(id);
    }

    pub fn is_partial_update(&self) -> bool {
        self.partial_update
    }

    pub fn set_partial_update(&mut self, partial: bool) {
        self.partial_update = partial;
    }

    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    pub fn set_record(&mut self, record: Record) {
        self.record = Some(record);
    }

    pub fn take_record(&mut self) -> Option<Record> {
        self.record.take()
    }

    /// Session data loaded for this request, if any.
    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref().and_then(Option::as_ref)
    }

    pub fn is_actor_resolved(&self) -> bool {
        self.actor.is_some()
    }

    pub fn set_actor(&mut self, actor: Option<Actor>) {
        self.actor = Some(actor);
    }

    /// Split borrow for policies that stamp the body based on the actor.
    pub fn actor_and_body_mut(&mut self) -> (Option<&Actor>, &mut Record) {
        (
            self.actor.as_ref().and_then(Option::as_ref),
            &mut self.body,
        )
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}
