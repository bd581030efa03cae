// src/application/resources/create.rs
use super::{RequestContext, ResourceService};
use crate::application::{
    error::ApplicationError,
    policy::Action,
    stage::{AtStage, Stage, StageError, StageResult},
};
use crate::domain::record::Record;

/// How a create request ended up being served.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// A new record was inserted.
    Created(Record),
    /// The body collided with an existing record and was merged into it.
    Updated(Record),
}

impl CreateOutcome {
    pub fn record(&self) -> &Record {
        match self {
            CreateOutcome::Created(record) | CreateOutcome::Updated(record) => record,
        }
    }

    pub fn into_record(self) -> Record {
        match self {
            CreateOutcome::Created(record) | CreateOutcome::Updated(record) => record,
        }
    }
}

impl ResourceService {
    pub async fn create(&self, ctx: &mut RequestContext) -> StageResult<CreateOutcome> {
        self.policies
            .admit(Action::Create, ctx)
            .await
            .at(Stage::CreateAllowed)?;
        self.sanitize(ctx);
        self.policies.create(ctx).await.at(Stage::CreateAllowed)?;
        self.validate(ctx.body(), ctx).at(Stage::CreateValidated)?;

        let conflict = self
            .find_conflict(ctx.body())
            .await
            .at(Stage::CreateConflictChecked)?;
        if let Some(existing) = conflict {
            return self.resolve_conflict(ctx, existing).await;
        }

        let mut record = ctx.take_body();
        self.hash_secret(ctx, &mut record)
            .await
            .at(Stage::CreateValidated)?;
        self.timestamp(&mut record);

        let id = self
            .repo
            .insert(self.config.collection(), record.clone())
            .await
            .at(Stage::CreateSaved)?;
        record.set_id(id);
        tracing::debug!(resource = %self.config.name(), %id, "record created");

        Ok(CreateOutcome::Created(self.present(record, ctx.actor())))
    }

    async fn resolve_conflict(
        &self,
        ctx: &mut RequestContext,
        existing: Record,
    ) -> StageResult<CreateOutcome> {
        let stage = Stage::CreateConflictChecked;
        if !self.config.update_on_conflict() {
            return Err(StageError::new(
                stage,
                ApplicationError::conflict(format!(
                    "{} already has a record with these {}",
                    self.config.name(),
                    self.config.unique_fields().join(", ")
                )),
            ));
        }
        let id = existing.id().ok_or_else(|| {
            StageError::new(
                stage,
                ApplicationError::infrastructure("stored record has no id"),
            )
        })?;
        tracing::debug!(resource = %self.config.name(), %id, "create redirected to update on conflict");

        // The create stamp must not re-own the existing record.
        for field in self.policies.policy().locked_fields() {
            ctx.body_mut().remove(&field);
        }
        ctx.set_resource_id(id);
        ctx.set_partial_update(true);
        ctx.set_record(existing);

        self.update_loaded(ctx).await.map(CreateOutcome::Updated)
    }
}
