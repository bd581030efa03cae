// src/application/resources/replace.rs
use super::{RequestContext, ResourceService};
use crate::application::{
    error::ApplicationError,
    policy::Action,
    stage::{AtStage, Stage, StageError, StageResult},
};
use crate::domain::record::{Record, entity::ID_FIELD};

impl ResourceService {
    /// Full replacement (PUT): fields missing from the body disappear,
    /// except the `created` timestamp.
    pub async fn replace(&self, ctx: &mut RequestContext) -> StageResult<Record> {
        self.policies
            .admit(Action::Update, ctx)
            .await
            .at(Stage::ReplaceAllowed)?;
        self.load(ctx, Stage::ReplaceFound).await?;
        self.update_loaded(ctx).await
    }

    /// Partial update (PATCH): only the fields in the body change.
    pub async fn update(&self, ctx: &mut RequestContext) -> StageResult<Record> {
        ctx.set_partial_update(true);
        self.replace(ctx).await
    }

    /// Shared tail of replace/update once the stored record is in `ctx`.
    pub(super) async fn update_loaded(&self, ctx: &mut RequestContext) -> StageResult<Record> {
        self.policies.update(ctx).await.at(Stage::ReplaceAllowed)?;
        self.sanitize(ctx);

        let existing = ctx.take_record().ok_or_else(|| {
            StageError::new(
                Stage::ReplaceAllowed,
                ApplicationError::infrastructure("no record loaded"),
            )
        })?;
        let id = match ctx.resource_id().or_else(|| existing.id()) {
            Some(id) => id,
            None => {
                return Err(StageError::new(
                    Stage::ReplaceAllowed,
                    ApplicationError::infrastructure("stored record has no id"),
                ));
            }
        };

        let incoming = ctx.take_body();
        let mut record = if ctx.is_partial_update() {
            let mut merged = existing.clone();
            merged.merge(incoming);
            merged
        } else {
            incoming
        };
        record.remove(ID_FIELD);
        self.preserve_created(&existing, &mut record);
        self.preserve_guarded(ctx, &existing, &mut record);

        self.validate(&record, ctx).at(Stage::ReplaceValidated)?;
        self.hash_secret(ctx, &mut record)
            .await
            .at(Stage::ReplaceValidated)?;
        self.timestamp(&mut record);

        self.repo
            .replace(self.config.collection(), id, record.clone())
            .await
            .at(Stage::ReplaceSaved)?;
        record.set_id(id);
        ctx.set_record(record.clone());

        Ok(self.present(record, ctx.actor()))
    }
}
