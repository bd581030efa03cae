// src/application/resources/delete.rs
use super::{RequestContext, ResourceService};
use crate::application::{
    error::ApplicationError,
    policy::Action,
    stage::{AtStage, Stage, StageError, StageResult},
};

impl ResourceService {
    /// Deleting a missing record, including one deleted a moment ago, is
    /// `NotFound`.
    pub async fn delete(&self, ctx: &mut RequestContext) -> StageResult<()> {
        self.policies
            .admit(Action::Delete, ctx)
            .await
            .at(Stage::DeleteAllowed)?;
        self.load(ctx, Stage::DeleteFound).await?;
        self.policies.delete(ctx).await.at(Stage::DeleteAllowed)?;
        let id = ctx
            .record()
            .and_then(|record| record.id())
            .or_else(|| ctx.resource_id())
            .ok_or_else(|| {
                StageError::new(
                    Stage::DeleteAllowed,
                    ApplicationError::infrastructure("no record loaded"),
                )
            })?;
        self.repo
            .delete(self.config.collection(), id)
            .await
            .at(Stage::DeleteSaved)?;
        tracing::debug!(resource = %self.config.name(), %id, "record deleted");
        Ok(())
    }
}
