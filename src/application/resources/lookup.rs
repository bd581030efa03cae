// src/application/resources/lookup.rs
use super::{RequestContext, ResourceService};
use crate::application::{
    error::ApplicationError,
    stage::{AtStage, Stage, StageError, StageResult},
};

impl ResourceService {
    /// Loads the record named by the context's resource id into the context.
    pub(super) async fn load(&self, ctx: &mut RequestContext, stage: Stage) -> StageResult<()> {
        let collection = self.config.collection();
        let id = ctx.resource_id().ok_or_else(|| {
            StageError::new(stage, ApplicationError::not_found("no resource id"))
        })?;
        let record = self
            .repo
            .find_by_id(collection, id)
            .await
            .at(stage)?
            .ok_or_else(|| {
                StageError::new(
                    stage,
                    ApplicationError::not_found(format!("{collection}#{id}")),
                )
            })?;
        ctx.set_record(record);
        Ok(())
    }
}
