// src/application/resources/show.rs
use super::{RequestContext, ResourceService};
use crate::application::{
    error::ApplicationError,
    policy::Action,
    stage::{AtStage, Stage, StageError, StageResult},
};
use crate::domain::record::Record;

impl ResourceService {
    pub async fn show(&self, ctx: &mut RequestContext) -> StageResult<Record> {
        self.policies
            .admit(Action::Show, ctx)
            .await
            .at(Stage::ShowAllowed)?;
        self.load(ctx, Stage::ShowFound).await?;
        self.policies.show(ctx).await.at(Stage::ShowAllowed)?;
        let record = ctx.record().cloned().ok_or_else(|| {
            StageError::new(
                Stage::ShowAllowed,
                ApplicationError::infrastructure("no record loaded"),
            )
        })?;
        Ok(self.present(record, ctx.actor()))
    }
}
