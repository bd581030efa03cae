// src/application/resources/list.rs
use super::{RequestContext, ResourceService};
use crate::application::stage::{AtStage, Stage, StageResult};
use crate::domain::record::Record;

impl ResourceService {
    pub async fn list(&self, ctx: &mut RequestContext) -> StageResult<Vec<Record>> {
        let scope = self.policies.list(ctx).await.at(Stage::ListAllowed)?;
        let records = self
            .repo
            .query(self.config.collection(), &scope)
            .await
            .at(Stage::ListResult)?;
        Ok(self.present_all(records, ctx.actor()))
    }
}
