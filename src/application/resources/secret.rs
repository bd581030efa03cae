// src/application/resources/secret.rs
use super::{RequestContext, ResourceService};
use crate::application::{ApplicationResult, error::ApplicationError};
use crate::domain::record::Record;

impl ResourceService {
    /// Replaces a freshly supplied secret with its hash. A secret merged in
    /// from the stored record is already hashed and left alone.
    pub(super) async fn hash_secret(
        &self,
        ctx: &RequestContext,
        record: &mut Record,
    ) -> ApplicationResult<()> {
        let Some(field) = self.config.secret_field() else {
            return Ok(());
        };
        if !ctx.metadata().supplied_fields.iter().any(|f| f == field) {
            return Ok(());
        }
        let Some(plain) = record.get_str(field).map(str::to_owned) else {
            return Ok(());
        };
        let hasher = self.hasher.as_ref().ok_or_else(|| {
            ApplicationError::not_implemented(format!(
                "{} stores a secret but no password hasher is configured",
                self.config.name()
            ))
        })?;
        let hash = hasher.hash(&plain).await?;
        record.insert(field, hash);
        Ok(())
    }
}
