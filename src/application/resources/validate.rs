// src/application/resources/validate.rs
use super::{RequestContext, ResourceService};
use crate::application::{ApplicationResult, error::ApplicationError};
use crate::domain::record::Record;
use serde_json::Value;

/// Resource-specific validation hook, run after the built-in checks.
pub trait RecordValidator: Send + Sync {
    fn validate(&self, record: &Record, ctx: &RequestContext) -> ApplicationResult<()>;
}

/// Accepts every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl RecordValidator for AcceptAll {
    fn validate(&self, _record: &Record, _ctx: &RequestContext) -> ApplicationResult<()> {
        Ok(())
    }
}

impl ResourceService {
    /// Checks the record about to be written (the merged record on PATCH).
    pub(super) fn validate(&self, record: &Record, ctx: &RequestContext) -> ApplicationResult<()> {
        let missing: Vec<&str> = self
            .config
            .required_fields()
            .iter()
            .filter(|field| matches!(record.get(field), None | Some(Value::Null)))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(ApplicationError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        if let Some(secret) = self.config.secret_field() {
            if ctx.metadata().supplied_fields.iter().any(|f| f == secret) {
                match record.get_str(secret) {
                    Some(value) if !value.is_empty() => {}
                    _ => {
                        return Err(ApplicationError::validation(format!(
                            "{secret} must be a non-empty string"
                        )));
                    }
                }
            }
        }

        self.validator.validate(record, ctx)
    }
}
