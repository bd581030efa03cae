// src/application/resources/sanitize.rs
use super::{RequestContext, ResourceService};
use crate::domain::record::{Record, entity::ID_FIELD};

impl ResourceService {
    /// Strips what a client may never write: the id, managed timestamps and,
    /// for anyone but an admin, protected fields. Also records which fields
    /// the client actually sent.
    pub(super) fn sanitize(&self, ctx: &mut RequestContext) {
        let is_admin = ctx
            .actor()
            .is_some_and(|actor| actor.is_admin(&self.identity));

        let body = ctx.body_mut();
        body.remove(ID_FIELD);
        for field in self.config.timestamps().names() {
            body.remove(field);
        }
        if !is_admin {
            for field in self.config.protected_fields() {
                body.remove(field);
            }
        }

        let supplied = ctx.body().field_names().map(str::to_string).collect();
        ctx.metadata_mut().supplied_fields = supplied;
    }

    /// Keeps the stored values of fields the caller may not write: protected
    /// fields and the policy's locked fields, unless the caller is an admin.
    /// A field absent from the stored record stays absent.
    pub(super) fn preserve_guarded(
        &self,
        ctx: &RequestContext,
        existing: &Record,
        target: &mut Record,
    ) {
        if ctx
            .actor()
            .is_some_and(|actor| actor.is_admin(&self.identity))
        {
            return;
        }
        let locked = self.policies.policy().locked_fields();
        let guarded = self
            .config
            .protected_fields()
            .iter()
            .chain(locked.iter());
        for field in guarded {
            match existing.get(field) {
                Some(value) => {
                    target.insert(field.clone(), value.clone());
                }
                None => {
                    target.remove(field);
                }
            }
        }
    }
}
