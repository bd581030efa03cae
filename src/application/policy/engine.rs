// src/application/policy/engine.rs
use super::{Action, DenyKind, DisabledActions, PolicyDecision, ResourcePolicy};
use crate::application::{
    ApplicationResult, error::ApplicationError, ports::session::SessionManager,
    resources::RequestContext,
};
use crate::domain::record::Condition;
use std::sync::Arc;

/// Session-aware front of a [`ResourcePolicy`].
///
/// Masks disabled actions as `NotFound`, resolves the actor through the
/// session port (at most once per request) and turns decisions into errors.
pub struct PolicyEngine {
    policy: Arc<dyn ResourcePolicy>,
    disabled: DisabledActions,
    sessions: Option<Arc<dyn SessionManager>>,
}

impl PolicyEngine {
    pub fn new(
        policy: Arc<dyn ResourcePolicy>,
        disabled: DisabledActions,
        sessions: Option<Arc<dyn SessionManager>>,
    ) -> Self {
        Self {
            policy,
            disabled,
            sessions,
        }
    }

    pub fn policy(&self) -> &dyn ResourcePolicy {
        self.policy.as_ref()
    }

    /// Loads the actor into the context unless that already happened.
    pub async fn resolve_actor(&self, ctx: &mut RequestContext) -> ApplicationResult<()> {
        if ctx.is_actor_resolved() {
            return Ok(());
        }
        let actor = match &self.sessions {
            Some(sessions) => sessions.load(ctx.credentials()).await?,
            None if self.policy.requires_session() => {
                return Err(ApplicationError::not_implemented(
                    "policy requires a session manager but none is configured",
                ));
            }
            None => None,
        };
        ctx.set_actor(actor);
        Ok(())
    }

    /// Gate run before a verb touches persistence: disabled actions are
    /// `NotFound`, anonymous callers of actor-only actions `Unauthorized`.
    pub async fn admit(&self, action: Action, ctx: &mut RequestContext) -> ApplicationResult<()> {
        self.ensure_enabled(action)?;
        self.resolve_actor(ctx).await?;
        if ctx.actor().is_none() && self.policy.requires_actor(action) {
            return PolicyDecision::unauthorized().into_result(action);
        }
        Ok(())
    }

    pub async fn create(&self, ctx: &mut RequestContext) -> ApplicationResult<()> {
        self.ensure_enabled(Action::Create)?;
        self.resolve_actor(ctx).await?;
        let (actor, body) = ctx.actor_and_body_mut();
        self.policy.create(actor, body).into_result(Action::Create)
    }

    pub async fn update(&self, ctx: &mut RequestContext) -> ApplicationResult<()> {
        self.authorize_loaded(Action::Update, ctx).await
    }

    pub async fn list(&self, ctx: &mut RequestContext) -> ApplicationResult<Vec<Condition>> {
        self.ensure_enabled(Action::List)?;
        self.resolve_actor(ctx).await?;
        self.policy.list(ctx.actor()).into_result(Action::List)?;
        Ok(self.policy.list_scope(ctx.actor()))
    }

    pub async fn show(&self, ctx: &mut RequestContext) -> ApplicationResult<()> {
        self.authorize_loaded(Action::Show, ctx).await
    }

    pub async fn delete(&self, ctx: &mut RequestContext) -> ApplicationResult<()> {
        self.authorize_loaded(Action::Delete, ctx).await
    }

    async fn authorize_loaded(
        &self,
        action: Action,
        ctx: &mut RequestContext,
    ) -> ApplicationResult<()> {
        self.ensure_enabled(action)?;
        self.resolve_actor(ctx).await?;
        let record = ctx
            .record()
            .ok_or_else(|| ApplicationError::infrastructure("no record loaded for policy"))?;
        let actor = ctx.actor();
        let decision = match action {
            Action::Update => self.policy.update(actor, record),
            Action::Show => self.policy.show(actor, record),
            Action::Delete => self.policy.delete(actor, record),
            Action::Create | Action::List => PolicyDecision::forbidden(),
        };
        decision.into_result(action)
    }

    fn ensure_enabled(&self, action: Action) -> ApplicationResult<()> {
        if self.disabled.contains(action) {
            PolicyDecision::Deny(DenyKind::NotFound).into_result(action)
        } else {
            Ok(())
        }
    }
}
