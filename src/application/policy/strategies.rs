// src/application/policy/strategies.rs
use super::PolicyDecision;
use crate::application::{dto::Actor, identity::IdentityFields};

/// Unwraps the actor or yields the `Unauthorized` decision to return.
pub(super) fn require_actor(actor: Option<&Actor>) -> Result<&Actor, PolicyDecision> {
    actor.ok_or(PolicyDecision::unauthorized())
}

/// Admin wins; otherwise `is_permitted` decides between allow and forbid.
pub(super) fn admin_or(
    actor: Option<&Actor>,
    identity: &IdentityFields,
    is_permitted: impl FnOnce(&Actor) -> bool,
) -> PolicyDecision {
    let actor = match require_actor(actor) {
        Ok(actor) => actor,
        Err(decision) => return decision,
    };
    if actor.is_admin(identity) || is_permitted(actor) {
        PolicyDecision::Allow
    } else {
        PolicyDecision::forbidden()
    }
}

pub(super) fn admin_only(actor: Option<&Actor>, identity: &IdentityFields) -> PolicyDecision {
    admin_or(actor, identity, |_| false)
}
