// src/application/policy/base.rs
use super::{Action, PolicyDecision, ResourcePolicy};
use crate::application::dto::Actor;
use crate::domain::record::Record;

/// Refuses everything. Resources must pick a real policy to be usable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAllPolicy;

impl ResourcePolicy for DenyAllPolicy {
    fn requires_actor(&self, _action: Action) -> bool {
        true
    }
}

/// Lets anyone do anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicPolicy;

impl ResourcePolicy for PublicPolicy {
    fn create(&self, _actor: Option<&Actor>, _body: &mut Record) -> PolicyDecision {
        PolicyDecision::Allow
    }

    fn update(&self, _actor: Option<&Actor>, _record: &Record) -> PolicyDecision {
        PolicyDecision::Allow
    }

    fn list(&self, _actor: Option<&Actor>) -> PolicyDecision {
        PolicyDecision::Allow
    }

    fn show(&self, _actor: Option<&Actor>, _record: &Record) -> PolicyDecision {
        PolicyDecision::Allow
    }

    fn delete(&self, _actor: Option<&Actor>, _record: &Record) -> PolicyDecision {
        PolicyDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deny_all_refuses_anonymous_and_identified_callers() {
        use crate::application::dto::Actor;
        use crate::domain::record::RecordId;

        let policy = DenyAllPolicy;
        let mut body = Record::new();
        assert_eq!(policy.create(None, &mut body), PolicyDecision::unauthorized());
        assert_eq!(policy.list(None), PolicyDecision::unauthorized());
        assert!(policy.requires_actor(Action::Show));

        let actor = Actor::new(RecordId::new(1).unwrap(), Default::default());
        assert_eq!(policy.list(Some(&actor)), PolicyDecision::forbidden());
    }

    #[test]
    fn public_allows_every_action() {
        let policy = PublicPolicy;
        let record = Record::new();
        let mut body = Record::new();
        assert!(policy.create(None, &mut body).is_allowed());
        assert!(policy.update(None, &record).is_allowed());
        assert!(policy.list(None).is_allowed());
        assert!(policy.show(None, &record).is_allowed());
        assert!(policy.delete(None, &record).is_allowed());
    }
}
