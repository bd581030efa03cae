// src/application/policy/user.rs
use super::{
    Action, PolicyDecision, ResourcePolicy,
    strategies::{admin_only, admin_or, require_actor},
};
use crate::application::{dto::Actor, identity::IdentityFields};
use crate::domain::record::Record;

/// Self-service identity records: a user may manage their own record, an
/// admin may manage all of them.
#[derive(Debug, Clone)]
pub struct UserPolicy {
    identity: IdentityFields,
    allow_signup: bool,
}

impl UserPolicy {
    pub fn new(identity: IdentityFields) -> Self {
        Self {
            identity,
            allow_signup: true,
        }
    }

    /// With sign-up disabled only an authenticated actor may create users.
    pub fn with_signup(mut self, allow_signup: bool) -> Self {
        self.allow_signup = allow_signup;
        self
    }

    fn is_self(actor: &Actor, record: &Record) -> bool {
        record.id() == Some(actor.id())
    }
}

impl ResourcePolicy for UserPolicy {
    fn requires_session(&self) -> bool {
        true
    }

    fn requires_actor(&self, action: Action) -> bool {
        action != Action::Create || !self.allow_signup
    }

    fn create(&self, actor: Option<&Actor>, _body: &mut Record) -> PolicyDecision {
        if self.allow_signup {
            return PolicyDecision::Allow;
        }
        match require_actor(actor) {
            Ok(_) => PolicyDecision::Allow,
            Err(decision) => decision,
        }
    }

    fn update(&self, actor: Option<&Actor>, record: &Record) -> PolicyDecision {
        admin_or(actor, &self.identity, |actor| Self::is_self(actor, record))
    }

    fn list(&self, actor: Option<&Actor>) -> PolicyDecision {
        admin_only(actor, &self.identity)
    }

    fn show(&self, actor: Option<&Actor>, record: &Record) -> PolicyDecision {
        admin_or(actor, &self.identity, |actor| Self::is_self(actor, record))
    }

    fn delete(&self, actor: Option<&Actor>, record: &Record) -> PolicyDecision {
        admin_or(actor, &self.identity, |actor| Self::is_self(actor, record))
    }

    fn is_owner(&self, actor: &Actor, record: &Record) -> bool {
        Self::is_self(actor, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RecordId;
    use serde_json::{Map, json};

    fn actor(id: i64, role: &str) -> Actor {
        let mut fields = Map::new();
        fields.insert("role".into(), json!(role));
        Actor::new(RecordId::new(id).unwrap(), fields)
    }

    fn user(id: i64) -> Record {
        Record::try_from(json!({"id": id, "username": "someone"})).unwrap()
    }

    #[test]
    fn self_or_admin_may_update_show_delete() {
        let policy = UserPolicy::new(IdentityFields::default());
        let record = user(7);

        assert!(policy.update(Some(&actor(7, "member")), &record).is_allowed());
        assert!(policy.show(Some(&actor(1, "admin")), &record).is_allowed());
        assert_eq!(
            policy.delete(Some(&actor(8, "member")), &record),
            PolicyDecision::forbidden()
        );
        assert_eq!(policy.update(None, &record), PolicyDecision::unauthorized());
    }

    #[test]
    fn list_is_admin_only() {
        let policy = UserPolicy::new(IdentityFields::default());
        assert_eq!(policy.list(None), PolicyDecision::unauthorized());
        assert_eq!(
            policy.list(Some(&actor(7, "member"))),
            PolicyDecision::forbidden()
        );
        assert!(policy.list(Some(&actor(1, "admin"))).is_allowed());
    }

    #[test]
    fn signup_switch_controls_anonymous_create() {
        let mut body = Record::new();
        let open = UserPolicy::new(IdentityFields::default());
        assert!(open.create(None, &mut body).is_allowed());

        let closed = UserPolicy::new(IdentityFields::default()).with_signup(false);
        assert_eq!(closed.create(None, &mut body), PolicyDecision::unauthorized());
        assert!(closed.create(Some(&actor(1, "admin")), &mut body).is_allowed());

        assert!(!open.requires_actor(Action::Create));
        assert!(closed.requires_actor(Action::Create));
        assert!(open.requires_actor(Action::Show));
    }
}
