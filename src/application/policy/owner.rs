// src/application/policy/owner.rs
use super::{
    PolicyDecision, ResourcePolicy,
    strategies::{admin_or, require_actor},
};
use crate::application::{dto::Actor, identity::IdentityFields};
use crate::domain::record::{Condition, Record};

/// Records owned by users through an association field.
#[derive(Debug, Clone)]
pub struct OwnerPolicy {
    identity: IdentityFields,
}

impl OwnerPolicy {
    pub fn new(identity: IdentityFields) -> Self {
        Self { identity }
    }

    fn owns(&self, actor: &Actor, record: &Record) -> bool {
        actor.is_identified_by(record.get(self.identity.association()))
    }
}

impl ResourcePolicy for OwnerPolicy {
    fn requires_session(&self) -> bool {
        true
    }

    fn create(&self, actor: Option<&Actor>, body: &mut Record) -> PolicyDecision {
        match require_actor(actor) {
            Ok(actor) => {
                body.insert(self.identity.association(), actor.id().to_value());
                PolicyDecision::Allow
            }
            Err(decision) => decision,
        }
    }

    fn update(&self, actor: Option<&Actor>, record: &Record) -> PolicyDecision {
        admin_or(actor, &self.identity, |actor| self.owns(actor, record))
    }

    fn list(&self, actor: Option<&Actor>) -> PolicyDecision {
        match require_actor(actor) {
            Ok(_) => PolicyDecision::Allow,
            Err(decision) => decision,
        }
    }

    fn show(&self, actor: Option<&Actor>, record: &Record) -> PolicyDecision {
        admin_or(actor, &self.identity, |actor| self.owns(actor, record))
    }

    fn delete(&self, actor: Option<&Actor>, record: &Record) -> PolicyDecision {
        admin_or(actor, &self.identity, |actor| self.owns(actor, record))
    }

    fn list_scope(&self, actor: Option<&Actor>) -> Vec<Condition> {
        match actor {
            Some(actor) if !actor.is_admin(&self.identity) => vec![Condition::equals(
                self.identity.association(),
                actor.id().to_value(),
            )],
            _ => Vec::new(),
        }
    }

    fn is_owner(&self, actor: &Actor, record: &Record) -> bool {
        self.owns(actor, record)
    }

    fn locked_fields(&self) -> Vec<String> {
        vec![self.identity.association().to_string()]
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

    fn owned_by(owner: i64) -> Record {
        Record::try_from(json!({"id": 10, "userId": owner, "title": "t"})).unwrap()
    }

    #[test]
    fn create_requires_actor_and_stamps_association() {
        let policy = OwnerPolicy::new(IdentityFields::default());
        let mut body = Record::new();
        assert_eq!(policy.create(None, &mut body), PolicyDecision::unauthorized());
        assert_eq!(body.field_names().count(), 0);

        let author = actor(4, "member");
        assert!(policy.create(Some(&author), &mut body).is_allowed());
        assert_eq!(body.get("userId"), Some(&json!(4)));
    }

    #[test]
    fn owner_and_admin_may_touch_record_others_may_not() {
        let policy = OwnerPolicy::new(IdentityFields::default());
        let record = owned_by(4);

        assert!(policy.update(Some(&actor(4, "member")), &record).is_allowed());
        assert!(policy.delete(Some(&actor(1, "admin")), &record).is_allowed());
        assert_eq!(
            policy.show(Some(&actor(5, "member")), &record),
            PolicyDecision::forbidden()
        );
        assert_eq!(policy.show(None, &record), PolicyDecision::unauthorized());
    }

    #[test]
    fn list_is_scoped_for_members_only() {
        let policy = OwnerPolicy::new(IdentityFields::default());
        assert_eq!(
            policy.list_scope(Some(&actor(4, "member"))),
            vec![Condition::equals("userId", 4)]
        );
        assert!(policy.list_scope(Some(&actor(1, "admin"))).is_empty());
        assert_eq!(policy.list(None), PolicyDecision::unauthorized());
    }

    #[test]
    fn association_is_locked_after_create() {
        let policy = OwnerPolicy::new(IdentityFields::default());
        assert_eq!(policy.locked_fields(), vec!["userId".to_string()]);
    }
}
