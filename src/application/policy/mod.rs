//! Authorization strategies for resources.
//!
//! A [`ResourcePolicy`] answers, per action, whether an (optional) actor may
//! act on a record. Strategies are plain synchronous values so they can be
//! tested without a pipeline; [`PolicyEngine`] adds the asynchronous parts:
//! disabled-action masking and resolving the actor through the session port.

mod base;
mod engine;
mod owner;
mod strategies;
mod user;

pub use base::{DenyAllPolicy, PublicPolicy};
pub use engine::PolicyEngine;
pub use owner::OwnerPolicy;
pub use user::UserPolicy;

use crate::application::{dto::Actor, error::ApplicationError};
use crate::domain::record::{Condition, Record};
use serde::Deserialize;
use std::{collections::HashSet, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    List,
    Show,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::List => "list",
            Action::Show => "show",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "list" => Ok(Action::List),
            "show" => Ok(Action::Show),
            "delete" => Ok(Action::Delete),
            other => Err(format!("unknown action '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyKind {
    /// No actor where one is required.
    Unauthorized,
    /// An actor without sufficient rights.
    Forbidden,
    /// The action must look like it does not exist.
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow,
    Deny(DenyKind),
}

impl PolicyDecision {
    pub fn unauthorized() -> Self {
        Self::Deny(DenyKind::Unauthorized)
    }

    pub fn forbidden() -> Self {
        Self::Deny(DenyKind::Forbidden)
    }

    /// `Unauthorized` for anonymous callers, `Forbidden` otherwise.
    pub fn deny_for(actor: Option<&Actor>) -> Self {
        match actor {
            Some(_) => Self::forbidden(),
            None => Self::unauthorized(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn into_result(self, action: Action) -> Result<(), ApplicationError> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(DenyKind::Unauthorized) => Err(ApplicationError::unauthorized(format!(
                "{action} requires a session"
            ))),
            Self::Deny(DenyKind::Forbidden) => Err(ApplicationError::forbidden(format!(
                "{action} not permitted"
            ))),
            Self::Deny(DenyKind::NotFound) => Err(ApplicationError::not_found(format!(
                "{action} is disabled"
            ))),
        }
    }
}

/// Per-action authorization capability. Every action defaults to a deny,
/// so a strategy must opt in explicitly.
pub trait ResourcePolicy: Send + Sync {
    /// Whether decisions depend on a resolved actor.
    fn requires_session(&self) -> bool {
        false
    }

    /// Whether `action` is refused outright when no actor is resolved.
    /// Checked before any record is loaded.
    fn requires_actor(&self, _action: Action) -> bool {
        self.requires_session()
    }

    /// May mutate `body`, e.g. to stamp ownership.
    fn create(&self, actor: Option<&Actor>, _body: &mut Record) -> PolicyDecision {
        PolicyDecision::deny_for(actor)
    }

    fn update(&self, actor: Option<&Actor>, _record: &Record) -> PolicyDecision {
        PolicyDecision::deny_for(actor)
    }

    fn list(&self, actor: Option<&Actor>) -> PolicyDecision {
        PolicyDecision::deny_for(actor)
    }

    fn show(&self, actor: Option<&Actor>, _record: &Record) -> PolicyDecision {
        PolicyDecision::deny_for(actor)
    }

    fn delete(&self, actor: Option<&Actor>, _record: &Record) -> PolicyDecision {
        PolicyDecision::deny_for(actor)
    }

    /// Conditions narrowing `list` to what the actor may see.
    fn list_scope(&self, _actor: Option<&Actor>) -> Vec<Condition> {
        Vec::new()
    }

    /// Whether `actor` owns `record`; drives private-field visibility.
    fn is_owner(&self, _actor: &Actor, _record: &Record) -> bool {
        false
    }

    /// Fields only an admin may change once a record exists.
    fn locked_fields(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Actions a resource pretends not to have.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabledActions(HashSet<Action>);

impl DisabledActions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }
}

impl FromIterator<Action> for DisabledActions {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
