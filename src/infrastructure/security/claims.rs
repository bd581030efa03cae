// src/infrastructure/security/claims.rs
use crate::application::{
    dto::{Actor, TokenClaims},
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::record::RecordId;
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<TokenClaims> {
    let ctx = ClaimsContext::from_facts(facts);
    build_claims(ctx)
}

fn build_claims(ctx: ClaimsContext) -> ApplicationResult<TokenClaims> {
    let actor_id = ctx
        .actor_id
        .ok_or_else(|| ApplicationError::unauthorized("missing actor id"))?;
    let actor_id =
        RecordId::new(actor_id).map_err(|_| ApplicationError::unauthorized("invalid actor id"))?;
    let session_id = ctx
        .session_id
        .ok_or_else(|| ApplicationError::unauthorized("missing session id"))?;
    let issued_at = ctx
        .issued_at
        .ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
    let expires_at = ctx
        .expires_at
        .ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

    Ok(TokenClaims {
        session_id,
        actor: Actor::new(actor_id, ctx.fields),
        issued_at: DateTime::<Utc>::from(issued_at),
        expires_at: DateTime::<Utc>::from(expires_at),
    })
}

#[derive(Default)]
struct ClaimsContext {
    actor_id: Option<i64>,
    session_id: Option<String>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
    fields: Map<String, Value>,
}

impl ClaimsContext {
    fn from_facts(facts: Vec<Fact>) -> Self {
        let mut ctx = ClaimsContext::default();
        for fact in facts {
            ctx.apply_predicate(fact.predicate);
        }
        ctx
    }

    fn apply_predicate(&mut self, predicate: Predicate) {
        match (predicate.name.as_str(), predicate.terms.as_slice()) {
            ("actor", [Term::Integer(id)]) => self.actor_id = Some(*id),
            ("session", [Term::Str(sid)]) => self.session_id = Some(sid.clone()),
            ("issued_at", [Term::Date(seconds)]) => self.issued_at = Some(at(*seconds)),
            ("expires_at", [Term::Date(seconds)]) => self.expires_at = Some(at(*seconds)),
            ("field", [Term::Str(name), Term::Str(encoded)]) => {
                // Unparseable values are dropped rather than trusted as text.
                if let Ok(value) = serde_json::from_str(encoded) {
                    self.fields.insert(name.clone(), value);
                }
            }
            _ => {}
        }
    }
}

fn at(seconds: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(seconds)
}
