// src/application/resources/service.rs
use std::sync::Arc;

use super::{ResourceConfig, validate::{AcceptAll, RecordValidator}};
use crate::application::{
    identity::IdentityFields,
    policy::PolicyEngine,
    ports::{security::PasswordHasher, time::Clock},
};
use crate::domain::record::RecordRepository;

/// Request pipeline for one resource.
pub struct ResourceService {
    pub(super) config: ResourceConfig,
    pub(super) repo: Arc<dyn RecordRepository>,
    pub(super) policies: PolicyEngine,
    pub(super) identity: IdentityFields,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) hasher: Option<Arc<dyn PasswordHasher>>,
    pub(super) validator: Arc<dyn RecordValidator>,
}

impl ResourceService {
    pub fn new(
        config: ResourceConfig,
        repo: Arc<dyn RecordRepository>,
        policies: PolicyEngine,
        identity: IdentityFields,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            repo,
            policies,
            identity,
            clock,
            hasher: None,
            validator: Arc::new(AcceptAll),
        }
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn RecordValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        self.config.name()
    }
}
