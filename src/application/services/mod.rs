// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        identity::IdentityFields,
        policy::PolicyEngine,
        ports::{security::PasswordHasher, session::SessionManager, time::Clock},
        resources::{PolicyKind, ResourceDefinition, ResourceService},
        sessions::SessionService,
    },
    config::ConfigError,
    domain::record::RecordRepository,
};

/// Every service the HTTP layer dispatches to, built once at startup.
pub struct ApplicationServices {
    resources: Vec<Arc<ResourceService>>,
    sessions: Option<Arc<SessionService>>,
}

impl ApplicationServices {
    pub fn new(resources: Vec<Arc<ResourceService>>, sessions: Option<Arc<SessionService>>) -> Self {
        Self {
            resources,
            sessions,
        }
    }

    /// Wires one pipeline per definition over shared ports. The first
    /// `user` policy resource also backs the session service.
    pub fn from_definitions(
        definitions: &[ResourceDefinition],
        repo: Arc<dyn RecordRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        session_manager: Option<Arc<dyn SessionManager>>,
        clock: Arc<dyn Clock>,
        identity: IdentityFields,
    ) -> Result<Self, ConfigError> {
        let mut resources = Vec::with_capacity(definitions.len());
        let mut sessions = None;

        for definition in definitions {
            let config = definition.config()?;
            if definition.policy == PolicyKind::User && sessions.is_none() {
                if let Some(manager) = &session_manager {
                    sessions = Some(Arc::new(SessionService::new(
                        Arc::clone(&repo),
                        config.collection().clone(),
                        identity.clone(),
                        Arc::clone(&password_hasher),
                        Arc::clone(manager),
                    )));
                }
            }

            let policies = PolicyEngine::new(
                definition.policy(&identity),
                definition.disabled_actions(),
                session_manager.clone(),
            );
            let service = ResourceService::new(
                config,
                Arc::clone(&repo),
                policies,
                identity.clone(),
                Arc::clone(&clock),
            )
            .with_hasher(Arc::clone(&password_hasher));
            tracing::debug!(
                resource = %service.name(),
                policy = ?definition.policy,
                "resource configured"
            );
            resources.push(Arc::new(service));
        }

        Ok(Self::new(resources, sessions))
    }

    pub fn resources(&self) -> &[Arc<ResourceService>] {
        &self.resources
    }

    pub fn resource(&self, name: &str) -> Option<&Arc<ResourceService>> {
        self.resources.iter().find(|service| service.name() == name)
    }

    pub fn sessions(&self) -> Option<&Arc<SessionService>> {
        self.sessions.as_ref()
    }
}
