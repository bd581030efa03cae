// src/application/resources/definition.rs
use super::ResourceConfig;
use crate::application::{
    identity::IdentityFields,
    policy::{
        Action, DenyAllPolicy, DisabledActions, OwnerPolicy, PublicPolicy, ResourcePolicy,
        UserPolicy,
    },
};
use crate::config::ConfigError;
use serde::Deserialize;
use std::{path::Path, sync::Arc};

/// Authorization strategy named in a resource definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Deny,
    Public,
    Owner,
    User,
}

/// Serialized form of one resource, as found in the resources file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourceDefinition {
    pub name: String,
    /// Defaults to `name`.
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(default)]
    pub unique: Vec<String>,
    #[serde(default)]
    pub update_on_conflict: bool,
    #[serde(default)]
    pub created_field: Option<String>,
    #[serde(default)]
    pub updated_field: Option<String>,
    #[serde(default)]
    pub hidden: Vec<String>,
    #[serde(default)]
    pub private: Vec<String>,
    #[serde(default)]
    pub protected: Vec<String>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub disabled: Vec<Action>,
    /// Only meaningful for the `user` policy.
    #[serde(default = "default_signup")]
    pub allow_signup: bool,
}

fn default_signup() -> bool {
    true
}

impl ResourceDefinition {
    /// The identity resource every deployment gets unless the resources
    /// file declares its own `user` policy resource.
    pub fn users(identity: &IdentityFields, collection: &str) -> Self {
        Self {
            name: "users".to_string(),
            collection: Some(collection.to_string()),
            policy: PolicyKind::User,
            unique: vec![identity.primary().to_string()],
            update_on_conflict: false,
            created_field: Some("created".to_string()),
            updated_field: Some("updated".to_string()),
            hidden: Vec::new(),
            private: Vec::new(),
            protected: vec![identity.role().to_string()],
            required: vec![
                identity.primary().to_string(),
                identity.password().to_string(),
            ],
            secret: Some(identity.password().to_string()),
            disabled: Vec::new(),
            allow_signup: true,
        }
    }

    pub fn config(&self) -> Result<ResourceConfig, ConfigError> {
        let mut builder = ResourceConfig::builder(
            self.name.clone(),
            self.collection.clone().unwrap_or_else(|| self.name.clone()),
        )
        .unique_fields(self.unique.iter().cloned())
        .update_on_conflict(self.update_on_conflict)
        .timestamps(self.created_field.as_deref(), self.updated_field.as_deref())
        .hidden_fields(self.hidden.iter().cloned())
        .private_fields(self.private.iter().cloned())
        .protected_fields(self.protected.iter().cloned())
        .required_fields(self.required.iter().cloned());
        if let Some(secret) = &self.secret {
            builder = builder.secret_field(secret.clone());
        }
        builder.build()
    }

    pub fn policy(&self, identity: &IdentityFields) -> Arc<dyn ResourcePolicy> {
        match self.policy {
            PolicyKind::Deny => Arc::new(DenyAllPolicy),
            PolicyKind::Public => Arc::new(PublicPolicy),
            PolicyKind::Owner => Arc::new(OwnerPolicy::new(identity.clone())),
            PolicyKind::User => {
                Arc::new(UserPolicy::new(identity.clone()).with_signup(self.allow_signup))
            }
        }
    }

    pub fn disabled_actions(&self) -> DisabledActions {
        self.disabled.iter().copied().collect()
    }
}

/// Parses a JSON array of resource definitions.
pub fn parse_definitions(raw: &str) -> Result<Vec<ResourceDefinition>, ConfigError> {
    let definitions: Vec<ResourceDefinition> = serde_json::from_str(raw)
        .map_err(|err| ConfigError::Invalid(format!("resource definitions: {err}")))?;
    let mut seen = std::collections::HashSet::new();
    for definition in &definitions {
        if !seen.insert(definition.name.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "resource '{}' is defined twice",
                definition.name
            )));
        }
    }
    Ok(definitions)
}

pub fn load_definitions(path: &Path) -> Result<Vec<ResourceDefinition>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        ConfigError::Invalid(format!("cannot read {}: {err}", path.display()))
    })?;
    parse_definitions(&raw)
}

/// Returns `definitions` plus the built-in users resource when none of
/// them uses the `user` policy.
pub fn with_builtin_users(
    mut definitions: Vec<ResourceDefinition>,
    identity: &IdentityFields,
    users_collection: &str,
) -> Result<Vec<ResourceDefinition>, ConfigError> {
    if definitions.iter().any(|d| d.policy == PolicyKind::User) {
        return Ok(definitions);
    }
    if definitions.iter().any(|d| d.name == "users") {
        return Err(ConfigError::Invalid(
            "resource 'users' must use the user policy".to_string(),
        ));
    }
    definitions.insert(0, ResourceDefinition::users(identity, users_collection));
    Ok(definitions)
}
