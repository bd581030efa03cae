// src/application/resources/config.rs
use crate::config::ConfigError;
use crate::domain::record::{CollectionName, entity::ID_FIELD};

/// Path segments under `/api/v1` that are not available to resources.
pub const RESERVED_NAMES: &[&str] = &["session"];

/// Optional auto-managed timestamp fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampFields {
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl TimestampFields {
    pub fn new(created: Option<String>, updated: Option<String>) -> Self {
        Self { created, updated }
    }

    pub fn is_enabled(&self) -> bool {
        self.created.is_some() || self.updated.is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.created.iter().chain(self.updated.iter()).map(String::as_str)
    }
}

/// Static, validated description of one resource.
#[derive(Debug, Clone)]
pub struct ResourceConfig {
    name: String,
    collection: CollectionName,
    unique_fields: Vec<String>,
    update_on_conflict: bool,
    timestamps: TimestampFields,
    hidden_fields: Vec<String>,
    private_fields: Vec<String>,
    protected_fields: Vec<String>,
    required_fields: Vec<String>,
    secret_field: Option<String>,
}

impl ResourceConfig {
    pub fn builder(name: impl Into<String>, collection: impl Into<String>) -> ResourceConfigBuilder {
        ResourceConfigBuilder {
            name: name.into(),
            collection: collection.into(),
            ..ResourceConfigBuilder::default()
        }
    }

    /// Path segment the resource is mounted under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collection(&self) -> &CollectionName {
        &self.collection
    }

    pub fn unique_fields(&self) -> &[String] {
        &self.unique_fields
    }

    pub fn update_on_conflict(&self) -> bool {
        self.update_on_conflict
    }

    pub fn timestamps(&self) -> &TimestampFields {
        &self.timestamps
    }

    /// Never sent to clients.
    pub fn hidden_fields(&self) -> &[String] {
        &self.hidden_fields
    }

    /// Sent only to the record's owner or an admin.
    pub fn private_fields(&self) -> &[String] {
        &self.private_fields
    }

    /// Writable only by an admin.
    pub fn protected_fields(&self) -> &[String] {
        &self.protected_fields
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    /// Field hashed through the credential port before it is stored.
    pub fn secret_field(&self) -> Option<&str> {
        self.secret_field.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct ResourceConfigBuilder {
    name: String,
    collection: String,
    unique_fields: Vec<String>,
    update_on_conflict: bool,
    timestamps: TimestampFields,
    hidden_fields: Vec<String>,
    private_fields: Vec<String>,
    protected_fields: Vec<String>,
    required_fields: Vec<String>,
    secret_field: Option<String>,
}

impl ResourceConfigBuilder {
    pub fn unique_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn update_on_conflict(mut self, enabled: bool) -> Self {
        self.update_on_conflict = enabled;
        self
    }

    pub fn timestamps(mut self, created: Option<&str>, updated: Option<&str>) -> Self {
        self.timestamps = TimestampFields::new(
            created.map(str::to_string),
            updated.map(str::to_string),
        );
        self
    }

    pub fn hidden_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn private_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.private_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn protected_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protected_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn required_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn secret_field(mut self, field: impl Into<String>) -> Self {
        self.secret_field = Some(field.into());
        self
    }

    pub fn build(self) -> Result<ResourceConfig, ConfigError> {
        if self.name.is_empty()
            || !self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::Invalid(format!(
                "resource name '{}' must be a non-empty path segment",
                self.name
            )));
        }
        if RESERVED_NAMES.contains(&self.name.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "resource name '{}' is reserved",
                self.name
            )));
        }
        let collection = CollectionName::new(self.collection)
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;

        let named_lists = [
            ("unique", &self.unique_fields),
            ("hidden", &self.hidden_fields),
            ("private", &self.private_fields),
            ("protected", &self.protected_fields),
            ("required", &self.required_fields),
        ];
        for (label, fields) in named_lists {
            if let Some(bad) = fields.iter().find(|f| f.trim().is_empty() || *f == ID_FIELD) {
                return Err(ConfigError::Invalid(format!(
                    "{}: {label} field '{bad}' is not allowed",
                    self.name
                )));
            }
        }
        if self.update_on_conflict && self.unique_fields.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "{}: update_on_conflict needs unique fields",
                self.name
            )));
        }
        if let (Some(created), Some(updated)) =
            (&self.timestamps.created, &self.timestamps.updated)
        {
            if created == updated {
                return Err(ConfigError::Invalid(format!(
                    "{}: created and updated timestamps must differ",
                    self.name
                )));
            }
        }
        if self.timestamps.names().any(|f| f.trim().is_empty() || f == ID_FIELD) {
            return Err(ConfigError::Invalid(format!(
                "{}: invalid timestamp field name",
                self.name
            )));
        }

        let mut hidden_fields = self.hidden_fields;
        if let Some(secret) = &self.secret_field {
            if secret.trim().is_empty() || secret == ID_FIELD {
                return Err(ConfigError::Invalid(format!(
                    "{}: invalid secret field name",
                    self.name
                )));
            }
            if !hidden_fields.contains(secret) {
                hidden_fields.push(secret.clone());
            }
        }

        Ok(ResourceConfig {
            name: self.name,
            collection,
            unique_fields: self.unique_fields,
            update_on_conflict: self.update_on_conflict,
            timestamps: self.timestamps,
            hidden_fields,
            private_fields: self.private_fields,
            protected_fields: self.protected_fields,
            required_fields: self.required_fields,
            secret_field: self.secret_field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_field_is_always_hidden() {
        let config = ResourceConfig::builder("users", "users")
            .secret_field("password")
            .build()
            .unwrap();
        assert_eq!(config.hidden_fields(), ["password".to_string()]);
    }

    #[test]
    fn rejects_update_on_conflict_without_unique_fields() {
        let result = ResourceConfig::builder("tasks", "tasks")
            .update_on_conflict(true)
            .build();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_id_in_field_lists_and_equal_timestamps() {
        assert!(
            ResourceConfig::builder("tasks", "tasks")
                .unique_fields(["id"])
                .build()
                .is_err()
        );
        assert!(
            ResourceConfig::builder("tasks", "tasks")
                .timestamps(Some("at"), Some("at"))
                .build()
                .is_err()
        );
        assert!(ResourceConfig::builder("a/b", "tasks").build().is_err());
    }

    #[test]
    fn rejects_reserved_resource_names() {
        let result = ResourceConfig::builder("session", "sessions").build();
        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("reserved")));
        assert!(ResourceConfig::builder("sessions", "sessions").build().is_ok());
    }
}
