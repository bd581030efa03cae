// src/application/identity.rs
use crate::config::ConfigError;

/// Field names that tie user records, sessions and ownership together.
///
/// Resolved once from configuration; policies, the session service and the
/// response shaper all read the same instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityFields {
    primary: String,
    password: String,
    role: String,
    association: String,
    admin_role: String,
}

impl Default for IdentityFields {
    fn default() -> Self {
        Self {
            primary: "username".into(),
            password: "password".into(),
            role: "role".into(),
            association: "userId".into(),
            admin_role: "admin".into(),
        }
    }
}

impl IdentityFields {
    pub fn builder() -> IdentityFieldsBuilder {
        IdentityFieldsBuilder::default()
    }

    /// Field used to look a user up at sign-in.
    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// Field on owned records that holds the owning user's id.
    pub fn association(&self) -> &str {
        &self.association
    }

    pub fn admin_role(&self) -> &str {
        &self.admin_role
    }
}

#[derive(Default)]
pub struct IdentityFieldsBuilder {
    primary: Option<String>,
    password: Option<String>,
    role: Option<String>,
    association: Option<String>,
    admin_role: Option<String>,
}

impl IdentityFieldsBuilder {
    pub fn primary(mut self, value: impl Into<String>) -> Self {
        self.primary = Some(value.into());
        self
    }

    pub fn password(mut self, value: impl Into<String>) -> Self {
        self.password = Some(value.into());
        self
    }

    pub fn role(mut self, value: impl Into<String>) -> Self {
        self.role = Some(value.into());
        self
    }

    pub fn association(mut self, value: impl Into<String>) -> Self {
        self.association = Some(value.into());
        self
    }

    pub fn admin_role(mut self, value: impl Into<String>) -> Self {
        self.admin_role = Some(value.into());
        self
    }

    pub fn build(self) -> Result<IdentityFields, ConfigError> {
        let defaults = IdentityFields::default();
        let fields = IdentityFields {
            primary: self.primary.unwrap_or(defaults.primary),
            password: self.password.unwrap_or(defaults.password),
            role: self.role.unwrap_or(defaults.role),
            association: self.association.unwrap_or(defaults.association),
            admin_role: self.admin_role.unwrap_or(defaults.admin_role),
        };

        let names = [
            ("primary", &fields.primary),
            ("password", &fields.password),
            ("role", &fields.role),
            ("association", &fields.association),
        ];
        for (label, name) in names {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{label} field name is empty")));
            }
            if name == "id" {
                return Err(ConfigError::Invalid(format!(
                    "{label} field cannot be the record id"
                )));
            }
        }
        if fields.primary == fields.password {
            return Err(ConfigError::Invalid(
                "primary and password fields must differ".into(),
            ));
        }
        if fields.admin_role.trim().is_empty() {
            return Err(ConfigError::Invalid("admin role cannot be empty".into()));
        }
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_falls_back_to_defaults() {
        let fields = IdentityFields::builder().role("r").build().unwrap();
        assert_eq!(fields.role(), "r");
        assert_eq!(fields.primary(), "username");
        assert_eq!(fields.admin_role(), "admin");
    }

    #[test]
    fn builder_rejects_id_and_clashing_fields() {
        assert!(IdentityFields::builder().association("id").build().is_err());
        assert!(
            IdentityFields::builder()
                .primary("p")
                .password("p")
                .build()
                .is_err()
        );
    }
}
