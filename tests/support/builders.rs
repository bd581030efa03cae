// tests/support/builders.rs
use serde_json::{Value, json};
use tabula_core::application::resources::{ResourceDefinition, definition::parse_definitions};

pub fn definitions(raw: Value) -> Vec<ResourceDefinition> {
    parse_definitions(&raw.to_string()).expect("valid resource definitions")
}

/// Public resource with a hidden secret and both timestamps.
pub fn tasks() -> Vec<ResourceDefinition> {
    definitions(json!([{
        "name": "tasks",
        "policy": "public",
        "hidden": ["password"],
        "createdField": "createdAt",
        "updatedField": "updatedAt"
    }]))
}

/// Owner-scoped notes with a private field.
pub fn notes() -> Vec<ResourceDefinition> {
    definitions(json!([{
        "name": "notes",
        "policy": "owner",
        "private": ["secretNote"],
        "required": ["title"]
    }]))
}

/// Default-deny resource.
pub fn vault() -> Vec<ResourceDefinition> {
    definitions(json!([{ "name": "vault" }]))
}

pub fn tags(update_on_conflict: bool) -> Vec<ResourceDefinition> {
    definitions(json!([{
        "name": "tags",
        "policy": "public",
        "unique": ["label"],
        "updateOnConflict": update_on_conflict,
        "createdField": "created",
        "updatedField": "updated"
    }]))
}
