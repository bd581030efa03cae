// src/domain/record/mod.rs
pub mod condition;
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use condition::Condition;
pub use entity::Record;
pub use repository::RecordRepository;
pub use value_objects::{CollectionName, RecordId};
