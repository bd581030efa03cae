// src/infrastructure/repositories/mod.rs
mod error;
mod memory_record;
mod postgres_record;

pub use error::map_sqlx;
pub use memory_record::InMemoryRecordRepository;
pub use postgres_record::PostgresRecordRepository;
