pub mod dto;
pub mod error;
pub mod identity;
pub mod policy;
pub mod ports;
pub mod resources;
pub mod services;
pub mod sessions;
pub mod stage;

pub use error::ApplicationResult;
