// tests/support/mocks/mod.rs
pub mod repos;
pub mod security;
pub mod time;

pub use repos::CountingRepo;
pub use security::{PlainPasswordHasher, StaticSessionManager};
pub use time::{SteppingClock, fixed_now};
