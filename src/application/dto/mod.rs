pub mod actor;
pub mod auth;
pub mod serde_time;
pub mod sessions;

pub use actor::Actor;
pub use auth::{AuthTokenDto, TokenClaims, TokenSubject};
pub use sessions::SessionGrant;
