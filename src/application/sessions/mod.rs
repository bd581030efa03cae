//! Sign-in, session info and sign-out over the session port.

mod service;

pub use service::{SessionService, SignInRequest};
