// src/application/ports/mod.rs
pub mod security;
pub mod session;
pub mod session_revocation;
pub mod time;

