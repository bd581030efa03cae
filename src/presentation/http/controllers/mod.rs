pub mod resources;
pub mod sessions;
