//! Resource request pipeline.
//!
//! Every CRUD verb is an explicit sequence of fallible stages over a
//! [`RequestContext`]. A failing stage aborts the verb with a
//! [`StageError`](crate::application::stage::StageError) naming itself.

mod config;
mod conflict;
mod context;
mod create;
pub mod definition;
mod delete;
mod list;
mod lookup;
mod replace;
mod sanitize;
mod secret;
mod service;
mod shaping;
mod show;
mod timestamp;
mod validate;

pub use config::{ResourceConfig, ResourceConfigBuilder, TimestampFields};
pub use context::{Metadata, RequestContext};
pub use create::CreateOutcome;
pub use definition::{PolicyKind, ResourceDefinition};
pub use service::ResourceService;
pub use validate::{AcceptAll, RecordValidator};
