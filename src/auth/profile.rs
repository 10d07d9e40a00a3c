//! Profile record shape and partial updates.

pub mod config;
pub mod update;

pub use config::{Profile, ProviderType};
pub use update::ProfileUpdate;
