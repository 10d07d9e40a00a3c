//! CLI configuration: home directory layout and the `config.yaml` defaults store.

pub mod paths;
pub mod settings;
pub mod sources;
pub mod store;

pub use paths::CliPaths;
pub use settings::{CliSettings, OutputFormat};
pub use store::SettingsStore;
