//! Tooling & Integration Layer
//!
//! The `f5` command-line surface: argument parsing, prompts and the
//! per-invocation context that wires settings, storage and login together.

pub mod cli;

pub use cli::{AuthCommands, Cli, CliContext, Commands, ConfigCommands};
