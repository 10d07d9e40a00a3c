//! F5 CLI: configure BIG-IP devices and F5 Cloud Services accounts
//!
//! The heart of the crate is the authentication configuration store: named
//! credential profiles persisted to the CLI home directory, with exactly one
//! default profile per provider type. The command layer, settings store and
//! login verifier are thin adapters around it.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod session;
pub mod tooling;
