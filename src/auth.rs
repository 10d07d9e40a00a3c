//! Authentication Configuration Store
//!
//! Persists named credential profiles for BIG-IP hosts and Cloud Services
//! accounts and keeps at most one default profile per provider type.

pub mod commands;
pub mod profile;
pub mod registry;
pub mod repository;
pub mod storage;

pub use commands::{AuthCommandService, CreateAuthRequest, UpdateAuthRequest};
pub use profile::{Profile, ProfileUpdate, ProviderType};
pub use registry::{shape_of, FieldSpec, DEFAULT_BIGIP_PORT};
pub use repository::AuthRepository;
pub use storage::{MemoryProfileStorage, ProfileStorage, YamlProfileStorage};
