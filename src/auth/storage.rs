pub mod contract;
pub mod memory;
pub mod yaml;

pub use contract::ProfileStorage;
pub use memory::MemoryProfileStorage;
pub use yaml::YamlProfileStorage;
