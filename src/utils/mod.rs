/// Environment-driven client configuration.
pub mod config;

pub use config::{ApiKey, MemoryConfig};
