//! Application configuration
//!
//! Sources are layered by [`ConfigLoader`]: built-in defaults, then a TOML
//! file, then `PDIARY_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, StorageConfig};
