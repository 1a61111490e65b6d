//! # Photo Diary Infrastructure
//!
//! Cross-cutting technical concerns and the composition root.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Type-keyed service registry and bootstrap of the engine |
//! | [`config`] | Layered configuration (defaults, TOML, environment) |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`error_ext`] | Context helpers mapping foreign errors to domain errors |
//! | [`constants`] | File names, prefixes and defaults |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader};
pub use di::{Lifecycle, ServiceRegistry, bootstrap};
pub use error_ext::ErrorContext;
