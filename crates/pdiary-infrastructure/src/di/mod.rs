//! Dependency wiring
//!
//! [`ServiceRegistry`] is the container; [`bootstrap`] is the composition
//! root that binds the engine's services into it.

pub mod bootstrap;
pub mod registry;

pub use bootstrap::{AppContext, build_registry, init_app, init_app_with_clock};
pub use registry::{Lifecycle, ServiceRegistry};
