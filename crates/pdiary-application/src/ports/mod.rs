//! Application ports
//!
//! Re-exports the domain ports and declares the provider registries that
//! adapters plug into.

pub mod registry;

pub use pdiary_domain::ports::*;
