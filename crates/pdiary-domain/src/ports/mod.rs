//! Domain Port Interfaces
//!
//! Boundary contracts between the engine and its external collaborators.
//! High-level code depends on these traits; adapters in `pdiary-providers`
//! implement them.
//!
//! ## Organization
//!
//! - **infrastructure/** - Persistence and time
//! - **providers/** - External service providers (purchase backend)

/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;

pub use infrastructure::{Clock, StateStoreProvider};
pub use providers::PurchaseBackend;
