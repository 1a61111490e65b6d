//! # Photo Diary Providers
//!
//! Adapters implementing the domain ports.
//!
//! | Module | Port | Implementations |
//! |--------|------|-----------------|
//! | [`state_store`] | `StateStoreProvider` | `memory`, `filesystem` (linkme registered) |
//! | [`clock`] | `Clock` | `SystemClock`, `FixedClock` |
//! | [`purchase`] | `PurchaseBackend` | `NullPurchaseBackend`, `SandboxPurchaseBackend` |
//!
//! State store providers register themselves into
//! `pdiary_application::ports::registry::STATE_STORE_PROVIDERS`; linking this
//! crate is enough to make them resolvable by name.

pub mod clock;
pub mod purchase;
pub mod state_store;

pub use clock::{FixedClock, SystemClock};
pub use purchase::{NullPurchaseBackend, SandboxPurchaseBackend, SandboxReceipt};
#[cfg(feature = "store-filesystem")]
pub use state_store::FileStateStore;
#[cfg(feature = "store-memory")]
pub use state_store::InMemoryStateStore;
