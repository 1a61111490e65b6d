//! State store providers
//!
//! Key-value persistence backends for the subscription status record.

#[cfg(feature = "store-filesystem")]
pub mod filesystem;
#[cfg(feature = "store-memory")]
pub mod memory;

#[cfg(feature = "store-filesystem")]
pub use filesystem::FileStateStore;
#[cfg(feature = "store-memory")]
pub use memory::InMemoryStateStore;
