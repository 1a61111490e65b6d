//! Infrastructure service ports

pub mod clock;
pub mod state_store;

pub use clock::Clock;
pub use state_store::StateStoreProvider;
