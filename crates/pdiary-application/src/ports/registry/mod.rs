//! Provider Registry System
//!
//! Compile-time registration of pluggable adapters using `linkme`.
//!
//! ```text
//! 1. Provider defines:  #[linkme::distributed_slice(STATE_STORE_PROVIDERS)]
//!                       static ENTRY: StateStoreProviderEntry = ...
//! 2. Registry declares: #[linkme::distributed_slice]
//!                       pub static STATE_STORE_PROVIDERS: [Entry] = [..]
//! 3. Config selects:    "storage.provider = filesystem" → FileStateStore
//! ```

pub mod state_store;

pub use state_store::{
    STATE_STORE_PROVIDERS, StateStoreProviderConfig, StateStoreProviderEntry,
    list_state_store_providers, resolve_state_store_provider,
};
