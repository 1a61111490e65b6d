//! Domain service interfaces
//!
//! Contracts implemented by the use cases and resolved through the
//! service registry as `Arc<dyn ...>`.

pub mod photo_access;
pub mod subscription;

pub use photo_access::PhotoAccessInterface;
pub use subscription::SubscriptionServiceInterface;
