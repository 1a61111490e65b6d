//! Use case implementations

pub mod access_control;
pub mod photo_window;
pub mod status_store;
pub mod subscription_service;
pub mod usage_quota;

pub use access_control::AccessControlManager;
pub use photo_window::PhotoDateWindowEvaluator;
pub use status_store::SubscriptionStatusStore;
pub use subscription_service::SubscriptionService;
pub use usage_quota::UsageQuotaTracker;
