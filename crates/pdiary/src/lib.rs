//! # Photo Diary
//!
//! Subscription entitlement engine of the Photo Diary app: plan catalogue,
//! monthly AI generation quota, plan-gated features and the photo
//! retention window, wired together through a type-keyed service registry.
//!
//! ## Example
//!
//! ```ignore
//! use pdiary::infrastructure::{AppConfig, di::init_app};
//!
//! let context = init_app(AppConfig::default()).await?;
//! let subscription = context.subscription()?;
//! if subscription.can_use_ai_generation().await? {
//!     subscription.increment_ai_usage().await?;
//! }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Plans, status record, errors and ports
//! - `application` - Status store, quota tracker, access control, photo window
//! - `infrastructure` - Service registry, configuration, logging, bootstrap
//! - `providers` - State stores, clocks and purchase backends
//! - `cli` - The `pdiary` command line front end

pub mod cli;

/// Domain layer - core business types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use pdiary_domain::*;
}

/// Application layer - use cases and service contracts
pub mod application {
    pub use pdiary_application::*;
}

/// Infrastructure layer - DI, config and logging
pub mod infrastructure {
    pub use pdiary_infrastructure::*;
}

/// Provider implementations
pub mod providers {
    pub use pdiary_providers::*;
}

pub use pdiary_domain::{Error, Result, SubscriptionPlan, SubscriptionStatus};
pub use pdiary_infrastructure::{AppConfig, ServiceRegistry};
