//! Domain entities

pub mod plan;
pub mod subscription;

pub use plan::{PlanDefinition, SubscriptionPlan};
pub use subscription::SubscriptionStatus;
