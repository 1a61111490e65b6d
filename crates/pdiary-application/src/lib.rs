//! Application Layer - Photo Diary
//!
//! Use cases of the entitlement engine, orchestrating the domain rules over
//! the persistence, clock and purchase backend ports.
//!
//! ## Use Cases
//!
//! | Use case | Responsibility |
//! |----------|----------------|
//! | [`SubscriptionStatusStore`] | Durable status record, serialized mutations |
//! | [`UsageQuotaTracker`] | Monthly AI generation counter |
//! | [`AccessControlManager`] | Plan-gated capability checks |
//! | [`PhotoDateWindowEvaluator`] | Plan photo retention window |
//! | [`SubscriptionService`] | Consumer-facing facade over all of the above |
//!
//! ## Ports
//!
//! - `ports::*`: domain ports re-exported (state store, clock, purchase backend)
//! - `ports::registry`: linkme registry that state store adapters plug into

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::*;
pub use use_cases::*;
