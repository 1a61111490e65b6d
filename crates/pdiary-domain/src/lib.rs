//! # Photo Diary Domain
//!
//! Subscription plans, the persisted subscription status, purchase events,
//! photo access windows, the engine's error taxonomy and the ports the
//! engine talks to its collaborators through.
//!
//! This crate has no runtime dependencies beyond serialization and time
//! handling; all I/O happens behind [`ports`].

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use entities::{PlanDefinition, SubscriptionPlan, SubscriptionStatus};
pub use error::{Error, Result};
pub use value_objects::{AccessWindow, Capabilities, PurchaseEvent};
